// File: crates/serviceconnect_availability/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{AvailabilityQuery, CreateBookingRequest, UpdateBookingStatusRequest};
use serviceconnect_common::models::{
    BookedInterval, Booking, BookingStatus, ServiceListing, TechnicianProfile, TimeOfDay,
    WeeklyAvailability, WorkingHours,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_availability_handler,
        crate::handlers::create_booking_handler,
        crate::handlers::update_booking_status_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            CreateBookingRequest,
            UpdateBookingStatusRequest,
            TimeOfDay,
            WorkingHours,
            WeeklyAvailability,
            BookedInterval,
            BookingStatus,
            Booking,
            TechnicianProfile,
            ServiceListing
        )
    ),
    tags(
        (name = "Availability", description = "Bookable start times per service and date"),
        (name = "Booking", description = "Creating bookings and changing their status")
    ),
    servers(
        (url = "/api", description = "ServiceConnect API server")
    )
)]
pub struct AvailabilityApiDoc;
