// File: crates/serviceconnect_availability/src/handlers.rs
use crate::logic::{
    change_booking_status, create_booking, find_available_slots, parse_date, AvailabilityQuery,
    CreateBookingRequest, UpdateBookingStatusRequest,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serviceconnect_common::models::{Booking, TimeOfDay};
use serviceconnect_common::services::BookingStore;
use serviceconnect_common::{feature_disabled, is_booking_enabled, ServiceConnectError};
use serviceconnect_config::AppConfig;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Shared state for the availability and booking handlers.
#[derive(Clone)]
pub struct AvailabilityState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn BookingStore>,
}

impl AvailabilityState {
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn BookingStore>) -> Self {
        Self { config, store }
    }

    fn ensure_booking_enabled(&self) -> Result<(), ServiceConnectError> {
        if is_booking_enabled(&self.config) {
            Ok(())
        } else {
            Err(feature_disabled("Booking service is disabled."))
        }
    }
}

/// Handler to get the bookable start times of a service on one date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/services/{service_id}/availability",
    params(
        ("service_id" = String, Path, description = "Service identifier"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Start times in HH:MM, ascending", body = [String],
         example = json!(["09:00", "09:30", "11:00"])),
        (status = 400, description = "Missing or malformed date"),
        (status = 404, description = "Unknown service or technician"),
        (status = 500, description = "Internal error")
    ),
    tag = "Availability"
))]
pub async fn get_availability_handler(
    State(state): State<Arc<AvailabilityState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<Vec<TimeOfDay>>, ServiceConnectError> {
    let Path(service_id) = path?;
    let Query(query) = query?;
    let date = parse_date(query.date.as_deref())?;
    info!("Availability requested for service {} on {}", service_id, date);

    let slots = find_available_slots(
        state.store.as_ref(),
        &service_id,
        date,
        state.config.slot_step_minutes(),
    )
    .await?;

    Ok(Json(slots))
}

/// Handler to book one of the offered slots.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/services/{service_id}/bookings",
    params(("service_id" = String, Path, description = "Service identifier")),
    request_body(content = CreateBookingRequest, example = json!({
        "date": "2025-05-05",
        "start_time": "10:00",
        "customer_id": "cust-42",
        "notes": "Kitchen sink leaks"
    })),
    responses(
        (status = 201, description = "Booking created in PENDING status", body = Booking),
        (status = 400, description = "Malformed body, date, time or customer"),
        (status = 404, description = "Unknown service or technician"),
        (status = 409, description = "Requested time slot is not available"),
        (status = 503, description = "Booking is disabled")
    ),
    tag = "Booking"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<AvailabilityState>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ServiceConnectError> {
    state.ensure_booking_enabled()?;
    let Path(service_id) = path?;
    let Json(payload) = payload?;

    let booking = create_booking(
        state.store.as_ref(),
        &service_id,
        payload,
        state.config.slot_step_minutes(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Handler to confirm, complete or cancel a booking.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/bookings/{booking_id}/status",
    params(("booking_id" = Uuid, Path, description = "Booking identifier")),
    request_body(content = UpdateBookingStatusRequest, example = json!({ "status": "CONFIRMED" })),
    responses(
        (status = 200, description = "Updated booking", body = Booking),
        (status = 400, description = "Malformed booking id or unknown status"),
        (status = 404, description = "Unknown booking"),
        (status = 409, description = "Status change not allowed"),
        (status = 503, description = "Booking is disabled")
    ),
    tag = "Booking"
))]
pub async fn update_booking_status_handler(
    State(state): State<Arc<AvailabilityState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateBookingStatusRequest>, JsonRejection>,
) -> Result<Json<Booking>, ServiceConnectError> {
    state.ensure_booking_enabled()?;
    let Path(booking_id) = path?;
    let Json(payload) = payload?;

    let booking = change_booking_status(state.store.as_ref(), booking_id, payload.status).await?;
    Ok(Json(booking))
}
