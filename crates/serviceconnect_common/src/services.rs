// --- File: crates/serviceconnect_common/src/services.rs ---
//! Service abstractions for the storage collaborator.
//!
//! Handlers only see this trait, so the relational store, the in-memory
//! store and test mocks are interchangeable.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::ServiceConnectError;
use crate::models::{Booking, BookingStatus, ServiceListing, TechnicianProfile};

/// Read and write access to technicians, services and bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_service(
        &self,
        service_id: &str,
    ) -> Result<Option<ServiceListing>, ServiceConnectError>;

    async fn find_technician(
        &self,
        technician_id: &str,
    ) -> Result<Option<TechnicianProfile>, ServiceConnectError>;

    /// All bookings of a service on one date, in any status.
    async fn bookings_for_service_on(
        &self,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, ServiceConnectError>;

    /// Stores a new booking.
    ///
    /// Implementations must re-check the range against the blocking bookings
    /// of the same service and date atomically with the write, and fail with
    /// [`ServiceConnectError::ConflictError`] on overlap.
    async fn insert_booking(&self, booking: Booking) -> Result<Booking, ServiceConnectError>;

    /// Applies a status change, validated against the allowed transitions.
    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, ServiceConnectError>;
}
