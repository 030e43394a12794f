// --- File: crates/serviceconnect_availability/src/routes.rs ---

use crate::handlers::{
    create_booking_handler, get_availability_handler, update_booking_status_handler,
    AvailabilityState,
};
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing the availability and booking routes.
pub fn routes(state: Arc<AvailabilityState>) -> Router {
    Router::new()
        .route(
            "/services/{service_id}/availability",
            get(get_availability_handler),
        )
        .route(
            "/services/{service_id}/bookings",
            post(create_booking_handler),
        )
        .route(
            "/bookings/{booking_id}/status",
            patch(update_booking_status_handler),
        )
        .with_state(state)
}
