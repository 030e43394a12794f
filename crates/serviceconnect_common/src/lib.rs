// --- File: crates/serviceconnect_common/src/lib.rs ---

pub mod error; // Error handling
pub mod features; // Runtime feature flag handling
pub mod http; // Error to HTTP response mapping
pub mod logging; // Logging utilities
pub mod models; // Records shared by every crate
pub mod services; // Storage abstraction

// Re-export error types and utilities for easier access
pub use error::{
    conflict, feature_disabled, internal_error, not_found, validation_error, HttpStatusCode,
    ServiceConnectError,
};

pub use features::is_booking_enabled;

pub use logging::{init_with_level, log_error, log_result};
