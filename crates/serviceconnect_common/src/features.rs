//! Runtime feature flag handling.
//!
//! Compile-time features (`openapi`) are plain cargo features. Runtime
//! features are `use_*` booleans in [`AppConfig`]; this module answers
//! whether one of them is switched on.

use serviceconnect_config::AppConfig;

/// Whether the booking write endpoints are available.
pub fn is_booking_enabled(config: &AppConfig) -> bool {
    config.use_booking
}
