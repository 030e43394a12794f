// --- File: crates/serviceconnect_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Slot grid used when no `availability` section is configured.
pub const DEFAULT_SLOT_STEP_MINUTES: u32 = 30;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Availability Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AvailabilityConfig {
    /// Distance in minutes between two candidate start times.
    #[serde(default = "default_slot_step_minutes")]
    pub slot_step_minutes: u32,
    /// Optional JSON file used to seed the in-memory booking store.
    #[serde(default)]
    pub seed_path: Option<String>,
}

fn default_slot_step_minutes() -> u32 {
    DEFAULT_SLOT_STEP_MINUTES
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            slot_step_minutes: DEFAULT_SLOT_STEP_MINUTES,
            seed_path: None,
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error. Defaults to info.
    pub level: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    /// Enables the booking write endpoints (create, status change).
    #[serde(default)]
    pub use_booking: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub availability: Option<AvailabilityConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl AppConfig {
    /// The configured slot step, falling back to the 30 minute grid.
    pub fn slot_step_minutes(&self) -> u32 {
        self.availability
            .as_ref()
            .map(|a| a.slot_step_minutes)
            .unwrap_or(DEFAULT_SLOT_STEP_MINUTES)
    }

    pub fn seed_path(&self) -> Option<&str> {
        self.availability.as_ref()?.seed_path.as_deref()
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    /// Rejects values that would make the service misbehave at runtime.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.slot_step_minutes() == 0 {
            return Err(config::ConfigError::Message(
                "availability.slot_step_minutes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
