// --- File: crates/services/serviceconnect_backend/src/app_state.rs ---
use serviceconnect_availability::handlers::AvailabilityState;
use serviceconnect_availability::service::{InMemoryBookingStore, SeedData};
use serviceconnect_common::services::BookingStore;
use serviceconnect_common::ServiceConnectError;
use serviceconnect_config::AppConfig;
use std::sync::Arc;
use tracing::info;

/// Application state that is shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn BookingStore>,
}

impl AppState {
    /// Builds the booking store, seeding it when `availability.seed_path` is set.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, ServiceConnectError> {
        let store = match config.seed_path() {
            Some(path) => InMemoryBookingStore::from_seed(SeedData::from_file(path)?),
            None => {
                info!("No seed configured, starting with an empty store");
                InMemoryBookingStore::new()
            }
        };

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    pub fn availability_state(&self) -> Arc<AvailabilityState> {
        Arc::new(AvailabilityState::new(
            self.config.clone(),
            self.store.clone(),
        ))
    }
}
