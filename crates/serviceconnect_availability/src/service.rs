// --- File: crates/serviceconnect_availability/src/service.rs ---
//! In-memory implementation of the [`BookingStore`] trait.
//!
//! Used by the backend binary (optionally seeded from a JSON file) and by
//! the router tests. One lock covers all maps so the overlap re-check and
//! the insert happen as a single step.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serviceconnect_common::models::{Booking, BookingStatus, ServiceListing, TechnicianProfile};
use serviceconnect_common::services::BookingStore;
use serviceconnect_common::{conflict, not_found, validation_error, ServiceConnectError};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Records used to pre-populate the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub technicians: Vec<TechnicianProfile>,
    #[serde(default)]
    pub services: Vec<ServiceListing>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl SeedData {
    /// Reads seed records from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServiceConnectError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        info!(
            "Loaded seed {}: {} technicians, {} services, {} bookings",
            path.display(),
            seed.technicians.len(),
            seed.services.len(),
            seed.bookings.len()
        );
        Ok(seed)
    }
}

#[derive(Default)]
struct Records {
    technicians: HashMap<String, TechnicianProfile>,
    services: HashMap<String, ServiceListing>,
    bookings: HashMap<Uuid, Booking>,
}

#[derive(Default)]
pub struct InMemoryBookingStore {
    records: RwLock<Records>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding the seed records. Seed bookings are taken as
    /// they are, without the overlap check.
    pub fn from_seed(seed: SeedData) -> Self {
        let records = Records {
            technicians: seed
                .technicians
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect(),
            services: seed
                .services
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect(),
            bookings: seed.bookings.into_iter().map(|b| (b.id, b)).collect(),
        };
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn find_service(
        &self,
        service_id: &str,
    ) -> Result<Option<ServiceListing>, ServiceConnectError> {
        Ok(self.records.read().await.services.get(service_id).cloned())
    }

    async fn find_technician(
        &self,
        technician_id: &str,
    ) -> Result<Option<TechnicianProfile>, ServiceConnectError> {
        Ok(self
            .records
            .read()
            .await
            .technicians
            .get(technician_id)
            .cloned())
    }

    async fn bookings_for_service_on(
        &self,
        service_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, ServiceConnectError> {
        let records = self.records.read().await;
        let mut bookings: Vec<Booking> = records
            .bookings
            .values()
            .filter(|b| b.service_id == service_id && b.date == date)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start_time);
        Ok(bookings)
    }

    async fn insert_booking(&self, booking: Booking) -> Result<Booking, ServiceConnectError> {
        if booking.start_time >= booking.end_time {
            return Err(validation_error(format!(
                "Booking range {}-{} is empty",
                booking.start_time, booking.end_time
            )));
        }

        let mut records = self.records.write().await;
        let start = booking.start_time.minutes();
        let end = booking.end_time.minutes();
        let clash = records.bookings.values().find(|existing| {
            existing.service_id == booking.service_id
                && existing.date == booking.date
                && existing.status.is_blocking()
                && existing.interval().overlaps(start, end)
        });
        if let Some(existing) = clash {
            debug!(
                "Booking {}-{} clashes with {} ({}-{})",
                booking.start_time,
                booking.end_time,
                existing.id,
                existing.start_time,
                existing.end_time
            );
            return Err(conflict("Requested time slot is no longer available"));
        }

        records.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, ServiceConnectError> {
        let mut records = self.records.write().await;
        let booking = records
            .bookings
            .get_mut(&booking_id)
            .ok_or_else(|| not_found(format!("Booking {}", booking_id)))?;
        booking.status = booking.status.transition_to(status)?;
        Ok(booking.clone())
    }
}
