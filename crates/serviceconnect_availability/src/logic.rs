// --- File: crates/serviceconnect_availability/src/logic.rs ---
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serviceconnect_common::models::{
    BookedInterval, Booking, BookingStatus, ServiceListing, TechnicianProfile, TimeOfDay,
    WeeklyAvailability, WorkingHours,
};
use serviceconnect_common::services::BookingStore;
use serviceconnect_common::{conflict, internal_error, log_result, not_found, validation_error};
use serviceconnect_common::ServiceConnectError;
use tracing::{debug, info};

pub use serviceconnect_config::DEFAULT_SLOT_STEP_MINUTES;

// --- Data Structures ---
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-05-05"))]
    pub date: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateBookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "2025-05-05"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00"))]
    pub start_time: String,
    pub customer_id: String,
    pub notes: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// Slot generation parameters chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    /// How long one booking occupies the technician.
    pub duration_minutes: u32,
    /// Distance between two candidate start times. Independent of the duration.
    pub step_minutes: u32,
}

impl SlotPolicy {
    /// A policy on the default 30 minute grid.
    pub fn new(duration_minutes: u32) -> Self {
        Self {
            duration_minutes,
            step_minutes: DEFAULT_SLOT_STEP_MINUTES,
        }
    }

    pub fn with_step(mut self, step_minutes: u32) -> Self {
        self.step_minutes = step_minutes;
        self
    }
}

/// Booked ranges that occupy the calendar.
///
/// Built from bookings, only pending and confirmed ones are kept, so a
/// cancelled booking can never make its way into the overlap check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockingBookings(Vec<BookedInterval>);

impl BlockingBookings {
    pub fn from_bookings<'a, I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = &'a Booking>,
    {
        Self(
            bookings
                .into_iter()
                .filter(|b| b.status.is_blocking())
                .map(Booking::interval)
                .collect(),
        )
    }

    /// Intervals the caller already knows to be blocking.
    pub fn from_intervals(intervals: Vec<BookedInterval>) -> Self {
        Self(intervals)
    }

    pub fn intervals(&self) -> &[BookedInterval] {
        &self.0
    }

    /// Whether `[start, end)` (minutes since midnight) hits any interval.
    pub fn conflicts_with(&self, start: u32, end: u32) -> bool {
        self.0.iter().any(|booked| booked.overlaps(start, end))
    }
}

// --- Availability Logic ---

/// Calculates the bookable start times inside one working day.
///
/// Candidates walk from opening time in `policy.step_minutes` increments.
/// A candidate survives when it finishes no later than closing time and its
/// `[start, start + duration)` range does not overlap a blocking booking.
/// Ending exactly at closing time or exactly when a booking begins is fine.
///
/// Inverted working hours, a zero duration or a zero step yield no slots.
pub fn calculate_available_slots(
    working_hours: &WorkingHours,
    blocking: &BlockingBookings,
    policy: SlotPolicy,
) -> Vec<TimeOfDay> {
    if working_hours.is_degenerate() || policy.duration_minutes == 0 || policy.step_minutes == 0 {
        debug!(
            "No slots for degenerate input: hours={}-{}, policy={:?}",
            working_hours.start, working_hours.end, policy
        );
        return Vec::new();
    }

    let open = working_hours.start.minutes();
    let close = working_hours.end.minutes();
    let mut available_slots = Vec::new();
    let mut candidate = open;

    while candidate < close {
        let Some(candidate_end) = candidate.checked_add(policy.duration_minutes) else {
            break;
        };
        // Later candidates only end later.
        if candidate_end > close {
            break;
        }
        if !blocking.conflicts_with(candidate, candidate_end) {
            if let Some(slot) = TimeOfDay::from_minutes(candidate) {
                available_slots.push(slot);
            }
        }
        candidate = match candidate.checked_add(policy.step_minutes) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(
        "Calculated {} slots for {}-{} ({} blocking intervals)",
        available_slots.len(),
        working_hours.start,
        working_hours.end,
        blocking.intervals().len()
    );
    available_slots
}

/// Whether the technician works on the weekday of `date`.
pub fn is_open_on(availability: &WeeklyAvailability, date: NaiveDate) -> bool {
    let index = date.weekday().num_days_from_sunday() as u8;
    availability.is_available_on_index(index).unwrap_or(false)
}

/// Slots for one date, short-circuiting on days the technician is off.
pub fn available_slots_for_date(
    date: NaiveDate,
    availability: &WeeklyAvailability,
    working_hours: &WorkingHours,
    blocking: &BlockingBookings,
    policy: SlotPolicy,
) -> Vec<TimeOfDay> {
    if !is_open_on(availability, date) {
        debug!("Technician is off on {} ({:?})", date, date.weekday());
        return Vec::new();
    }
    calculate_available_slots(working_hours, blocking, policy)
}

// --- Request parsing ---

/// Parses the `date` query parameter. Absent or malformed is a client error.
pub fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ServiceConnectError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| validation_error("Missing date parameter (YYYY-MM-DD)"))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| validation_error(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

/// Parses a client supplied time of day.
pub fn parse_time(raw: &str) -> Result<TimeOfDay, ServiceConnectError> {
    raw.parse::<TimeOfDay>().map_err(validation_error)
}

// --- Store orchestration ---

async fn load_service_and_technician(
    store: &dyn BookingStore,
    service_id: &str,
) -> Result<(ServiceListing, TechnicianProfile), ServiceConnectError> {
    let service = store
        .find_service(service_id)
        .await?
        .ok_or_else(|| not_found(format!("Service {}", service_id)))?;
    let technician = store
        .find_technician(&service.technician_id)
        .await?
        .ok_or_else(|| not_found(format!("Technician {}", service.technician_id)))?;
    Ok((service, technician))
}

/// Fetches the snapshot for one service and date and computes its slots.
pub async fn find_available_slots(
    store: &dyn BookingStore,
    service_id: &str,
    date: NaiveDate,
    step_minutes: u32,
) -> Result<Vec<TimeOfDay>, ServiceConnectError> {
    let (service, technician) = load_service_and_technician(store, service_id).await?;
    slots_for_service(store, &service, &technician, date, step_minutes).await
}

async fn slots_for_service(
    store: &dyn BookingStore,
    service: &ServiceListing,
    technician: &TechnicianProfile,
    date: NaiveDate,
    step_minutes: u32,
) -> Result<Vec<TimeOfDay>, ServiceConnectError> {
    let duration = service.duration_minutes()?;

    if !is_open_on(&technician.availability, date) {
        info!(
            "Technician {} does not work on {} ({:?})",
            technician.id,
            date,
            date.weekday()
        );
        return Ok(Vec::new());
    }

    let bookings = store.bookings_for_service_on(&service.id, date).await?;
    let blocking = BlockingBookings::from_bookings(&bookings);
    let policy = SlotPolicy::new(duration).with_step(step_minutes);

    Ok(calculate_available_slots(
        &technician.working_hours,
        &blocking,
        policy,
    ))
}

// --- Booking Logic ---

/// Creates a pending booking if the requested start is currently offered.
///
/// The store re-checks overlap when writing, which catches a competing
/// request that claimed the range after the slots were computed.
pub async fn create_booking(
    store: &dyn BookingStore,
    service_id: &str,
    request: CreateBookingRequest,
    step_minutes: u32,
) -> Result<Booking, ServiceConnectError> {
    let date = parse_date(Some(&request.date))?;
    let start_time = parse_time(&request.start_time)?;
    if request.customer_id.trim().is_empty() {
        return Err(validation_error("customer_id must not be empty"));
    }

    let (service, technician) = load_service_and_technician(store, service_id).await?;
    let slots = slots_for_service(store, &service, &technician, date, step_minutes).await?;
    if !slots.contains(&start_time) {
        return Err(conflict(format!(
            "Requested time slot {} on {} is not available",
            start_time, date
        )));
    }

    let end_minutes = start_time.minutes() + service.duration_minutes()?;
    let end_time = TimeOfDay::from_minutes(end_minutes)
        .ok_or_else(|| internal_error(format!("Booking end {} is past midnight", end_minutes)))?;

    let booking = Booking::new(
        service_id.to_string(),
        request.customer_id,
        date,
        BookedInterval::new(start_time, end_time),
        request.notes,
    );

    log_result(
        store.insert_booking(booking).await,
        &format!("Booked {} on {} at {}", service_id, date, start_time),
        "Failed to store booking",
    )
}

/// Moves a booking to a new status.
pub async fn change_booking_status(
    store: &dyn BookingStore,
    booking_id: uuid::Uuid,
    status: BookingStatus,
) -> Result<Booking, ServiceConnectError> {
    log_result(
        store.update_booking_status(booking_id, status).await,
        &format!("Booking {} is now {:?}", booking_id, status),
        "Failed to update booking status",
    )
}
