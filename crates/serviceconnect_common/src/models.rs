// --- File: crates/serviceconnect_common/src/models.rs ---

//! Records shared across the ServiceConnect crates.
//!
//! Times of day are stored as minutes since midnight and only rendered as
//! `"HH:MM"` at the serialization boundary.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{conflict, ServiceConnectError};

/// Minutes in a day. `24:00` is the only time of day that reaches it.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Malformed input handed to the availability code. These indicate a bug or
/// corrupt record upstream rather than a business outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputShapeError {
    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTimeOfDay(String),
    #[error("service duration must not be negative, got {0} minutes")]
    NegativeDuration(i64),
    #[error("service duration of {0} minutes is out of range")]
    DurationOutOfRange(i64),
}

impl From<InputShapeError> for ServiceConnectError {
    fn from(err: InputShapeError) -> Self {
        ServiceConnectError::InternalError(err.to_string())
    }
}

// --- Time of day ---

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from minutes since midnight; `None` past `24:00`.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes > MINUTES_PER_DAY {
            return None;
        }
        u16::try_from(minutes).ok().map(TimeOfDay)
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour * 60 + minute)
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = InputShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || InputShapeError::InvalidTimeOfDay(s.to_string());

        // chrono accepts single digit fields, the wire form is strictly HH:MM.
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }

        if s == "24:00" {
            return Ok(TimeOfDay(MINUTES_PER_DAY as u16));
        }
        let time = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| invalid())?;
        Self::from_hm(time.hour(), time.minute()).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = InputShapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

// --- Technician schedule ---

/// The daily window in which a technician accepts appointments.
///
/// `start < end` is expected but not enforced; an inverted window simply
/// has no bookable slots.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl WorkingHours {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }
}

/// Which weekdays a technician works. All seven days must be present.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeeklyAvailability {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl WeeklyAvailability {
    pub fn every_day() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: true,
            sunday: true,
        }
    }

    /// Monday to Friday.
    pub fn weekdays() -> Self {
        Self {
            saturday: false,
            sunday: false,
            ..Self::every_day()
        }
    }

    pub fn is_available(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Lookup by weekday index, Sunday = 0. `None` for indices above 6.
    pub fn is_available_on_index(&self, index: u8) -> Option<bool> {
        let weekday = match index {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => return None,
        };
        Some(self.is_available(weekday))
    }
}

// --- Bookings ---

/// A reserved `[start_time, end_time)` range on one date.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl BookedInterval {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Half-open overlap test against `[start, end)` given in minutes.
    /// Touching ranges do not overlap.
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        start < self.end_time.minutes() && self.start_time.minutes() < end
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Pending and confirmed bookings occupy their time range.
    pub fn is_blocking(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    pub fn transition_to(self, next: BookingStatus) -> Result<BookingStatus, ServiceConnectError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(conflict(format!(
                "Cannot change booking status from {:?} to {:?}",
                self, next
            )))
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub service_id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// A new booking starts out pending.
    pub fn new(
        service_id: String,
        customer_id: String,
        date: NaiveDate,
        interval: BookedInterval,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_id,
            customer_id,
            date,
            start_time: interval.start_time,
            end_time: interval.end_time,
            status: BookingStatus::Pending,
            notes,
            created_at: Utc::now(),
        }
    }

    pub fn interval(&self) -> BookedInterval {
        BookedInterval::new(self.start_time, self.end_time)
    }
}

// --- Catalogue ---

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianProfile {
    pub id: String,
    pub name: String,
    pub working_hours: WorkingHours,
    pub availability: WeeklyAvailability,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceListing {
    pub id: String,
    pub technician_id: String,
    pub title: String,
    /// Stored as a signed integer; see [`ServiceListing::duration_minutes`].
    pub duration_minutes: i64,
    /// Price in the smallest currency unit.
    #[serde(default)]
    pub price: Option<i64>,
}

impl ServiceListing {
    /// The validated duration. Negative values are a corrupt record.
    pub fn duration_minutes(&self) -> Result<u32, InputShapeError> {
        if self.duration_minutes < 0 {
            return Err(InputShapeError::NegativeDuration(self.duration_minutes));
        }
        u32::try_from(self.duration_minutes)
            .map_err(|_| InputShapeError::DurationOutOfRange(self.duration_minutes))
    }
}
