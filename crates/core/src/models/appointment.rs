use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::SlotwiseError;

/// Lifecycle status of an appointment.
///
/// `Pending` is the initial state. `Denied` and `Canceled` release the
/// underlying slot but stay re-enterable: staff may still move such an
/// appointment to `Accepted`, which re-claims the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Denied,
    Canceled,
}

/// What a status transition does to the appointment's time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEffect {
    /// The slot occupancy is left untouched.
    Keep,
    /// The slot is released back to the free pool.
    Release,
    /// The slot must be re-claimed for this appointment; the claim can
    /// fail if another appointment took the slot in the meantime.
    Reclaim,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Accepted => "Accepted",
            AppointmentStatus::Denied => "Denied",
            AppointmentStatus::Canceled => "Canceled",
        }
    }

    /// True for the statuses that do not hold a slot claim.
    pub fn is_released(&self) -> bool {
        matches!(self, AppointmentStatus::Denied | AppointmentStatus::Canceled)
    }

    /// The slot side effect of moving an appointment from `self` to `to`.
    ///
    /// A no-op write (`self == to`) never touches the slot. Transitions into
    /// `Denied`/`Canceled` release the slot only when it was actually held.
    /// Re-accepting a denied or canceled appointment re-claims the slot.
    /// `Pending` -> `Accepted` keeps the claim taken at booking time.
    pub fn slot_effect(&self, to: AppointmentStatus) -> SlotEffect {
        if *self == to {
            return SlotEffect::Keep;
        }
        if to.is_released() && !self.is_released() {
            return SlotEffect::Release;
        }
        if to == AppointmentStatus::Accepted && self.is_released() {
            return SlotEffect::Reclaim;
        }
        SlotEffect::Keep
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = SlotwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            s if s.eq_ignore_ascii_case("Pending") => Ok(AppointmentStatus::Pending),
            s if s.eq_ignore_ascii_case("Accepted") => Ok(AppointmentStatus::Accepted),
            s if s.eq_ignore_ascii_case("Denied") => Ok(AppointmentStatus::Denied),
            s if s.eq_ignore_ascii_case("Canceled") => Ok(AppointmentStatus::Canceled),
            other => Err(SlotwiseError::Validation(format!(
                "Unknown appointment status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Option<Uuid>,
    pub time_slot_id: Uuid,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Payload for booking an appointment against a slot.
///
/// The contact fields feed the prospect-user path when the caller is not
/// authenticated; they are ignored for authenticated callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub service_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNotesRequest {
    pub notes: Option<String>,
}

/// Appointment projection returned by the API, with joined display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Option<Uuid>,
    pub time_slot_id: Uuid,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub user_name: Option<String>,
    pub service_name: Option<String>,
}
