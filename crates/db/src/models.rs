use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub booked: bool,
    pub appointment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Option<Uuid>,
    pub time_slot_id: Uuid,
    /// Stored as text; parsed into `AppointmentStatus` at the domain boundary.
    pub status: String,
    pub notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Appointment row joined with user and service display names for list views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Option<Uuid>,
    pub time_slot_id: Uuid,
    pub status: String,
    pub notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub user_first_name: Option<String>,
    pub user_last_name: Option<String>,
    pub service_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub password_hash: String,
    pub prospect: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}
