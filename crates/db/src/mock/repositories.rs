use chrono::{DateTime, Utc};
use mockall::mock;
use slotwise_core::errors::SlotwiseResult;
use slotwise_core::models::user::ProfileHints;
use uuid::Uuid;

use crate::models::{DbAppointment, DbAppointmentDetails, DbService, DbTimeSlot, DbUser};

// Mock repositories for testing

mock! {
    pub TimeSlotRepo {
        pub async fn create_time_slot(
            &self,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> SlotwiseResult<DbTimeSlot>;

        pub async fn list_available_slots(
            &self,
            now: DateTime<Utc>,
        ) -> SlotwiseResult<Vec<DbTimeSlot>>;

        pub async fn get_time_slot_by_id(
            &self,
            id: Uuid,
        ) -> SlotwiseResult<Option<DbTimeSlot>>;

        pub async fn claim_slot(
            &self,
            slot_id: Uuid,
            appointment_id: Uuid,
        ) -> SlotwiseResult<DbTimeSlot>;

        pub async fn release_slot(
            &self,
            slot_id: Uuid,
        ) -> SlotwiseResult<()>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn get_appointment_by_id(
            &self,
            id: Uuid,
        ) -> SlotwiseResult<Option<DbAppointment>>;

        pub async fn get_appointment_details(
            &self,
            id: Uuid,
        ) -> SlotwiseResult<Option<DbAppointmentDetails>>;

        pub async fn list_appointments_by_user(
            &self,
            user_id: Uuid,
        ) -> SlotwiseResult<Vec<DbAppointmentDetails>>;

        pub async fn list_all_appointments(
            &self,
        ) -> SlotwiseResult<Vec<DbAppointmentDetails>>;

        pub async fn update_appointment_status(
            &self,
            id: Uuid,
            status: &'static str,
        ) -> SlotwiseResult<Option<DbAppointment>>;
    }
}

mock! {
    pub UserRepo {
        pub async fn find_user_by_id(
            &self,
            id: Uuid,
        ) -> SlotwiseResult<Option<DbUser>>;

        pub async fn find_user_by_email(
            &self,
            email: &'static str,
        ) -> SlotwiseResult<Option<DbUser>>;

        pub async fn create_prospect_user(
            &self,
            email: &'static str,
            hints: ProfileHints,
            password_hash: &'static str,
        ) -> SlotwiseResult<DbUser>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> SlotwiseResult<Option<DbService>>;

        pub async fn list_services(&self) -> SlotwiseResult<Vec<DbService>>;
    }
}
