//! # Slotwise Engine
//!
//! Booking and appointment-lifecycle logic for the Slotwise scheduling
//! service. This crate orchestrates the repositories in `slotwise-db`:
//!
//! - **Booking**: claims a slot, resolves the owning user (creating a
//!   prospect for anonymous bookers), persists the appointment, and sends a
//!   best-effort confirmation.
//! - **Status**: the appointment state machine and its slot side effects
//!   (release on denial/cancellation, re-claim on re-acceptance).
//! - **Identity**: looks up authenticated callers and creates/refreshes
//!   prospect users from booking-time contact details.
//! - **Notify**: the outbound notification seam, fire-and-forget from the
//!   booking engine's perspective.
//!
//! Appointment creation and the slot claim share a single Postgres
//! transaction, so a lost claim race never leaves an appointment behind.

/// Booking orchestration
pub mod booking;
/// Caller lookup and prospect-user creation
pub mod identity;
/// Outbound notification seam
pub mod notify;
/// Conversions from database rows to domain models and API views
pub mod projection;
/// Appointment state machine side effects
pub mod status;
