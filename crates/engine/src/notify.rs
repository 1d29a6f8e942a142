//! Outbound notification seam.
//!
//! The booking engine treats notification delivery as fire-and-forget: a
//! failed send is logged and never fails the booking. The trait is the
//! integration point for a real mail provider; the shipped implementation
//! writes to the log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotwise_core::errors::SlotwiseResult;

#[mockall::automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> SlotwiseResult<()>;
}

/// Logs outbound notifications instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> SlotwiseResult<()> {
        tracing::info!(to, subject, body_len = body.len(), "Sending notification");
        Ok(())
    }
}

/// Builds the booking-confirmation subject and body for a new appointment.
pub fn booking_confirmation(
    service_name: Option<&str>,
    start_time: DateTime<Utc>,
) -> (String, String) {
    let subject = "Your appointment request was received".to_string();
    let service_line = match service_name {
        Some(name) => format!("Service: {name}\n"),
        None => String::new(),
    };
    let body = format!(
        "Thank you for booking with us.\n\n\
         {service_line}\
         Date: {}\n\
         Time: {}\n\n\
         We will confirm your appointment shortly.",
        start_time.format("%Y-%m-%d"),
        start_time.format("%H:%M %Z"),
    );
    (subject, body)
}
