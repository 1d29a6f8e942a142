pub mod appointment;
pub mod service;
pub mod time_slot;
pub mod user;
