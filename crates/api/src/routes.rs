pub mod appointments;
pub mod health;
pub mod services;
pub mod slots;
