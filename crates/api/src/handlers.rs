pub mod appointments;
pub mod services;
pub mod slots;
