pub mod caller;
pub mod error_handling;
