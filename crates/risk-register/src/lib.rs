pub mod config;
pub mod error;
pub mod register;
pub mod telemetry;
