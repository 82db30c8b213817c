pub mod absence;
pub mod config;
pub mod error;
pub mod telemetry;
