pub mod constants;
pub mod db;
pub mod error;
pub mod server;
pub mod services;
pub mod settings;
pub mod telemetry;
pub mod transfer;
pub mod validators;
