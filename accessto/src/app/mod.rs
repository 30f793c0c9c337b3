pub mod access_config;
mod accessto_app;
mod app_error;
pub mod commands;

pub use access_config::AccessConfig;
pub use accessto_app::{AccesstoApp, AccesstoOperation, DualMeasure, ImpedanceKind};
pub use app_error::AccesstoAppError;
