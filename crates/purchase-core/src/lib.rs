//! Purchase Core Library
//!
//! Domain models, error types, configuration and validation rules shared by
//! the purchase form crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{AuthStrategyKind, FormConfig, IntakeConfig};
pub use error::{ErrorKind, ErrorMetadata, FormError, FormResult, LogLevel};
