//! Shared types for the backend environment configuration
//!
//! This crate contains the value and error types used by the configuration
//! loader and the `envcheck` tool.

pub mod error;
pub mod utils;
pub mod value;

// Re-export commonly used types
pub use error::{ConfigError, Result};
pub use value::ConfigValue;
