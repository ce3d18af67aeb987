//! Environment configuration for the backend
//!
//! This crate seeds the process environment from an optional `.env` file,
//! resolves the typed configuration record and runs the production
//! readiness advisories.

pub mod loader;
pub mod schema;
pub mod source;
pub mod validation;

pub use loader::{default_dotenv_path, load_dotenv, DotenvStatus, EnvLoader, LoadedEnvironment};
pub use schema::*;
pub use source::{EnvSource, MapEnv, ProcessEnv};
pub use validation::*;
