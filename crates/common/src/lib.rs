//! Common types and utilities shared across the ask-user crates

pub mod auth;
pub mod config;
pub mod error;
pub mod tracing_setup;
pub mod types;

pub use auth::*;
pub use config::*;
pub use error::*;
pub use tracing_setup::*;
pub use types::*;
