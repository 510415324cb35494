// packages/journal/src/utils/mod.rs
//! Shared configuration and error types

pub mod config;
pub mod errors;

pub use config::{JournalConfig, LogSettings};
pub use errors::{JournalError, Result};
