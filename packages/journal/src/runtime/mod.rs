// packages/journal/src/runtime/mod.rs
//! Host lifecycle and event sources
//!
//! - **Host**: binds a journal to a foreground or background lifecycle
//! - **Sources**: click, touch and connectivity adapters

pub mod host;
pub mod sources;

// Re-export commonly used types
pub use host::{HostKind, HostStats, JournalHost};
pub use sources::{ClickSource, ConnectivitySource, EventSource, TouchAction, TouchSource};
