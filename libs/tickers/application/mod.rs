//! Application Layer
//!
//! Contains use cases and application services.
//! This layer depends on domain and infrastructure layers.

pub mod facade;
pub mod polling;

// Re-export application facade for binaries
pub use facade::{init_logging_with_level, ScraperApp};

pub use polling::{
    truncate_message, CycleReport, FatalError, LoopState, PollingLoop, SymbolOutcome,
    MAX_ERROR_MESSAGE_CHARS,
};
