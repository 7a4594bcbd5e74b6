//! Binary runner utilities
//!
//! Provides a standardized way to run binaries with startup and
//! shutdown banners around the main loop.

use tickers::application::{truncate_message, MAX_ERROR_MESSAGE_CHARS};
use tracing::{error, info};

/// Configuration for running a binary application
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the binary (for logging)
    pub name: String,
    /// Extra `label: value` lines shown in the startup banner
    pub details: Vec<(String, String)>,
}

impl RunConfig {
    /// Create a new run configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: Vec::new(),
        }
    }

    /// Add a line to the startup banner
    pub fn with_detail(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.details.push((label.into(), value.to_string()));
        self
    }
}

/// Trait for binary applications
///
/// Implement this trait to create a standardized binary
/// that follows Clean Architecture principles.
#[allow(async_fn_in_trait)]
pub trait BinaryRunner {
    /// Run the application main loop
    async fn run(&mut self) -> anyhow::Result<()>;

    /// Get the run configuration
    fn config(&self) -> &RunConfig;

    /// Print startup banner
    fn print_banner(&self) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("Starting {}", config.name);
        for (label, value) in &config.details {
            info!("{}: {}", label, value);
        }
        info!("========================================");
        info!("");
    }

    /// Print shutdown banner
    fn print_shutdown(&self, reason: Option<&str>) {
        let config = self.config();
        info!("");
        info!("========================================");
        match reason {
            Some(reason) => error!("{} stopped: {}", config.name, reason),
            None => info!("{} stopped", config.name),
        }
        info!("========================================");
    }

    /// Execute the binary with banners around the main loop
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let result = self.run().await;
        self.print_shutdown(shutdown_reason(&result).as_deref());
        result
    }
}

/// Error text for the shutdown banner, cut to the same length as loop errors
pub fn shutdown_reason(result: &anyhow::Result<()>) -> Option<String> {
    result.as_ref().err().map(|e| {
        let message = e.to_string();
        truncate_message(&message, MAX_ERROR_MESSAGE_CHARS).to_string()
    })
}
