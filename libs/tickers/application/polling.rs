//! Poll-fetch-persist loop
//!
//! The loop starts in [`LoopState::Initializing`], creates the schema and
//! moves to [`LoopState::Running`]. Every cycle walks the symbol list in
//! order: fetch, then persist. Transient fetch failures skip the symbol for
//! this cycle; a rejected request or a failed write stops the loop with a
//! [`FatalError`] for the caller to turn into an exit status.

use crate::domain::{Symbol, SymbolMap};
use crate::infrastructure::client::{FetchError, MarketDataClient};
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::database::{
    DatabaseError, ObservationRepository, PersistenceError, SchemaError, SchemaManager,
};
use chrono::{SecondsFormat, Utc};
use std::convert::Infallible;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Longest error message written to the log, in characters
pub const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// Conditions after which the process must stop
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[from] reqwest::Error),

    #[error("Exchange rejected request for {symbol}: {source}")]
    ExchangeRejected {
        symbol: Symbol,
        #[source]
        source: FetchError,
    },

    #[error("Failed to persist {symbol}: {source}")]
    Persistence {
        symbol: Symbol,
        #[source]
        source: PersistenceError,
    },

    #[error("Polling loop used before initialization")]
    NotInitialized,
}

impl FatalError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            FatalError::Configuration(_) => 2,
            FatalError::Schema(_) => 3,
            FatalError::ExchangeRejected { .. } => 4,
            FatalError::Persistence { .. } => 5,
            FatalError::Database(_) | FatalError::ClientSetup(_) | FatalError::NotInitialized => 1,
        }
    }

    /// Short tag used in log lines
    pub fn tag(&self) -> &'static str {
        match self {
            FatalError::Configuration(_) => "ConfigurationError",
            FatalError::Schema(_) => "SchemaError",
            FatalError::Database(_) => "DatabaseError",
            FatalError::ClientSetup(_) => "ClientSetupError",
            FatalError::ExchangeRejected { .. } => "ExchangeRejected",
            FatalError::Persistence { .. } => "PersistenceError",
            FatalError::NotInitialized => "NotInitialized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
}

/// What happened to one symbol in one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolOutcome {
    Persisted,
    Skipped(FetchError),
}

/// Result of one pass over the symbol list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: u64,
    pub persisted: Vec<Symbol>,
    pub skipped: Vec<(Symbol, FetchError)>,
}

/// Drives the fixed symbol list through fetch and persist
pub struct PollingLoop {
    client: Arc<dyn MarketDataClient>,
    repository: Arc<dyn ObservationRepository>,
    schema: Arc<dyn SchemaManager>,
    symbols: Vec<Symbol>,
    symbols_label: String,
    state: LoopState,
    cycles: u64,
}

impl PollingLoop {
    pub fn new(
        client: Arc<dyn MarketDataClient>,
        repository: Arc<dyn ObservationRepository>,
        schema: Arc<dyn SchemaManager>,
        symbols: &SymbolMap,
    ) -> Self {
        Self {
            client,
            repository,
            schema,
            symbols: symbols.symbols().cloned().collect(),
            symbols_label: symbols.to_string(),
            state: LoopState::Initializing,
            cycles: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Completed or attempted cycles so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Create the tables and switch to `Running`
    pub async fn initialize(&mut self) -> Result<(), FatalError> {
        if self.state == LoopState::Running {
            return Ok(());
        }

        info!("Initializing tables for {}", self.symbols_label);

        match self.schema.ensure_tables(&self.symbols).await {
            Ok(()) => {
                self.state = LoopState::Running;
                Ok(())
            }
            // A symbol without a storage key is a configuration problem
            Err(SchemaError::UnmappedSymbol(e)) => {
                let fatal = FatalError::Configuration(ConfigError::Symbol(e));
                log_fatal(&fatal);
                Err(fatal)
            }
            Err(e) => {
                let fatal = FatalError::Schema(e);
                log_fatal(&fatal);
                Err(fatal)
            }
        }
    }

    /// Fetch and persist every symbol once
    pub async fn run_cycle(&mut self) -> Result<CycleReport, FatalError> {
        if self.state != LoopState::Running {
            return Err(FatalError::NotInitialized);
        }

        self.cycles += 1;
        info!(
            "{} fetching {} ticker from {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            self.symbols_label,
            self.client.name()
        );

        let mut report = CycleReport {
            cycle: self.cycles,
            ..Default::default()
        };

        for symbol in &self.symbols {
            match self.process_symbol(symbol).await? {
                SymbolOutcome::Persisted => report.persisted.push(symbol.clone()),
                SymbolOutcome::Skipped(err) => report.skipped.push((symbol.clone(), err)),
            }
        }

        debug!(
            cycle = report.cycle,
            persisted = report.persisted.len(),
            skipped = report.skipped.len(),
            "Cycle complete"
        );

        Ok(report)
    }

    /// Initialize if needed, then cycle until something fatal happens
    pub async fn run(&mut self) -> Result<Infallible, FatalError> {
        self.initialize().await?;

        loop {
            self.run_cycle().await?;
        }
    }

    async fn process_symbol(&self, symbol: &Symbol) -> Result<SymbolOutcome, FatalError> {
        let snapshot = match self.client.fetch_snapshot(symbol).await {
            Ok(snapshot) => snapshot,
            Err(err) if err.is_transient() => {
                warn!(
                    "[{}] {}: {}",
                    err.tag(),
                    symbol,
                    truncate_message(err.message(), MAX_ERROR_MESSAGE_CHARS)
                );
                return Ok(SymbolOutcome::Skipped(err));
            }
            Err(err) => {
                let fatal = FatalError::ExchangeRejected {
                    symbol: symbol.clone(),
                    source: err,
                };
                log_fatal(&fatal);
                return Err(fatal);
            }
        };

        if let Err(source) = self.repository.persist(symbol, &snapshot).await {
            let fatal = FatalError::Persistence {
                symbol: symbol.clone(),
                source,
            };
            log_fatal(&fatal);
            return Err(fatal);
        }

        Ok(SymbolOutcome::Persisted)
    }
}

fn log_fatal(fatal: &FatalError) {
    let message = fatal.to_string();
    error!(
        "[{}] {}",
        fatal.tag(),
        truncate_message(&message, MAX_ERROR_MESSAGE_CHARS)
    );
}

/// First `max_chars` characters of `message`
pub fn truncate_message(message: &str, max_chars: usize) -> &str {
    match message.char_indices().nth(max_chars) {
        Some((idx, _)) => &message[..idx],
        None => message,
    }
}
