//! Trading pairs and their storage keys
//!
//! Every pair the scraper polls is mapped to a short storage key that names
//! its tables (`ticker_value_btc`, `ticker_info_btc`). The map is closed: a
//! pair without a key is a configuration error.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest storage key accepted. Keeps `ticker_value_<key>` below the
/// 63-byte PostgreSQL identifier limit.
pub const MAX_STORAGE_KEY_LEN: usize = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Symbol {0} has no storage key")]
    Unmapped(String),

    #[error("Invalid trading pair: {0:?}")]
    InvalidPair(String),

    #[error("Invalid storage key {key:?}: {reason}")]
    InvalidStorageKey { key: String, reason: &'static str },

    #[error("Duplicate symbol in map: {0}")]
    DuplicatePair(String),

    #[error("Duplicate storage key in map: {0}")]
    DuplicateKey(String),

    #[error("Symbol map is empty")]
    Empty,
}

// =============================================================================
// Symbol
// =============================================================================

/// Trading pair in `BASE/QUOTE` notation (e.g., "BTC/USDT")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(pair: impl Into<String>) -> Result<Self, SymbolError> {
        let pair = pair.into();
        let valid = match pair.split_once('/') {
            Some((base, quote)) => {
                !base.is_empty()
                    && !quote.is_empty()
                    && base.chars().chain(quote.chars()).all(|c| c.is_ascii_alphanumeric())
            }
            None => false,
        };

        if !valid {
            return Err(SymbolError::InvalidPair(pair));
        }

        Ok(Self(pair))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Provider-native id (e.g., "BTC/USDT" -> "BTCUSDT")
    pub fn exchange_id(&self) -> String {
        self.0.replace('/', "").to_uppercase()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

// =============================================================================
// StorageKey
// =============================================================================

/// Short lowercase identifier used as a table-name suffix.
///
/// Table names are SQL identifiers and cannot be bound as parameters, so a
/// key is only constructible when it matches `[a-z][a-z0-9_]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Result<Self, SymbolError> {
        let key = key.into();
        let invalid = |reason| SymbolError::InvalidStorageKey {
            key: key.clone(),
            reason,
        };

        let mut chars = key.chars();
        match chars.next() {
            None => return Err(invalid("must not be empty")),
            Some(c) if !c.is_ascii_lowercase() => {
                return Err(invalid("must start with a lowercase letter"))
            }
            Some(_) => {}
        }

        if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
            return Err(invalid("only lowercase letters, digits and '_' are allowed"));
        }

        if key.len() > MAX_STORAGE_KEY_LEN {
            return Err(invalid("longer than 40 characters"));
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StorageKey {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StorageKey::new(value)
    }
}

impl From<StorageKey> for String {
    fn from(key: StorageKey) -> Self {
        key.0
    }
}

// =============================================================================
// SymbolMap
// =============================================================================

/// Ordered, closed mapping from trading pair to storage key.
///
/// Order is the polling order within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMap {
    entries: Vec<(Symbol, StorageKey)>,
}

impl SymbolMap {
    /// Pairs polled when no configuration overrides them
    pub const DEFAULT_PAIRS: [(&'static str, &'static str); 4] = [
        ("BTC/USDT", "btc"),
        ("ETH/USDT", "eth"),
        ("BNB/USDT", "bnb"),
        ("EOS/USDT", "eos"),
    ];

    /// Build a map from `(pair, key)` entries, rejecting duplicates
    pub fn new(entries: Vec<(Symbol, StorageKey)>) -> Result<Self, SymbolError> {
        if entries.is_empty() {
            return Err(SymbolError::Empty);
        }

        for (i, (symbol, key)) in entries.iter().enumerate() {
            for (other_symbol, other_key) in &entries[..i] {
                if other_symbol == symbol {
                    return Err(SymbolError::DuplicatePair(symbol.to_string()));
                }
                if other_key == key {
                    return Err(SymbolError::DuplicateKey(key.to_string()));
                }
            }
        }

        Ok(Self { entries })
    }

    /// Build a map from raw strings
    pub fn from_pairs<P, K>(pairs: impl IntoIterator<Item = (P, K)>) -> Result<Self, SymbolError>
    where
        P: Into<String>,
        K: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(pair, key)| Ok((Symbol::new(pair)?, StorageKey::new(key)?)))
            .collect::<Result<Vec<_>, SymbolError>>()?;

        Self::new(entries)
    }

    /// Look up the storage key of a pair
    pub fn storage_key(&self, symbol: &Symbol) -> Result<&StorageKey, SymbolError> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, key)| key)
            .ok_or_else(|| SymbolError::Unmapped(symbol.to_string()))
    }

    /// Pairs in polling order
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|(symbol, _)| symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolMap {
    fn default() -> Self {
        let entries = Self::DEFAULT_PAIRS
            .iter()
            .map(|(pair, key)| (Symbol(pair.to_string()), StorageKey(key.to_string())))
            .collect();

        Self { entries }
    }
}

impl fmt::Display for SymbolMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<&str> = self.symbols().map(Symbol::as_str).collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}
