//! Domain Layer
//!
//! Plain data types shared by the client, the database and the polling loop.
//! Nothing in here performs I/O.

pub mod snapshot;
pub mod symbol;

pub use snapshot::{TickerInfo, TickerSnapshot, TickerValue, TimestampEncoding};
pub use symbol::{StorageKey, Symbol, SymbolError, SymbolMap};
