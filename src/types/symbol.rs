//! Symbol identifiers and per-symbol registration state

use alloy::primitives::{keccak256, B256};
use serde::Serialize;

/// Opaque 32-byte symbol identifier.
pub type SymbolHash = B256;

/// Derive the symbol hash for a ticker (`keccak256` of its UTF-8 bytes).
pub fn symbol_hash(ticker: &str) -> SymbolHash {
    keccak256(ticker.as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolConfig {
    pub window_length: u64,
    pub cooldown: u64,
    pub halted: bool,
    pub registered_at: u64,
    /// Block of the last accepted report, `None` until the first one lands.
    pub last_accepted: Option<u64>,
}

impl SymbolConfig {
    pub fn new(window_length: u64, cooldown: u64, registered_at: u64) -> Self {
        Self {
            window_length,
            cooldown,
            halted: false,
            registered_at,
            last_accepted: None,
        }
    }

    /// Earliest block at which the next report is accepted.
    pub fn next_report_block(&self) -> u64 {
        self.last_accepted
            .map(|last| last.saturating_add(self.cooldown))
            .unwrap_or(0)
    }
}
