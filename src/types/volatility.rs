//! Volatility reading types

use serde::Serialize;

/// Result of one trailing-window volatility computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VolatilityReading {
    /// Mean absolute percent change, fixed-point E8 (100% = 100_00000000).
    pub value_e8: u128,
    /// Adjacent pairs that fell inside the window.
    pub pairs_used: usize,
    pub window: u64,
}
