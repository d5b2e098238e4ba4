//! Band thresholds in basis points of percent

use serde::Serialize;
use crate::{
    config::{BPS_DENOMINATOR, E8},
    errors::{TrackerError, TrackerResult},
};

/// Volatility E8 units per basis point: 1 bp = 0.01% = 1_000_000 in E8 percent.
pub const E8_PER_BPS: u128 = E8 / 100;

/// Upper bounds (inclusive) of the cold, mild, warm and hot bands.
/// Anything above `hot_max` is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub cold_max: u32,
    pub mild_max: u32,
    pub warm_max: u32,
    pub hot_max: u32,
}

impl Thresholds {
    /// Build a threshold set, enforcing `cold < mild < warm < hot <= 10000`.
    pub fn new(cold_max: u32, mild_max: u32, warm_max: u32, hot_max: u32) -> TrackerResult<Self> {
        let ordered = cold_max < mild_max && mild_max < warm_max && warm_max < hot_max;
        if !ordered || hot_max > BPS_DENOMINATOR {
            return Err(TrackerError::InvalidThresholds {
                cold: cold_max,
                mild: mild_max,
                warm: warm_max,
                hot: hot_max,
            });
        }
        Ok(Self { cold_max, mild_max, warm_max, hot_max })
    }

    pub fn from_bps(bps: [u32; 4]) -> TrackerResult<Self> {
        Self::new(bps[0], bps[1], bps[2], bps[3])
    }

    pub fn as_bps(&self) -> [u32; 4] {
        [self.cold_max, self.mild_max, self.warm_max, self.hot_max]
    }

    /// Bounds scaled to volatility E8 units, in classification order.
    pub fn bounds_e8(&self) -> [u128; 4] {
        self.as_bps().map(|bps| bps as u128 * E8_PER_BPS)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cold_max: 500,
            mild_max: 1_500,
            warm_max: 3_000,
            hot_max: 7_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_thresholds_are_valid() {
        let defaults = Thresholds::default();
        assert_eq!(Thresholds::from_bps(defaults.as_bps()), Ok(defaults));
        assert_eq!(defaults.bounds_e8()[3], 70 * E8);
    }

    #[test]
    fn rejects_equal_neighbours_and_overflowing_hot_bound() {
        assert!(Thresholds::new(100, 100, 200, 300).is_err());
        assert!(Thresholds::new(100, 200, 300, 10_001).is_err());
        assert!(Thresholds::new(100, 200, 300, 10_000).is_ok());
    }

    proptest! {
        #[test]
        fn accepted_only_when_strictly_increasing(
            cold in 0u32..12_000,
            mild in 0u32..12_000,
            warm in 0u32..12_000,
            hot in 0u32..12_000,
        ) {
            let valid = cold < mild && mild < warm && warm < hot && hot <= 10_000;
            prop_assert_eq!(Thresholds::new(cold, mild, warm, hot).is_ok(), valid);
        }
    }
}
