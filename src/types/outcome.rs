//! Report outcomes and read-side projections

use alloy::primitives::U256;
use serde::Serialize;
use crate::errors::TrackerError;
use super::{HeatBand, SymbolHash, VolatilityReading};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub symbol: SymbolHash,
    pub price: u128,
    pub block: u64,
    pub previous_band: HeatBand,
    pub band: HeatBand,
    pub volatility: VolatilityReading,
    pub observations: usize,
}

impl ReportOutcome {
    pub fn band_crossed(&self) -> bool {
        self.previous_band != self.band
    }
}

/// A batch item that failed a per-item check and was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub index: usize,
    pub symbol: SymbolHash,
    pub reason: TrackerError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub applied: Vec<ReportOutcome>,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolSummary {
    pub symbol: SymbolHash,
    pub window_length: u64,
    pub cooldown: u64,
    pub halted: bool,
    pub registered_at: u64,
    pub last_accepted: Option<u64>,
    pub band: HeatBand,
    pub volatility_e8: u128,
    pub last_price: Option<u128>,
    pub observations: usize,
    pub band_records: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BandDistribution {
    pub cold: usize,
    pub mild: usize,
    pub warm: usize,
    pub hot: usize,
    pub critical: usize,
}

impl BandDistribution {
    pub fn record(&mut self, band: HeatBand) {
        match band {
            HeatBand::Cold => self.cold += 1,
            HeatBand::Mild => self.mild += 1,
            HeatBand::Warm => self.warm += 1,
            HeatBand::Hot => self.hot += 1,
            HeatBand::Critical => self.critical += 1,
        }
    }

    pub fn count(&self, band: HeatBand) -> usize {
        match band {
            HeatBand::Cold => self.cold,
            HeatBand::Mild => self.mild,
            HeatBand::Warm => self.warm,
            HeatBand::Hot => self.hot,
            HeatBand::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.cold + self.mild + self.warm + self.hot + self.critical
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub symbol_count: usize,
    pub halted_count: usize,
    pub total_observations: usize,
    pub total_reports: u64,
    pub bands: BandDistribution,
    pub average_volatility_e8: u128,
    pub hottest: Option<(SymbolHash, u128)>,
    pub paused: bool,
    pub treasury_balance: U256,
}
