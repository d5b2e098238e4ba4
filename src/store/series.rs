//! Per-symbol price ring buffer with its band state

use std::collections::VecDeque;
use crate::types::{HeatBand, PriceObservation, VolatilityReading};
use super::BandLog;

#[derive(Debug, Clone, Default)]
pub struct SymbolSeries {
    pub observations: VecDeque<PriceObservation>,
    pub band_log: BandLog,
    pub band: HeatBand,
    pub volatility: VolatilityReading,
}

/// Band state captured before a report, restored if the report is rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesCheckpoint {
    pub len: usize,
    pub band: HeatBand,
    pub volatility: VolatilityReading,
}

impl SymbolSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            observations: VecDeque::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceObservation> {
        self.observations.back()
    }

    /// Most recent observation at or before `block`, scanning backward.
    pub fn price_at(&self, block: u64) -> Option<&PriceObservation> {
        self.observations.iter().rev().find(|obs| obs.block <= block)
    }

    /// Drop the `count` oldest observations and their band records.
    pub fn evict_oldest(&mut self, count: usize) -> usize {
        let count = count.min(self.observations.len());
        self.observations.drain(..count);
        self.band_log.evict_front(count);
        count
    }

    pub fn checkpoint(&self) -> SeriesCheckpoint {
        SeriesCheckpoint {
            len: self.observations.len(),
            band: self.band,
            volatility: self.volatility,
        }
    }

    /// Undo everything appended since `checkpoint`.
    pub fn restore(&mut self, checkpoint: SeriesCheckpoint) {
        while self.observations.len() > checkpoint.len {
            self.observations.pop_back();
            self.band_log.pop_back();
        }
        self.band = checkpoint.band;
        self.volatility = checkpoint.volatility;
    }
}
