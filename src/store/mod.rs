//! Bounded per-symbol time-series storage

pub mod band_log;
pub mod series;

pub use band_log::*;
pub use series::*;

use std::collections::HashMap;
use tracing::debug;
use crate::{
    config::{BPS_DENOMINATOR, MAX_HISTORY_LENGTH, MIN_HISTORY_LENGTH},
    errors::{TrackerError, TrackerResult},
    types::{BandRecord, PriceObservation, SymbolConfig, SymbolHash},
    utils::page,
};

pub struct TimeSeriesStore {
    series: HashMap<SymbolHash, SymbolSeries>,
    max_history_length: usize,
    trim_headroom_bps: u32,
}

impl TimeSeriesStore {
    pub fn new(max_history_length: usize, trim_headroom_bps: u32) -> Self {
        Self {
            series: HashMap::new(),
            max_history_length: max_history_length.clamp(MIN_HISTORY_LENGTH, MAX_HISTORY_LENGTH),
            trim_headroom_bps: trim_headroom_bps.clamp(1, BPS_DENOMINATOR),
        }
    }

    pub fn max_history_length(&self) -> usize {
        self.max_history_length
    }

    /// Change the cap. Existing series are not evicted; appends stay refused
    /// until an explicit trim brings them back under the new cap.
    pub fn set_max_history_length(&mut self, length: usize) -> TrackerResult<()> {
        if !(MIN_HISTORY_LENGTH..=MAX_HISTORY_LENGTH).contains(&length) {
            return Err(TrackerError::HistoryLengthOutOfRange {
                length,
                min: MIN_HISTORY_LENGTH,
                max: MAX_HISTORY_LENGTH,
            });
        }
        self.max_history_length = length;
        Ok(())
    }

    /// Length a trim brings a series down to; always leaves at least one free slot.
    pub fn trim_target(&self) -> usize {
        let cap = self.max_history_length;
        let headroom = (cap * self.trim_headroom_bps as usize / BPS_DENOMINATOR as usize).max(1);
        cap.saturating_sub(headroom)
    }

    pub fn create(&mut self, symbol: SymbolHash) {
        let capacity = self.max_history_length.min(64);
        self.series.insert(symbol, SymbolSeries::with_capacity(capacity));
    }

    pub fn destroy(&mut self, symbol: &SymbolHash) -> Option<SymbolSeries> {
        self.series.remove(symbol)
    }

    pub fn get(&self, symbol: &SymbolHash) -> TrackerResult<&SymbolSeries> {
        self.series.get(symbol).ok_or(TrackerError::NotFound(*symbol))
    }

    pub fn get_mut(&mut self, symbol: &SymbolHash) -> TrackerResult<&mut SymbolSeries> {
        self.series.get_mut(symbol).ok_or(TrackerError::NotFound(*symbol))
    }

    /// Check every admission rule for a report without mutating anything.
    pub fn check_append(
        &self,
        symbol: &SymbolHash,
        config: &SymbolConfig,
        price: u128,
        block: u64,
    ) -> TrackerResult<()> {
        let series = self.get(symbol)?;

        if config.halted {
            return Err(TrackerError::Halted(*symbol));
        }
        if price == 0 {
            return Err(TrackerError::ZeroPrice);
        }
        if let Some(newest) = series.latest() {
            if block < newest.block {
                return Err(TrackerError::TimestampRegression {
                    block,
                    newest: newest.block,
                });
            }
        }
        if config.last_accepted.is_some() && block < config.next_report_block() {
            return Err(TrackerError::CooldownActive {
                block,
                next_allowed: config.next_report_block(),
            });
        }
        if series.len() >= self.max_history_length {
            return Err(TrackerError::HistoryFull {
                length: series.len(),
                cap: self.max_history_length,
            });
        }
        Ok(())
    }

    /// Validate and push one observation, recording it as the last accepted report.
    pub fn append(
        &mut self,
        symbol: &SymbolHash,
        config: &mut SymbolConfig,
        price: u128,
        block: u64,
    ) -> TrackerResult<&mut SymbolSeries> {
        self.check_append(symbol, config, price, block)?;

        let series = self.get_mut(symbol)?;
        series.observations.push_back(PriceObservation { price, block });
        config.last_accepted = Some(block);
        Ok(series)
    }

    /// Evict oldest observations until the series is at or below the trim target.
    pub fn trim(&mut self, symbol: &SymbolHash) -> TrackerResult<usize> {
        let target = self.trim_target();
        let series = self.get_mut(symbol)?;
        let excess = series.len().saturating_sub(target);
        let evicted = series.evict_oldest(excess);
        debug!(%symbol, evicted, remaining = series.len(), "Trimmed price history");
        Ok(evicted)
    }

    /// Observations in insertion order. `limit == 0` reads to the end.
    pub fn history(&self, symbol: &SymbolHash, offset: usize, limit: usize) -> TrackerResult<Vec<PriceObservation>> {
        let series = self.get(symbol)?;
        Ok(page(series.observations.iter().copied(), offset, limit))
    }

    pub fn band_history(&self, symbol: &SymbolHash, offset: usize, limit: usize) -> TrackerResult<Vec<BandRecord>> {
        let series = self.get(symbol)?;
        Ok(page(series.band_log.iter().copied(), offset, limit))
    }

    pub fn price_at(&self, symbol: &SymbolHash, block: u64) -> TrackerResult<Option<PriceObservation>> {
        Ok(self.get(symbol)?.price_at(block).copied())
    }

    pub fn total_observations(&self) -> usize {
        self.series.values().map(SymbolSeries::len).sum()
    }
}
