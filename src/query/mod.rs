//! Read-only projections over tracker state
//!
//! Nothing here mutates or emits. Pagination never fails: an offset past the
//! end yields an empty page and `limit == 0` reads to the end.

use alloy::primitives::U256;
use crate::{
    access::AccessControl,
    bands::Thresholds,
    errors::TrackerResult,
    events::EventSink,
    tracker::HeatTracker,
    types::{
        AggregateStats, BandDistribution, BandRecord, HeatBand, PriceObservation, SymbolHash,
        SymbolSummary, VolatilityReading,
    },
    utils::page,
};

impl<S: EventSink> HeatTracker<S> {
    pub fn current_band(&self, symbol: &SymbolHash) -> TrackerResult<HeatBand> {
        Ok(self.store.get(symbol)?.band)
    }

    /// Latest accepted price, `None` before the first report.
    pub fn current_price(&self, symbol: &SymbolHash) -> TrackerResult<Option<u128>> {
        Ok(self.store.get(symbol)?.latest().map(|observation| observation.price))
    }

    pub fn current_volatility(&self, symbol: &SymbolHash) -> TrackerResult<VolatilityReading> {
        Ok(self.store.get(symbol)?.volatility)
    }

    pub fn history(&self, symbol: &SymbolHash, offset: usize, limit: usize) -> TrackerResult<Vec<PriceObservation>> {
        self.store.history(symbol, offset, limit)
    }

    pub fn band_history(&self, symbol: &SymbolHash, offset: usize, limit: usize) -> TrackerResult<Vec<BandRecord>> {
        self.store.band_history(symbol, offset, limit)
    }

    /// Band log filtered down to the records where the band changed.
    pub fn band_transitions(&self, symbol: &SymbolHash) -> TrackerResult<Vec<BandRecord>> {
        Ok(self.store.get(symbol)?.band_log.transitions())
    }

    pub fn price_at(&self, symbol: &SymbolHash, block: u64) -> TrackerResult<Option<PriceObservation>> {
        self.store.price_at(symbol, block)
    }

    /// Blocks the retained history spent in `band`, up to `now`.
    pub fn time_in_band(&self, symbol: &SymbolHash, band: HeatBand, now: u64) -> TrackerResult<u64> {
        Ok(self.store.get(symbol)?.band_log.time_in_band(band, now))
    }

    pub fn symbol_summary(&self, symbol: &SymbolHash) -> TrackerResult<SymbolSummary> {
        let config = self.registry.get(symbol)?;
        let series = self.store.get(symbol)?;
        Ok(SymbolSummary {
            symbol: *symbol,
            window_length: config.window_length,
            cooldown: config.cooldown,
            halted: config.halted,
            registered_at: config.registered_at,
            last_accepted: config.last_accepted,
            band: series.band,
            volatility_e8: series.volatility.value_e8,
            last_price: series.latest().map(|observation| observation.price),
            observations: series.len(),
            band_records: series.band_log.len(),
        })
    }

    pub fn summaries(&self, offset: usize, limit: usize) -> Vec<SymbolSummary> {
        self.symbols(offset, limit)
            .iter()
            .filter_map(|symbol| self.symbol_summary(symbol).ok())
            .collect()
    }

    pub fn symbol_at(&self, index: usize) -> Option<SymbolHash> {
        self.registry.symbol_at(index)
    }

    pub fn symbol_count(&self) -> usize {
        self.registry.len()
    }

    /// Live symbols in registration order.
    pub fn symbols(&self, offset: usize, limit: usize) -> Vec<SymbolHash> {
        page(self.registry.iter().map(|entry| entry.symbol), offset, limit)
    }

    pub fn symbols_in_band(&self, band: HeatBand) -> Vec<SymbolHash> {
        self.registry
            .iter()
            .map(|entry| entry.symbol)
            .filter(|symbol| self.store.get(symbol).is_ok_and(|series| series.band == band))
            .collect()
    }

    /// Symbols ordered by current volatility, highest first. Ties keep
    /// registration order. `limit == 0` returns all.
    pub fn symbols_by_volatility(&self, limit: usize) -> Vec<(SymbolHash, u128)> {
        let mut ranked: Vec<(SymbolHash, u128)> = self
            .registry
            .iter()
            .filter_map(|entry| {
                let series = self.store.get(&entry.symbol).ok()?;
                Some((entry.symbol, series.volatility.value_e8))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        page(ranked.into_iter(), 0, limit)
    }

    pub fn band_distribution(&self) -> BandDistribution {
        let mut distribution = BandDistribution::default();
        for entry in self.registry.iter() {
            if let Ok(series) = self.store.get(&entry.symbol) {
                distribution.record(series.band);
            }
        }
        distribution
    }

    pub fn aggregate_stats(&self) -> AggregateStats {
        let ranked = self.symbols_by_volatility(0);
        let volatility_sum: u128 = ranked.iter().fold(0u128, |sum, (_, v)| sum.saturating_add(*v));
        let average_volatility_e8 = if ranked.is_empty() {
            0
        } else {
            volatility_sum / ranked.len() as u128
        };

        AggregateStats {
            symbol_count: self.registry.len(),
            halted_count: self.registry.iter().filter(|entry| entry.config.halted).count(),
            total_observations: self.store.total_observations(),
            total_reports: self.total_reports,
            bands: self.band_distribution(),
            average_volatility_e8,
            hottest: ranked.first().copied(),
            paused: self.access.paused,
            treasury_balance: self.treasury.balance,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn roles(&self) -> &AccessControl {
        &self.access
    }

    pub fn is_paused(&self) -> bool {
        self.access.paused
    }

    pub fn report_fee(&self) -> U256 {
        self.treasury.report_fee
    }

    pub fn treasury_balance(&self) -> U256 {
        self.treasury.balance
    }

    pub fn max_history_length(&self) -> usize {
        self.store.max_history_length()
    }
}
