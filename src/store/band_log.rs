//! Dense band-history log

use std::collections::VecDeque;
use crate::types::{BandRecord, HeatBand};

/// One record per accepted report, repeated bands included.
#[derive(Debug, Clone, Default)]
pub struct BandLog {
    records: VecDeque<BandRecord>,
}

impl BandLog {
    pub fn push(&mut self, band: HeatBand, block: u64) {
        self.records.push_back(BandRecord { band, block });
    }

    pub fn pop_back(&mut self) -> Option<BandRecord> {
        self.records.pop_back()
    }

    pub fn evict_front(&mut self, count: usize) {
        let count = count.min(self.records.len());
        self.records.drain(..count);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&BandRecord> {
        self.records.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &BandRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// Records where the band differs from the record before it.
    pub fn transitions(&self) -> Vec<BandRecord> {
        let mut previous: Option<HeatBand> = None;
        self.records
            .iter()
            .filter(|record| {
                let changed = previous != Some(record.band);
                previous = Some(record.band);
                changed
            })
            .copied()
            .collect()
    }

    /// Blocks spent in `band` according to the retained log, counting the
    /// newest record as lasting until `now`.
    pub fn time_in_band(&self, band: HeatBand, now: u64) -> u64 {
        let mut total = 0u64;
        let mut records = self.records.iter().peekable();
        while let Some(record) = records.next() {
            let until = records.peek().map(|next| next.block).unwrap_or(now);
            if record.band == band {
                total = total.saturating_add(until.saturating_sub(record.block));
            }
        }
        total
    }
}
