//! Time-series record types

use serde::Serialize;
use super::HeatBand;

/// One accepted price report. `price` is fixed-point E8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceObservation {
    pub price: u128,
    pub block: u64,
}

/// One entry of the band-history log, written for every accepted report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandRecord {
    pub band: HeatBand,
    pub block: u64,
}
