//! Mean absolute percent change over a trailing block window
//!
//! A cheap volatility proxy: the average of `|p[i] - p[i-1]| / p[i-1]` over
//! adjacent observations whose older element is at most `window` blocks
//! behind the newest observation. Expressed as a percentage in E8 fixed point,
//! so a doubling reads `100_00000000`.

use std::collections::VecDeque;
use alloy::primitives::U256;
use crate::{
    config::E8,
    types::{PriceObservation, VolatilityReading},
};

const PERCENT_E8: u128 = 100 * E8;

/// Percent change from `older` to `newer`, E8 fixed point. `None` when `older` is zero.
///
/// Computed in 256 bits so large prices keep full precision; only the
/// quotient saturates at `u128::MAX`.
pub fn percent_change_e8(older: u128, newer: u128) -> Option<u128> {
    if older == 0 {
        return None;
    }
    let change = U256::from(newer.abs_diff(older)) * U256::from(PERCENT_E8) / U256::from(older);
    Some(u128::try_from(change).unwrap_or(u128::MAX))
}

/// Walk adjacent pairs newest-first and average the ones inside the window.
///
/// The walk stops at the first pair whose older element is strictly more than
/// `window` blocks behind the newest observation; a gap equal to the window is
/// still counted. Returns a zero reading with fewer than two observations or
/// when no pair qualifies.
pub fn calculate_volatility(series: &VecDeque<PriceObservation>, window: u64) -> VolatilityReading {
    let mut reading = VolatilityReading {
        window,
        ..VolatilityReading::default()
    };

    let Some(newest) = series.back() else {
        return reading;
    };
    if series.len() < 2 {
        return reading;
    }

    let mut sum: u128 = 0;
    let mut pairs = 0usize;
    let mut newer = newest;

    for older in series.iter().rev().skip(1) {
        if newest.block.saturating_sub(older.block) > window {
            break;
        }
        if let Some(change) = percent_change_e8(older.price, newer.price) {
            sum = sum.saturating_add(change);
            pairs += 1;
        }
        newer = older;
    }

    if pairs > 0 {
        reading.value_e8 = sum / pairs as u128;
        reading.pairs_used = pairs;
    }
    reading
}
