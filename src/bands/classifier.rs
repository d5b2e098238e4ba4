//! Volatility to heat band mapping

use crate::types::HeatBand;
use super::Thresholds;

/// First band whose upper bound is `>=` the volatility, else critical.
pub fn classify(volatility_e8: u128, thresholds: &Thresholds) -> HeatBand {
    let [cold, mild, warm, hot] = thresholds.bounds_e8();
    match volatility_e8 {
        v if v <= cold => HeatBand::Cold,
        v if v <= mild => HeatBand::Mild,
        v if v <= warm => HeatBand::Warm,
        v if v <= hot => HeatBand::Hot,
        _ => HeatBand::Critical,
    }
}
