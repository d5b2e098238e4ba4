//! Tracker configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;
use alloy::primitives::U256;
use tracing::warn;
use super::{
    BPS_DENOMINATOR, MAX_COOLDOWN_BLOCKS, MAX_HISTORY_LENGTH, MAX_WINDOW_LENGTH,
    MIN_HISTORY_LENGTH, MIN_WINDOW_LENGTH,
};

// Defaults
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 500;
pub const DEFAULT_TRIM_HEADROOM_BPS: u32 = 1_000; // free 10% of the cap on trim
pub const DEFAULT_THRESHOLDS_PCT: [Decimal; 4] = [dec!(5), dec!(15), dec!(30), dec!(70)];
pub const MAX_REPORT_FEE_WEI: u128 = 1_000_000_000_000_000_000; // 1 ETH

// Demo reporter defaults
pub const DEFAULT_DEMO_WINDOW_BLOCKS: u64 = 100;
pub const DEFAULT_DEMO_TICK_MS: u64 = 500;
pub const MIN_DEMO_TICK_MS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    // History retention
    pub max_history_length: usize,
    pub trim_headroom_bps: u32,
    // Report processing
    pub default_cooldown_blocks: u64,
    pub report_fee_wei: U256,
    pub max_report_fee_wei: U256,
    // Band thresholds, basis points of percent
    pub threshold_bps: [u32; 4],
    // Demo reporter
    pub demo_symbols: Vec<String>,
    pub demo_window_blocks: u64,
    pub demo_tick_ms: u64,
    // Output
    pub event_log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
            trim_headroom_bps: DEFAULT_TRIM_HEADROOM_BPS,
            default_cooldown_blocks: 0,
            report_fee_wei: U256::ZERO,
            max_report_fee_wei: U256::from(MAX_REPORT_FEE_WEI),
            threshold_bps: default_threshold_bps(),
            demo_symbols: vec!["BTC".to_string(), "ETH".to_string(), "SOL".to_string()],
            demo_window_blocks: DEFAULT_DEMO_WINDOW_BLOCKS,
            demo_tick_ms: DEFAULT_DEMO_TICK_MS,
            event_log_dir: "output/events".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let defaults = Self::default();

        Self {
            max_history_length: env::var("MAX_HISTORY_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_history_length)
                .max(MIN_HISTORY_LENGTH)
                .min(MAX_HISTORY_LENGTH),
            trim_headroom_bps: env::var("TRIM_HEADROOM_BPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.trim_headroom_bps)
                .max(1)
                .min(BPS_DENOMINATOR),
            default_cooldown_blocks: env::var("DEFAULT_COOLDOWN_BLOCKS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_cooldown_blocks)
                .min(MAX_COOLDOWN_BLOCKS),
            report_fee_wei: env::var("REPORT_FEE_WEI")
                .ok()
                .and_then(|s| U256::from_str(&s).ok())
                .unwrap_or(defaults.report_fee_wei)
                .min(defaults.max_report_fee_wei),
            max_report_fee_wei: defaults.max_report_fee_wei,
            threshold_bps: load_threshold_bps(),
            demo_symbols: env::var("DEMO_SYMBOLS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|t| t.trim().to_uppercase())
                        .filter(|t| !t.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|symbols| !symbols.is_empty())
                .unwrap_or(defaults.demo_symbols),
            demo_window_blocks: env::var("DEMO_WINDOW_BLOCKS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.demo_window_blocks)
                .max(MIN_WINDOW_LENGTH)
                .min(MAX_WINDOW_LENGTH),
            demo_tick_ms: env::var("DEMO_TICK_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.demo_tick_ms)
                .max(MIN_DEMO_TICK_MS),
            event_log_dir: env::var("EVENT_LOG_DIR")
                .unwrap_or(defaults.event_log_dir),
        }
    }
}

/// Percent value (e.g. `12.5`) to basis points, rejecting anything outside (0, 100].
pub fn percent_to_bps(pct: Decimal) -> Option<u32> {
    if pct <= dec!(0) || pct > dec!(100) {
        return None;
    }
    (pct * dec!(100))
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

fn default_threshold_bps() -> [u32; 4] {
    DEFAULT_THRESHOLDS_PCT.map(|pct| percent_to_bps(pct).unwrap_or(BPS_DENOMINATOR))
}

fn load_threshold_bps() -> [u32; 4] {
    let defaults = default_threshold_bps();
    let names = ["COLD_MAX_PCT", "MILD_MAX_PCT", "WARM_MAX_PCT", "HOT_MAX_PCT"];

    let mut loaded = defaults;
    for (slot, name) in loaded.iter_mut().zip(names) {
        if let Some(bps) = env::var(name)
            .ok()
            .and_then(|s| Decimal::from_str(&s).ok())
            .and_then(percent_to_bps)
        {
            *slot = bps;
        }
    }

    if loaded.windows(2).all(|w| w[0] < w[1]) && loaded[3] <= BPS_DENOMINATOR {
        loaded
    } else {
        warn!("Configured band thresholds {:?} are not strictly increasing, using defaults", loaded);
        defaults
    }
}
