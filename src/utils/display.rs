//! Display and printing utilities

use tracing::{info, warn};
use crate::{
    types::{AggregateStats, HeatBand, ReportOutcome, SymbolSummary},
    utils::e8_to_decimal,
};

fn band_marker(band: HeatBand) -> &'static str {
    match band {
        HeatBand::Cold => "🧊",
        HeatBand::Mild => "🌤️ ",
        HeatBand::Warm => "☀️ ",
        HeatBand::Hot => "🔥",
        HeatBand::Critical => "🚨",
    }
}

pub fn print_symbol_summary(ticker: &str, summary: &SymbolSummary) {
    info!("{} {} [{}]", band_marker(summary.band), ticker, summary.band);
    match summary.last_price {
        Some(price) => info!("   Last Price: ${:.4}", e8_to_decimal(price)),
        None => info!("   Last Price: -"),
    }
    info!("   Volatility: {:.4}% over {} blocks", e8_to_decimal(summary.volatility_e8), summary.window_length);
    info!("   Observations: {} ({} band records)", summary.observations, summary.band_records);
    if summary.halted {
        warn!("   ⛔ Halted");
    }
}

pub fn print_aggregate_stats(stats: &AggregateStats) {
    info!("\n📊 Tracker Statistics");
    info!("   Symbols: {} ({} halted)", stats.symbol_count, stats.halted_count);
    info!("   Reports accepted: {}", stats.total_reports);
    info!("   Observations held: {}", stats.total_observations);
    info!(
        "   Bands: cold={} mild={} warm={} hot={} critical={}",
        stats.bands.cold, stats.bands.mild, stats.bands.warm, stats.bands.hot, stats.bands.critical
    );
    info!("   Average volatility: {:.4}%", e8_to_decimal(stats.average_volatility_e8));
    if let Some((symbol, volatility)) = stats.hottest {
        info!("   Hottest: {} at {:.4}%", symbol, e8_to_decimal(volatility));
    }
    info!("   Treasury balance: {} wei", stats.treasury_balance);
    if stats.paused {
        warn!("   ⏸️  Platform paused");
    }
    info!("");
}

pub fn print_report_outcome(ticker: &str, outcome: &ReportOutcome) {
    let volatility = e8_to_decimal(outcome.volatility.value_e8);
    if outcome.band > outcome.previous_band && outcome.band.is_elevated() {
        warn!(
            "{} {} {} -> {} at block {} (volatility {:.4}%, price ${:.4})",
            band_marker(outcome.band),
            ticker,
            outcome.previous_band,
            outcome.band,
            outcome.block,
            volatility,
            e8_to_decimal(outcome.price)
        );
    } else {
        info!(
            "{} {} {} -> {} at block {} (volatility {:.4}%)",
            band_marker(outcome.band),
            ticker,
            outcome.previous_band,
            outcome.band,
            outcome.block,
            volatility
        );
    }
}
