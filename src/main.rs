//! Heat-band tracker - demo entry point
//!
//! Registers the configured demo tickers and feeds them simulated prices until
//! Ctrl+C, logging band crossings and periodic summaries.

use heat_band_tracker::*;
use alloy::primitives::Address;
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{error, info};
use heat_band_tracker::{
    events::{FanoutSink, TracingEventSink},
    simulation::{demo_start_price, RandomWalk, SimulatedReporter},
    storage::JsonlEventSink,
    utils::e8_to_decimal,
};

/// Demo identity. Holds every role, so it can both report and trim.
const DEMO_OPERATOR: Address = Address::new([0x11; 20]);

const SUMMARY_EVERY_TICKS: u64 = 20;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    let config = CONFIG.clone();
    utils::setup_output_directories(&config.event_log_dir)?;

    info!("🌡️  Heat-Band Tracker v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   Max History Length: {}", config.max_history_length);
    info!("   Trim Headroom: {} bps", config.trim_headroom_bps);
    info!("   Default Cooldown: {} blocks", config.default_cooldown_blocks);
    info!("   Report Fee: {} wei", config.report_fee_wei);
    let [cold, mild, warm, hot] = config.threshold_bps;
    info!(
        "   Bands (max %): cold {} / mild {} / warm {} / hot {}",
        e8_to_decimal(cold as u128 * bands::E8_PER_BPS),
        e8_to_decimal(mild as u128 * bands::E8_PER_BPS),
        e8_to_decimal(warm as u128 * bands::E8_PER_BPS),
        e8_to_decimal(hot as u128 * bands::E8_PER_BPS)
    );
    info!("   Demo Symbols: {}", config.demo_symbols.join(", "));
    info!("   Window: {} blocks, Tick: {}ms", config.demo_window_blocks, config.demo_tick_ms);
    info!("   Event Log: {}", config.event_log_dir);

    let sink = FanoutSink::new()
        .with(TracingEventSink)
        .with(JsonlEventSink::new(&config.event_log_dir)?);
    let tracker = share(HeatTracker::new(DEMO_OPERATOR, &config, sink)?);

    let mut reporter = SimulatedReporter::new(tracker.clone(), DEMO_OPERATOR);
    for ticker in &config.demo_symbols {
        reporter.add_feed(ticker, RandomWalk::new(demo_start_price(ticker)));
    }
    let registered = reporter.register_feeds(config.demo_window_blocks).await?;
    info!("✅ Registered {} symbols", registered);

    let start_time = Instant::now();
    info!("\n🚀 Starting simulated reporter (Ctrl+C to stop)...\n");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("\n📛 Received shutdown signal (Ctrl+C)...");
    };

    if let Err(e) = reporter
        .run_until(Duration::from_millis(config.demo_tick_ms), SUMMARY_EVERY_TICKS, shutdown)
        .await
    {
        error!("Reporter stopped: {}", e);
    }

    // Print final statistics
    let stats = &reporter.stats;
    info!("\n🏁 Session finished after {}s", start_time.elapsed().as_secs());
    info!("   Ticks: {}, applied: {}, skipped: {}", stats.ticks, stats.applied, stats.skipped);
    info!("   Band crossings: {}, trims: {}", stats.band_crossings, stats.trims);
    reporter.print_summaries().await;

    Ok(())
}
