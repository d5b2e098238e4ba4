//! Simulated reporter: feeds random-walk prices into a shared tracker

use std::{future::Future, sync::Arc, time::Duration};
use alloy::primitives::{Address, U256};
use tokio::time;
use tracing::{debug, error, info, warn, Level};
use crate::{
    errors::{ErrorRecovery, RecoveryAction, TrackerError, TrackerResult},
    events::EventSink,
    tracker::{HeatTracker, SharedTracker},
    treasury::LedgerTransfer,
    types::{symbol_hash, CallContext, SymbolHash},
    utils::{print_aggregate_stats, print_report_outcome, print_symbol_summary},
};
use super::RandomWalk;

pub struct Feed {
    pub ticker: String,
    pub symbol: SymbolHash,
    pub walk: RandomWalk,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporterStats {
    pub ticks: u64,
    pub applied: u64,
    pub skipped: u64,
    pub band_crossings: u64,
    pub trims: u64,
}

/// Reports one price per feed per tick as a single batch, one block per tick.
///
/// `identity` must hold the updater role. Full histories are trimmed in
/// place, which additionally needs the owner role.
pub struct SimulatedReporter<S: EventSink> {
    tracker: SharedTracker<S>,
    identity: Address,
    feeds: Vec<Feed>,
    block: u64,
    recovery: ErrorRecovery,
    ledger: LedgerTransfer,
    pub stats: ReporterStats,
}

impl<S: EventSink> SimulatedReporter<S> {
    pub fn new(tracker: SharedTracker<S>, identity: Address) -> Self {
        Self {
            tracker,
            identity,
            feeds: Vec::new(),
            block: 0,
            recovery: ErrorRecovery::new(),
            ledger: LedgerTransfer::new(),
            stats: ReporterStats::default(),
        }
    }

    pub fn add_feed(&mut self, ticker: &str, walk: RandomWalk) {
        self.feeds.push(Feed {
            ticker: ticker.to_string(),
            symbol: symbol_hash(ticker),
            walk,
        });
    }

    pub fn feeds(&self) -> &[Feed] {
        &self.feeds
    }

    pub fn block(&self) -> u64 {
        self.block
    }

    /// Fees forwarded to each recipient so far.
    pub fn ledger(&self) -> &LedgerTransfer {
        &self.ledger
    }

    /// Register every feed that is not live yet.
    pub async fn register_feeds(&mut self, window_length: u64) -> TrackerResult<usize> {
        let mut tracker = self.tracker.write().await;
        let mut registered = 0;
        for feed in &self.feeds {
            match tracker.register(CallContext::new(self.identity, self.block), feed.symbol, window_length) {
                Ok(()) => registered += 1,
                Err(TrackerError::AlreadyRegistered(_)) => {
                    debug!(ticker = %feed.ticker, "Feed already registered");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(registered)
    }

    /// Advance one block and report a fresh price for every feed.
    ///
    /// Per-item failures go through `ErrorRecovery`; only a shutdown action
    /// surfaces as an error.
    pub async fn tick(&mut self) -> TrackerResult<()> {
        self.block += 1;
        self.stats.ticks += 1;
        if self.feeds.is_empty() {
            return Ok(());
        }

        let symbols: Vec<SymbolHash> = self.feeds.iter().map(|feed| feed.symbol).collect();
        let prices: Vec<u128> = self.feeds.iter_mut().map(|feed| feed.walk.next_price()).collect();

        let shared = Arc::clone(&self.tracker);
        let mut tracker = shared.write().await;
        let fee = tracker.report_fee().saturating_mul(U256::from(symbols.len()));
        let ctx = CallContext::new(self.identity, self.block).with_value(fee);

        match tracker.batch_report_prices(ctx, &symbols, &prices, &mut self.ledger) {
            Ok(outcome) => {
                for applied in &outcome.applied {
                    self.stats.applied += 1;
                    if applied.band_crossed() {
                        self.stats.band_crossings += 1;
                        print_report_outcome(self.ticker_of(&applied.symbol), applied);
                    }
                }
                if outcome.skipped.is_empty() {
                    self.recovery.reset("history_full");
                }
                for skipped in &outcome.skipped {
                    self.stats.skipped += 1;
                    self.recover(&mut tracker, Some(skipped.symbol), &skipped.reason)?;
                }
            }
            Err(e) => {
                self.stats.skipped += symbols.len() as u64;
                self.recover(&mut tracker, None, &e)?;
            }
        }
        Ok(())
    }

    /// Tick on a fixed interval until `shutdown` resolves, logging summaries
    /// every `summary_every` ticks (0 disables them).
    pub async fn run_until(
        &mut self,
        tick: Duration,
        summary_every: u64,
        shutdown: impl Future<Output = ()>,
    ) -> TrackerResult<()> {
        let mut interval = time::interval(tick);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await?;
                    if summary_every > 0 && self.stats.ticks % summary_every == 0 {
                        self.print_summaries().await;
                    }
                }
                _ = &mut shutdown => {
                    info!(ticks = self.stats.ticks, "Shutdown signal received, stopping reporter");
                    break;
                }
            }
        }
        Ok(())
    }

    pub async fn print_summaries(&self) {
        let tracker = self.tracker.read().await;
        for feed in &self.feeds {
            if let Ok(summary) = tracker.symbol_summary(&feed.symbol) {
                print_symbol_summary(&feed.ticker, &summary);
            }
        }
        print_aggregate_stats(&tracker.aggregate_stats());
    }

    fn ticker_of(&self, symbol: &SymbolHash) -> &str {
        self.feeds
            .iter()
            .find(|feed| feed.symbol == *symbol)
            .map(|feed| feed.ticker.as_str())
            .unwrap_or("?")
    }

    fn recover(
        &mut self,
        tracker: &mut HeatTracker<S>,
        symbol: Option<SymbolHash>,
        error: &TrackerError,
    ) -> TrackerResult<()> {
        let ticker = symbol.map(|s| self.ticker_of(&s).to_string()).unwrap_or_else(|| "batch".to_string());

        match self.recovery.handle_error(error) {
            RecoveryAction::RetryAfter { block } => {
                debug!(%ticker, next_allowed = block, "Report deferred by cooldown");
            }
            RecoveryAction::RetryAfterTrim => {
                let Some(symbol) = symbol else {
                    return Ok(());
                };
                match tracker.trim(CallContext::new(self.identity, self.block), symbol) {
                    Ok(evicted) => {
                        self.stats.trims += 1;
                        info!(%ticker, evicted, "Trimmed full history");
                    }
                    Err(e) => warn!(%ticker, "Could not trim full history: {}", e),
                }
            }
            RecoveryAction::Skip { log_level } => {
                if log_level == Level::WARN || log_level == Level::ERROR {
                    warn!(%ticker, "Report skipped: {}", error);
                } else {
                    debug!(%ticker, "Report skipped: {}", error);
                }
            }
            RecoveryAction::Escalate => {
                error!(%ticker, kind = ?error.kind(), "Report failed: {}", error);
            }
            RecoveryAction::Shutdown { reason } => {
                error!(%ticker, %reason, "Stopping reporter: {}", error);
                return Err(error.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::E8,
        tracker::{share, test_support::*},
    };

    fn reporter(identity: Address) -> SimulatedReporter<crate::events::MemoryEventSink> {
        let mut reporter = SimulatedReporter::new(share(tracker()), identity);
        reporter.add_feed("BTC", RandomWalk::seeded(100 * E8, 1));
        reporter.add_feed("ETH", RandomWalk::seeded(100 * E8, 2));
        reporter
    }

    #[tokio::test]
    async fn full_histories_are_trimmed_and_reporting_continues() {
        let mut reporter = reporter(OWNER);
        assert_eq!(reporter.register_feeds(100).await.unwrap(), 2);
        assert_eq!(reporter.register_feeds(100).await.unwrap(), 0);

        for _ in 0..60 {
            reporter.tick().await.unwrap();
        }

        let stats = reporter.stats.clone();
        assert_eq!(stats.ticks, 60);
        assert_eq!(stats.applied + stats.skipped, 120);
        assert!(stats.trims >= 2);
        assert_eq!(stats.skipped, stats.trims);

        let tracker = reporter.tracker.read().await;
        for feed in reporter.feeds() {
            let length = tracker.history(&feed.symbol, 0, 0).unwrap().len();
            assert!(length <= tracker.max_history_length());
        }
        assert_eq!(tracker.aggregate_stats().total_reports, stats.applied);
    }

    #[tokio::test]
    async fn lost_role_stops_the_reporter() {
        let mut reporter = reporter(OWNER);
        reporter.register_feeds(100).await.unwrap();
        reporter.identity = STRANGER;
        let result = reporter.tick().await;
        assert!(matches!(result, Err(TrackerError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn paused_platform_skips_without_stopping() {
        let mut reporter = reporter(OWNER);
        reporter.register_feeds(100).await.unwrap();
        {
            let mut tracker = reporter.tracker.write().await;
            tracker.set_platform_paused(ctx(GUARDIAN, 0), true).unwrap();
        }
        reporter.tick().await.unwrap();
        assert_eq!(reporter.stats.applied, 0);
        assert_eq!(reporter.stats.skipped, 2);
    }

    #[tokio::test]
    async fn run_until_stops_on_shutdown() {
        let mut reporter = reporter(OWNER);
        reporter.register_feeds(100).await.unwrap();
        reporter
            .run_until(
                Duration::from_millis(5),
                2,
                tokio::time::sleep(Duration::from_millis(40)),
            )
            .await
            .unwrap();
        assert!(reporter.stats.ticks > 0);
        assert_eq!(reporter.block(), reporter.stats.ticks);
    }
}
