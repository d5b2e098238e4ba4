//! Single and batch price report processing

use alloy::primitives::U256;
use tracing::{debug, warn};
use crate::{
    access::Role,
    bands::classify,
    config::MAX_BATCH_SIZE,
    errors::{TrackerError, TrackerResult},
    events::{EventSink, TrackerEvent},
    store::SeriesCheckpoint,
    treasury::{Treasury, ValueTransfer},
    types::{BatchOutcome, CallContext, ReportOutcome, SkippedItem, SymbolHash},
    volatility::calculate_volatility,
};
use super::HeatTracker;

/// Everything a report call may change, captured before the first append.
struct ReportJournal {
    treasury: Treasury,
    total_reports: u64,
    touched: Vec<(SymbolHash, SeriesCheckpoint, Option<u64>)>,
}

impl<S: EventSink> HeatTracker<S> {
    /// Accept one price for `symbol` at `ctx.block`.
    ///
    /// The fee is forwarded to the owner after the report is applied. If that
    /// transfer fails the report is rolled back completely and nothing is
    /// published.
    pub fn report_price(
        &mut self,
        ctx: CallContext,
        symbol: SymbolHash,
        price: u128,
        transfer: &mut dyn ValueTransfer,
    ) -> TrackerResult<ReportOutcome> {
        self.guarded(|tracker| {
            tracker.access.authorize(ctx.caller, Role::Updater)?;
            tracker.access.ensure_not_paused()?;
            let fee = tracker.treasury.ensure_paid(1, ctx.value)?;

            let mut journal = tracker.open_journal();
            tracker.track(&mut journal, symbol);

            let mut staged = Vec::new();
            let outcome = tracker.apply_report(ctx, symbol, price, fee, &mut staged)?;
            tracker.settle(ctx, fee, transfer, journal)?;
            tracker.publish(ctx.block, staged);
            Ok(outcome)
        })
    }

    /// Best-effort batch: items failing a per-item check are skipped, while
    /// length, size and fee problems reject the whole batch.
    pub fn batch_report_prices(
        &mut self,
        ctx: CallContext,
        symbols: &[SymbolHash],
        prices: &[u128],
        transfer: &mut dyn ValueTransfer,
    ) -> TrackerResult<BatchOutcome> {
        self.guarded(|tracker| {
            tracker.access.authorize(ctx.caller, Role::Updater)?;
            tracker.access.ensure_not_paused()?;
            if symbols.len() != prices.len() {
                return Err(TrackerError::LengthMismatch {
                    symbols: symbols.len(),
                    prices: prices.len(),
                });
            }
            if symbols.is_empty() {
                return Err(TrackerError::EmptyBatch);
            }
            if symbols.len() > MAX_BATCH_SIZE {
                return Err(TrackerError::BatchTooLarge {
                    size: symbols.len(),
                    max: MAX_BATCH_SIZE,
                });
            }
            let fee = tracker.treasury.ensure_paid(symbols.len(), ctx.value)?;
            let item_fee = tracker.treasury.report_fee;

            let mut journal = tracker.open_journal();
            let mut staged = Vec::new();
            let mut outcome = BatchOutcome::default();

            for (index, (&symbol, &price)) in symbols.iter().zip(prices).enumerate() {
                tracker.track(&mut journal, symbol);
                match tracker.apply_report(ctx, symbol, price, item_fee, &mut staged) {
                    Ok(report) => outcome.applied.push(report),
                    Err(reason) => {
                        debug!(index, %symbol, %reason, "Skipped batch item");
                        outcome.skipped.push(SkippedItem { index, symbol, reason });
                    }
                }
            }

            tracker.settle(ctx, fee, transfer, journal)?;
            tracker.publish(ctx.block, staged);
            Ok(outcome)
        })
    }

    fn open_journal(&self) -> ReportJournal {
        ReportJournal {
            treasury: self.treasury.clone(),
            total_reports: self.total_reports,
            touched: Vec::new(),
        }
    }

    fn track(&self, journal: &mut ReportJournal, symbol: SymbolHash) {
        if journal.touched.iter().any(|(seen, _, _)| *seen == symbol) {
            return;
        }
        if let (Ok(config), Ok(series)) = (self.registry.get(&symbol), self.store.get(&symbol)) {
            journal.touched.push((symbol, series.checkpoint(), config.last_accepted));
        }
    }

    fn rollback(&mut self, journal: ReportJournal) {
        self.treasury = journal.treasury;
        self.total_reports = journal.total_reports;
        for (symbol, checkpoint, last_accepted) in journal.touched {
            if let Ok(series) = self.store.get_mut(&symbol) {
                series.restore(checkpoint);
            }
            if let Ok(config) = self.registry.get_mut(&symbol) {
                config.last_accepted = last_accepted;
            }
        }
    }

    /// Append, recompute, reclassify and log one observation. Fails without
    /// touching any state when an admission check rejects the report.
    fn apply_report(
        &mut self,
        ctx: CallContext,
        symbol: SymbolHash,
        price: u128,
        fee_paid: U256,
        staged: &mut Vec<TrackerEvent>,
    ) -> TrackerResult<ReportOutcome> {
        let config = self.registry.get_mut(&symbol)?;
        let window = config.window_length;
        let series = self.store.append(&symbol, config, price, ctx.block)?;

        let previous_band = series.band;
        let volatility = calculate_volatility(&series.observations, window);
        let band = classify(volatility.value_e8, &self.thresholds);

        series.volatility = volatility;
        series.band = band;
        series.band_log.push(band, ctx.block);
        let observations = series.len();
        self.total_reports += 1;

        debug!(
            %symbol,
            price,
            block = ctx.block,
            volatility_e8 = volatility.value_e8,
            pairs = volatility.pairs_used,
            %band,
            "Accepted price report"
        );

        staged.push(TrackerEvent::SnapshotAppended {
            symbol,
            price,
            volatility_e8: volatility.value_e8,
            observations,
        });
        staged.push(TrackerEvent::HeatLevelChanged {
            symbol,
            previous: previous_band,
            band,
            volatility_e8: volatility.value_e8,
        });
        if band != previous_band {
            staged.push(TrackerEvent::BandCrossed {
                symbol,
                from: previous_band,
                to: band,
            });
        }
        if band.is_elevated() {
            staged.push(TrackerEvent::VolatilitySpike {
                symbol,
                band,
                volatility_e8: volatility.value_e8,
            });
        }
        staged.push(TrackerEvent::PriceReported {
            symbol,
            reporter: ctx.caller,
            price,
            fee_paid,
        });

        Ok(ReportOutcome {
            symbol,
            price,
            block: ctx.block,
            previous_band,
            band,
            volatility,
            observations,
        })
    }

    /// Credit the payment and forward `fee` to the owner, undoing the whole
    /// call if the transfer fails.
    fn settle(
        &mut self,
        ctx: CallContext,
        fee: U256,
        transfer: &mut dyn ValueTransfer,
        journal: ReportJournal,
    ) -> TrackerResult<()> {
        self.treasury.balance = self.treasury.balance.saturating_add(ctx.value);
        if fee.is_zero() {
            return Ok(());
        }

        let recipient = self.access.owner;
        self.treasury.balance = self.treasury.balance.saturating_sub(fee);
        self.treasury.fees_forwarded = self.treasury.fees_forwarded.saturating_add(fee);

        if let Err(failure) = transfer.transfer(recipient, fee) {
            warn!(%recipient, %fee, "Fee transfer failed, rolling back report: {}", failure);
            self.rollback(journal);
            return Err(TrackerError::TransferFailed {
                to: recipient,
                amount: fee,
                reason: failure.0,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::E8,
        events::MemoryEventSink,
        tracker::test_support::*,
        treasury::LedgerTransfer,
        types::{symbol_hash, HeatBand, PriceObservation},
    };

    fn registered(window: u64) -> (crate::tracker::HeatTracker, SymbolHash) {
        let mut tracker = tracker();
        let symbol = symbol_hash("BTC");
        tracker.register(ctx(OWNER, 0), symbol, window).unwrap();
        tracker.events_mut().clear();
        (tracker, symbol)
    }

    fn report(
        tracker: &mut crate::tracker::HeatTracker,
        symbol: SymbolHash,
        price: u128,
        block: u64,
    ) -> TrackerResult<ReportOutcome> {
        tracker.report_price(ctx(UPDATER, block), symbol, price, &mut LedgerTransfer::new())
    }

    #[test]
    fn doubling_price_crosses_from_cold_to_critical() {
        let (mut tracker, symbol) = registered(100);

        let first = report(&mut tracker, symbol, 100 * E8, 0).unwrap();
        assert_eq!(first.volatility.value_e8, 0);
        assert_eq!(first.band, HeatBand::Cold);
        assert!(!first.band_crossed());

        let second = report(&mut tracker, symbol, 200 * E8, 50).unwrap();
        assert_eq!(second.volatility.value_e8, 100 * E8);
        assert_eq!(second.band, HeatBand::Critical);
        assert!(second.band_crossed());

        let sink: &MemoryEventSink = tracker.events();
        assert!(sink.events().any(|e| matches!(
            e,
            TrackerEvent::BandCrossed { from: HeatBand::Cold, to: HeatBand::Critical, .. }
        )));
        assert_eq!(sink.count("band_crossed"), 1);
        assert_eq!(sink.count("volatility_spike"), 1);
        assert_eq!(sink.count("heat_level_changed"), 2);
        assert_eq!(sink.count("price_reported"), 2);
        assert_eq!(sink.count("snapshot_appended"), 2);
    }

    #[test]
    fn very_large_prices_still_classify_correctly() {
        let (mut tracker, symbol) = registered(100);
        let base = 10u128.pow(30);
        report(&mut tracker, symbol, base, 0).unwrap();
        let doubled = report(&mut tracker, symbol, 2 * base, 1).unwrap();
        assert_eq!(doubled.volatility.value_e8, 100 * E8);
        assert_eq!(doubled.band, HeatBand::Critical);
    }

    #[test]
    fn only_pairs_inside_window_count() {
        let (mut tracker, symbol) = registered(15);
        report(&mut tracker, symbol, 100 * E8, 0).unwrap();
        report(&mut tracker, symbol, 101 * E8, 10).unwrap();
        let last = report(&mut tracker, symbol, 100 * E8, 20).unwrap();

        assert_eq!(last.volatility.pairs_used, 1);
        assert_eq!(last.volatility.value_e8, 99_009_900);
        assert_eq!(last.band, HeatBand::Cold);
    }

    #[test]
    fn band_history_records_every_report() {
        let (mut tracker, symbol) = registered(100);
        for block in 0..4 {
            report(&mut tracker, symbol, 100 * E8, block).unwrap();
        }
        let log = tracker.band_history(&symbol, 0, 0).unwrap();
        assert_eq!(log.len(), 4);
        assert!(log.iter().all(|record| record.band == HeatBand::Cold));
        assert_eq!(tracker.events().count("band_crossed"), 0);
        assert_eq!(tracker.events().count("heat_level_changed"), 4);
    }

    #[test]
    fn cooldown_boundary() {
        let (mut tracker, symbol) = registered(100);
        tracker.set_cooldown(ctx(OWNER, 0), symbol, 10).unwrap();

        report(&mut tracker, symbol, 100 * E8, 5).unwrap();
        assert_eq!(
            report(&mut tracker, symbol, 100 * E8, 14),
            Err(TrackerError::CooldownActive { block: 14, next_allowed: 15 })
        );
        assert!(report(&mut tracker, symbol, 100 * E8, 15).is_ok());
    }

    #[test]
    fn rejects_wrong_role_pause_and_zero_price() {
        let (mut tracker, symbol) = registered(100);
        let mut ledger = LedgerTransfer::new();

        assert!(matches!(
            tracker.report_price(ctx(STRANGER, 1), symbol, E8, &mut ledger),
            Err(TrackerError::Unauthorized { .. })
        ));
        assert!(tracker.report_price(ctx(OWNER, 1), symbol, E8, &mut ledger).is_ok());
        assert_eq!(report(&mut tracker, symbol, 0, 2), Err(TrackerError::ZeroPrice));

        tracker.set_platform_paused(ctx(GUARDIAN, 3), true).unwrap();
        assert_eq!(report(&mut tracker, symbol, E8, 3), Err(TrackerError::PlatformPaused));
        assert_eq!(tracker.history(&symbol, 0, 0).unwrap().len(), 1);
    }

    #[test]
    fn halted_symbol_refuses_reports() {
        let (mut tracker, symbol) = registered(100);
        tracker.emergency_halt(ctx(GUARDIAN, 1), symbol).unwrap();
        assert_eq!(report(&mut tracker, symbol, E8, 2), Err(TrackerError::Halted(symbol)));
        tracker.emergency_lift(ctx(GUARDIAN, 3), symbol).unwrap();
        assert!(report(&mut tracker, symbol, E8, 4).is_ok());
    }

    #[test]
    fn full_history_refuses_until_trimmed() {
        let config = crate::config::Config {
            max_history_length: 4,
            ..test_config()
        };
        let mut tracker = tracker_with(config);
        let symbol = symbol_hash("BTC");
        tracker.register(ctx(OWNER, 0), symbol, 100).unwrap();

        for block in 0..4 {
            report(&mut tracker, symbol, 100 * E8, block).unwrap();
        }
        assert_eq!(
            report(&mut tracker, symbol, 100 * E8, 4),
            Err(TrackerError::HistoryFull { length: 4, cap: 4 })
        );

        assert_eq!(tracker.trim(ctx(OWNER, 4), symbol).unwrap(), 1);
        assert!(report(&mut tracker, symbol, 100 * E8, 4).is_ok());
        assert!(report(&mut tracker, symbol, 100 * E8, 5).is_err());
    }

    #[test]
    fn fee_is_forwarded_to_owner() {
        let (mut tracker, symbol) = registered(100);
        tracker.set_report_fee(ctx(OWNER, 0), U256::from(10u64)).unwrap();
        let mut ledger = LedgerTransfer::new();

        assert_eq!(
            tracker.report_price(paid(UPDATER, 1, 9), symbol, E8, &mut ledger),
            Err(TrackerError::InsufficientFee {
                required: U256::from(10u64),
                paid: U256::from(9u64),
            })
        );

        tracker.report_price(paid(UPDATER, 1, 15), symbol, E8, &mut ledger).unwrap();
        assert_eq!(ledger.balance_of(&OWNER), U256::from(10u64));
        // Overpayment stays in the tracker until swept
        assert_eq!(tracker.treasury_balance(), U256::from(5u64));
    }

    #[test]
    fn failed_fee_transfer_restores_pre_call_state() {
        let (mut tracker, symbol) = registered(100);
        tracker.set_report_fee(ctx(OWNER, 0), U256::from(10u64)).unwrap();
        tracker.report_price(paid(UPDATER, 1, 10), symbol, 100 * E8, &mut LedgerTransfer::new()).unwrap();
        tracker.events_mut().clear();

        let before = (
            tracker.symbol_summary(&symbol).unwrap(),
            tracker.history(&symbol, 0, 0).unwrap(),
            tracker.band_history(&symbol, 0, 0).unwrap(),
            tracker.aggregate_stats(),
        );

        let result = tracker.report_price(
            paid(UPDATER, 2, 10),
            symbol,
            300 * E8,
            &mut LedgerTransfer::rejecting(),
        );
        assert!(matches!(result, Err(TrackerError::TransferFailed { .. })));

        let after = (
            tracker.symbol_summary(&symbol).unwrap(),
            tracker.history(&symbol, 0, 0).unwrap(),
            tracker.band_history(&symbol, 0, 0).unwrap(),
            tracker.aggregate_stats(),
        );
        assert_eq!(before, after);
        assert!(tracker.events().records.is_empty());
        assert!(!tracker.guard.is_locked());

        // Same report goes through once transfers work again
        let outcome = tracker
            .report_price(paid(UPDATER, 2, 10), symbol, 300 * E8, &mut LedgerTransfer::new())
            .unwrap();
        assert_eq!(outcome.band, HeatBand::Critical);
    }

    #[test]
    fn reentrant_report_is_rejected() {
        let (mut tracker, symbol) = registered(100);
        tracker.guard.acquire().unwrap();
        assert_eq!(report(&mut tracker, symbol, E8, 1), Err(TrackerError::ReentrantCall));
        assert_eq!(
            tracker.set_thresholds(ctx(OWNER, 1), 1, 2, 3, 4),
            Err(TrackerError::ReentrantCall)
        );
        tracker.guard.release();
        assert!(report(&mut tracker, symbol, E8, 1).is_ok());
    }

    #[test]
    fn batch_skips_invalid_items_only() {
        let mut tracker = tracker();
        let btc = symbol_hash("BTC");
        let eth = symbol_hash("ETH");
        let unknown = symbol_hash("NOPE");
        tracker.register(ctx(OWNER, 0), btc, 100).unwrap();
        tracker.register(ctx(OWNER, 0), eth, 100).unwrap();
        tracker.emergency_halt(ctx(GUARDIAN, 0), eth).unwrap();
        tracker.events_mut().clear();

        let outcome = tracker
            .batch_report_prices(
                ctx(UPDATER, 1),
                &[btc, eth, unknown, btc],
                &[100 * E8, 100 * E8, 100 * E8, 0],
                &mut LedgerTransfer::new(),
            )
            .unwrap();

        assert_eq!(outcome.applied.len(), 1);
        let skipped: Vec<_> = outcome.skipped.iter().map(|s| (s.index, s.reason.clone())).collect();
        assert_eq!(
            skipped,
            vec![
                (1, TrackerError::Halted(eth)),
                (2, TrackerError::NotFound(unknown)),
                (3, TrackerError::ZeroPrice),
            ]
        );
        assert_eq!(
            tracker.history(&btc, 0, 0).unwrap(),
            vec![PriceObservation { price: 100 * E8, block: 1 }]
        );
        assert!(tracker.history(&eth, 0, 0).unwrap().is_empty());
        assert_eq!(tracker.events().count("price_reported"), 1);
    }

    #[test]
    fn batch_top_level_checks_reject_everything() {
        let (mut tracker, symbol) = registered(100);
        let mut ledger = LedgerTransfer::new();

        assert_eq!(
            tracker.batch_report_prices(ctx(UPDATER, 1), &[symbol, symbol], &[E8], &mut ledger),
            Err(TrackerError::LengthMismatch { symbols: 2, prices: 1 })
        );
        assert_eq!(
            tracker.batch_report_prices(ctx(UPDATER, 1), &[], &[], &mut ledger),
            Err(TrackerError::EmptyBatch)
        );

        let symbols = vec![symbol; MAX_BATCH_SIZE + 1];
        let prices = vec![E8; MAX_BATCH_SIZE + 1];
        assert_eq!(
            tracker.batch_report_prices(ctx(UPDATER, 1), &symbols, &prices, &mut ledger),
            Err(TrackerError::BatchTooLarge { size: 33, max: MAX_BATCH_SIZE })
        );

        tracker.set_report_fee(ctx(OWNER, 1), U256::from(3u64)).unwrap();
        assert!(matches!(
            tracker.batch_report_prices(paid(UPDATER, 1, 5), &[symbol, symbol], &[E8, E8], &mut ledger),
            Err(TrackerError::InsufficientFee { .. })
        ));

        assert!(tracker.history(&symbol, 0, 0).unwrap().is_empty());
        assert_eq!(tracker.events().count("price_reported"), 0);
    }

    #[test]
    fn batch_transfer_failure_rolls_back_every_item() {
        let mut tracker = tracker();
        let btc = symbol_hash("BTC");
        let eth = symbol_hash("ETH");
        tracker.register(ctx(OWNER, 0), btc, 100).unwrap();
        tracker.register(ctx(OWNER, 0), eth, 100).unwrap();
        tracker.set_report_fee(ctx(OWNER, 0), U256::from(2u64)).unwrap();
        tracker.events_mut().clear();

        let result = tracker.batch_report_prices(
            paid(UPDATER, 1, 6),
            &[btc, eth, btc],
            &[100 * E8, 50 * E8, 120 * E8],
            &mut LedgerTransfer::rejecting(),
        );
        assert!(matches!(result, Err(TrackerError::TransferFailed { .. })));
        assert!(tracker.history(&btc, 0, 0).unwrap().is_empty());
        assert!(tracker.band_history(&eth, 0, 0).unwrap().is_empty());
        assert_eq!(tracker.symbol_summary(&btc).unwrap().last_accepted, None);
        assert_eq!(tracker.treasury_balance(), U256::ZERO);
        assert!(tracker.events().records.is_empty());

        let mut ledger = LedgerTransfer::new();
        let outcome = tracker
            .batch_report_prices(paid(UPDATER, 1, 6), &[btc, eth, btc], &[100 * E8, 50 * E8, 120 * E8], &mut ledger)
            .unwrap();
        assert_eq!(outcome.applied.len(), 3);
        assert_eq!(ledger.balance_of(&OWNER), U256::from(6u64));
        assert_eq!(tracker.current_band(&btc).unwrap(), HeatBand::Warm);
    }
}
