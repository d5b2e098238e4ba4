//! Owner and guardian operations

use alloy::primitives::{Address, U256};
use tracing::{info, warn};
use crate::{
    access::Role,
    bands::Thresholds,
    errors::{TrackerError, TrackerResult},
    events::{EventSink, TrackerEvent},
    treasury::ValueTransfer,
    types::{CallContext, SymbolHash},
};
use super::HeatTracker;

impl<S: EventSink> HeatTracker<S> {
    fn authorize(&self, ctx: &CallContext, role: Role) -> TrackerResult<()> {
        self.guard.ensure_unlocked()?;
        self.access.authorize(ctx.caller, role)
    }

    pub fn register(&mut self, ctx: CallContext, symbol: SymbolHash, window_length: u64) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        self.registry.register(symbol, window_length, self.default_cooldown, ctx.block)?;
        self.store.create(symbol);
        self.emit(ctx.block, TrackerEvent::SymbolRegistered { symbol, window_length });
        Ok(())
    }

    pub fn remove(&mut self, ctx: CallContext, symbol: SymbolHash) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        self.registry.remove(&symbol)?;
        self.store.destroy(&symbol);
        self.emit(ctx.block, TrackerEvent::SymbolRemoved { symbol });
        Ok(())
    }

    pub fn set_cooldown(&mut self, ctx: CallContext, symbol: SymbolHash, blocks: u64) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        let previous = self.registry.set_cooldown(&symbol, blocks)?;
        self.emit(ctx.block, TrackerEvent::CooldownUpdated { symbol, previous, cooldown: blocks });
        Ok(())
    }

    /// Replace all four band bounds at once. Invalid orderings leave the
    /// current thresholds untouched.
    pub fn set_thresholds(
        &mut self,
        ctx: CallContext,
        cold_max: u32,
        mild_max: u32,
        warm_max: u32,
        hot_max: u32,
    ) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        let thresholds = Thresholds::new(cold_max, mild_max, warm_max, hot_max)?;
        let previous = std::mem::replace(&mut self.thresholds, thresholds);
        info!(?previous, ?thresholds, "Updated band thresholds");
        self.emit(ctx.block, TrackerEvent::ThresholdsUpdated { previous, thresholds });
        Ok(())
    }

    pub fn set_updater(&mut self, ctx: CallContext, updater: Address) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        let previous = self.access.assign(Role::Updater, updater)?;
        self.emit(ctx.block, TrackerEvent::UpdaterChanged { previous, updater });
        Ok(())
    }

    pub fn set_guardian(&mut self, ctx: CallContext, guardian: Address) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        let previous = self.access.assign(Role::Guardian, guardian)?;
        self.emit(ctx.block, TrackerEvent::GuardianChanged { previous, guardian });
        Ok(())
    }

    pub fn transfer_ownership(&mut self, ctx: CallContext, owner: Address) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        let previous = self.access.assign(Role::Owner, owner)?;
        info!(%previous, %owner, "Ownership transferred");
        self.emit(ctx.block, TrackerEvent::OwnershipTransferred { previous, owner });
        Ok(())
    }

    pub fn set_max_history_length(&mut self, ctx: CallContext, length: usize) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        let previous = self.store.max_history_length();
        self.store.set_max_history_length(length)?;
        self.emit(ctx.block, TrackerEvent::MaxHistoryLengthUpdated { previous, length });
        Ok(())
    }

    pub fn set_report_fee(&mut self, ctx: CallContext, fee: U256) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Owner)?;
        let previous = self.treasury.set_report_fee(fee)?;
        self.emit(ctx.block, TrackerEvent::ReportFeeUpdated { previous, fee });
        Ok(())
    }

    pub fn set_platform_paused(&mut self, ctx: CallContext, paused: bool) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Guardian)?;
        self.access.paused = paused;
        if paused {
            warn!(by = %ctx.caller, "Platform paused");
        } else {
            info!(by = %ctx.caller, "Platform resumed");
        }
        self.emit(ctx.block, TrackerEvent::PlatformPauseChanged { paused });
        Ok(())
    }

    pub fn emergency_halt(&mut self, ctx: CallContext, symbol: SymbolHash) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Guardian)?;
        self.registry.halt(&symbol)?;
        warn!(%symbol, by = %ctx.caller, "Emergency halt");
        self.emit(ctx.block, TrackerEvent::EmergencyHalt { symbol, by: ctx.caller });
        Ok(())
    }

    pub fn emergency_lift(&mut self, ctx: CallContext, symbol: SymbolHash) -> TrackerResult<()> {
        self.authorize(&ctx, Role::Guardian)?;
        self.registry.lift(&symbol)?;
        info!(%symbol, by = %ctx.caller, "Emergency halt lifted");
        self.emit(ctx.block, TrackerEvent::EmergencyLift { symbol, by: ctx.caller });
        Ok(())
    }

    /// Evict the oldest observations so the series has room again.
    pub fn trim(&mut self, ctx: CallContext, symbol: SymbolHash) -> TrackerResult<usize> {
        self.authorize(&ctx, Role::Owner)?;
        let evicted = self.store.trim(&symbol)?;
        let remaining = self.store.get(&symbol)?.len();
        self.emit(ctx.block, TrackerEvent::HistoryTrimmed { symbol, evicted, remaining });
        Ok(evicted)
    }

    /// Send up to `amount` of the held balance to the owner. Returns the
    /// amount actually moved, capped at the balance.
    pub fn sweep_treasury(
        &mut self,
        ctx: CallContext,
        amount: U256,
        transfer: &mut dyn ValueTransfer,
    ) -> TrackerResult<U256> {
        self.guarded(|tracker| {
            tracker.access.authorize(ctx.caller, Role::Owner)?;
            if amount.is_zero() {
                return Err(TrackerError::ZeroAmount);
            }
            let swept = tracker.treasury.sweepable(amount);
            if swept.is_zero() {
                return Ok(swept);
            }

            let to = tracker.access.owner;
            tracker.treasury.balance -= swept;
            if let Err(failure) = transfer.transfer(to, swept) {
                tracker.treasury.balance += swept;
                warn!(%to, %swept, "Treasury sweep failed: {}", failure);
                return Err(TrackerError::TransferFailed {
                    to,
                    amount: swept,
                    reason: failure.0,
                });
            }

            info!(%to, %swept, "Treasury swept");
            tracker.emit(ctx.block, TrackerEvent::TreasurySwept { to, amount: swept });
            Ok(swept)
        })
    }
}
