//! Tracker facade: owns every component and serializes all mutations
//!
//! Mutating operations take a `CallContext` and check, in order, the
//! reentrancy guard, the caller's role, then operation-specific rules. Events
//! are staged during a call and published only once it has fully succeeded.

pub mod reports;
pub mod admin;
pub mod shared;

pub use shared::*;

use alloy::primitives::Address;
use crate::{
    access::{AccessControl, ReentrancyGuard},
    bands::Thresholds,
    config::Config,
    errors::TrackerResult,
    events::{EventRecord, EventSink, MemoryEventSink, TrackerEvent},
    registry::SymbolRegistry,
    store::TimeSeriesStore,
    treasury::Treasury,
};

pub struct HeatTracker<S: EventSink = MemoryEventSink> {
    pub(crate) access: AccessControl,
    pub(crate) guard: ReentrancyGuard,
    pub(crate) registry: SymbolRegistry,
    pub(crate) store: TimeSeriesStore,
    pub(crate) thresholds: Thresholds,
    pub(crate) treasury: Treasury,
    pub(crate) default_cooldown: u64,
    pub(crate) total_reports: u64,
    pub(crate) sink: S,
}

impl<S: EventSink> HeatTracker<S> {
    pub fn new(owner: Address, config: &Config, sink: S) -> TrackerResult<Self> {
        let thresholds = Thresholds::from_bps(config.threshold_bps).unwrap_or_default();

        Ok(Self {
            access: AccessControl::new(owner)?,
            guard: ReentrancyGuard::default(),
            registry: SymbolRegistry::new(),
            store: TimeSeriesStore::new(config.max_history_length, config.trim_headroom_bps),
            thresholds,
            treasury: Treasury::new(config.report_fee_wei, config.max_report_fee_wei),
            default_cooldown: config.default_cooldown_blocks,
            total_reports: 0,
            sink,
        })
    }

    pub fn events(&self) -> &S {
        &self.sink
    }

    pub fn events_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn publish(&mut self, block: u64, events: Vec<TrackerEvent>) {
        for event in events {
            self.sink.publish(&EventRecord::new(block, event));
        }
    }

    fn emit(&mut self, block: u64, event: TrackerEvent) {
        self.publish(block, vec![event]);
    }

    /// Run `body` holding the reentrancy guard, releasing it on every path.
    fn guarded<T>(&mut self, body: impl FnOnce(&mut Self) -> TrackerResult<T>) -> TrackerResult<T> {
        self.guard.acquire()?;
        let result = body(self);
        self.guard.release();
        result
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use alloy::primitives::U256;
    use crate::types::CallContext;

    pub const OWNER: Address = Address::new([0x01; 20]);
    pub const GUARDIAN: Address = Address::new([0x02; 20]);
    pub const UPDATER: Address = Address::new([0x03; 20]);
    pub const STRANGER: Address = Address::new([0x04; 20]);

    pub fn test_config() -> Config {
        Config {
            max_history_length: 50,
            ..Config::default()
        }
    }

    pub fn tracker() -> HeatTracker {
        tracker_with(test_config())
    }

    pub fn tracker_with(config: Config) -> HeatTracker {
        let mut tracker = HeatTracker::new(OWNER, &config, MemoryEventSink::new()).unwrap();
        tracker.set_guardian(ctx(OWNER, 0), GUARDIAN).unwrap();
        tracker.set_updater(ctx(OWNER, 0), UPDATER).unwrap();
        tracker.events_mut().clear();
        tracker
    }

    pub fn ctx(caller: Address, block: u64) -> CallContext {
        CallContext::new(caller, block)
    }

    pub fn paid(caller: Address, block: u64, value: u64) -> CallContext {
        CallContext::new(caller, block).with_value(U256::from(value))
    }
}
