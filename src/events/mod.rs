//! Notifications emitted by tracker operations

pub mod sink;

pub use sink::*;

use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use crate::{
    bands::Thresholds,
    types::{HeatBand, SymbolHash},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    PriceReported {
        symbol: SymbolHash,
        reporter: Address,
        price: u128,
        fee_paid: U256,
    },
    SnapshotAppended {
        symbol: SymbolHash,
        price: u128,
        volatility_e8: u128,
        observations: usize,
    },
    /// Written for every accepted report, including repeats of the same band.
    HeatLevelChanged {
        symbol: SymbolHash,
        previous: HeatBand,
        band: HeatBand,
        volatility_e8: u128,
    },
    BandCrossed {
        symbol: SymbolHash,
        from: HeatBand,
        to: HeatBand,
    },
    VolatilitySpike {
        symbol: SymbolHash,
        band: HeatBand,
        volatility_e8: u128,
    },
    SymbolRegistered {
        symbol: SymbolHash,
        window_length: u64,
    },
    SymbolRemoved {
        symbol: SymbolHash,
    },
    CooldownUpdated {
        symbol: SymbolHash,
        previous: u64,
        cooldown: u64,
    },
    ThresholdsUpdated {
        previous: Thresholds,
        thresholds: Thresholds,
    },
    UpdaterChanged {
        previous: Address,
        updater: Address,
    },
    GuardianChanged {
        previous: Address,
        guardian: Address,
    },
    OwnershipTransferred {
        previous: Address,
        owner: Address,
    },
    MaxHistoryLengthUpdated {
        previous: usize,
        length: usize,
    },
    ReportFeeUpdated {
        previous: U256,
        fee: U256,
    },
    PlatformPauseChanged {
        paused: bool,
    },
    EmergencyHalt {
        symbol: SymbolHash,
        by: Address,
    },
    EmergencyLift {
        symbol: SymbolHash,
        by: Address,
    },
    TreasurySwept {
        to: Address,
        amount: U256,
    },
    HistoryTrimmed {
        symbol: SymbolHash,
        evicted: usize,
        remaining: usize,
    },
}

impl TrackerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackerEvent::PriceReported { .. } => "price_reported",
            TrackerEvent::SnapshotAppended { .. } => "snapshot_appended",
            TrackerEvent::HeatLevelChanged { .. } => "heat_level_changed",
            TrackerEvent::BandCrossed { .. } => "band_crossed",
            TrackerEvent::VolatilitySpike { .. } => "volatility_spike",
            TrackerEvent::SymbolRegistered { .. } => "symbol_registered",
            TrackerEvent::SymbolRemoved { .. } => "symbol_removed",
            TrackerEvent::CooldownUpdated { .. } => "cooldown_updated",
            TrackerEvent::ThresholdsUpdated { .. } => "thresholds_updated",
            TrackerEvent::UpdaterChanged { .. } => "updater_changed",
            TrackerEvent::GuardianChanged { .. } => "guardian_changed",
            TrackerEvent::OwnershipTransferred { .. } => "ownership_transferred",
            TrackerEvent::MaxHistoryLengthUpdated { .. } => "max_history_length_updated",
            TrackerEvent::ReportFeeUpdated { .. } => "report_fee_updated",
            TrackerEvent::PlatformPauseChanged { .. } => "platform_pause_changed",
            TrackerEvent::EmergencyHalt { .. } => "emergency_halt",
            TrackerEvent::EmergencyLift { .. } => "emergency_lift",
            TrackerEvent::TreasurySwept { .. } => "treasury_swept",
            TrackerEvent::HistoryTrimmed { .. } => "history_trimmed",
        }
    }
}

/// An event with its delivery envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub id: Uuid,
    pub block: u64,
    pub emitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: TrackerEvent,
}

impl EventRecord {
    pub fn new(block: u64, event: TrackerEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            block,
            emitted_at: Utc::now(),
            event,
        }
    }
}
