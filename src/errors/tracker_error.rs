//! Custom error types for the tracker

use alloy::primitives::{Address, U256};
use thiserror::Error;
use crate::access::Role;
use crate::types::SymbolHash;

/// Broad class of a failure, used by callers to pick a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authorization,
    Validation,
    State,
    Transfer,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Unauthorized: {caller} lacks the {required:?} role")]
    Unauthorized {
        caller: Address,
        required: Role,
    },

    #[error("Price must be greater than zero")]
    ZeroPrice,

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Zero address is not a valid role holder")]
    ZeroAddress,

    #[error("Array length mismatch: {symbols} symbols, {prices} prices")]
    LengthMismatch {
        symbols: usize,
        prices: usize,
    },

    #[error("Batch is empty")]
    EmptyBatch,

    #[error("Batch of {size} exceeds the maximum of {max}")]
    BatchTooLarge {
        size: usize,
        max: usize,
    },

    #[error("Window length {window} outside [{min}, {max}]")]
    WindowOutOfRange {
        window: u64,
        min: u64,
        max: u64,
    },

    #[error("Cooldown of {blocks} blocks exceeds the maximum of {max}")]
    CooldownOutOfRange {
        blocks: u64,
        max: u64,
    },

    #[error("History length {length} outside [{min}, {max}]")]
    HistoryLengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Thresholds must satisfy cold < mild < warm < hot <= 10000 bps, got {cold}/{mild}/{warm}/{hot}")]
    InvalidThresholds {
        cold: u32,
        mild: u32,
        warm: u32,
        hot: u32,
    },

    #[error("Report fee {fee} exceeds the ceiling of {max}")]
    FeeTooHigh {
        fee: U256,
        max: U256,
    },

    #[error("Insufficient fee: required {required}, paid {paid}")]
    InsufficientFee {
        required: U256,
        paid: U256,
    },

    #[error("Symbol not found: {0}")]
    NotFound(SymbolHash),

    #[error("Symbol already registered: {0}")]
    AlreadyRegistered(SymbolHash),

    #[error("Registry full: {max} symbols live")]
    CapacityExceeded {
        max: usize,
    },

    #[error("Symbol halted: {0}")]
    Halted(SymbolHash),

    #[error("Symbol already halted: {0}")]
    AlreadyHalted(SymbolHash),

    #[error("Symbol is not halted: {0}")]
    NotHalted(SymbolHash),

    #[error("Platform is paused")]
    PlatformPaused,

    #[error("Cooldown active until block {next_allowed} (reported at {block})")]
    CooldownActive {
        block: u64,
        next_allowed: u64,
    },

    #[error("Block {block} is earlier than the newest observation at {newest}")]
    TimestampRegression {
        block: u64,
        newest: u64,
    },

    #[error("History full: {length} of {cap} observations")]
    HistoryFull {
        length: usize,
        cap: usize,
    },

    #[error("Reentrant call rejected")]
    ReentrantCall,

    #[error("Transfer of {amount} to {to} failed: {reason}")]
    TransferFailed {
        to: Address,
        amount: U256,
        reason: String,
    },
}

impl TrackerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Unauthorized { .. } => ErrorKind::Authorization,
            TrackerError::ZeroPrice
            | TrackerError::ZeroAmount
            | TrackerError::ZeroAddress
            | TrackerError::LengthMismatch { .. }
            | TrackerError::EmptyBatch
            | TrackerError::BatchTooLarge { .. }
            | TrackerError::WindowOutOfRange { .. }
            | TrackerError::CooldownOutOfRange { .. }
            | TrackerError::HistoryLengthOutOfRange { .. }
            | TrackerError::InvalidThresholds { .. }
            | TrackerError::FeeTooHigh { .. }
            | TrackerError::InsufficientFee { .. } => ErrorKind::Validation,
            TrackerError::NotFound(_)
            | TrackerError::AlreadyRegistered(_)
            | TrackerError::CapacityExceeded { .. }
            | TrackerError::Halted(_)
            | TrackerError::AlreadyHalted(_)
            | TrackerError::NotHalted(_)
            | TrackerError::PlatformPaused
            | TrackerError::CooldownActive { .. }
            | TrackerError::TimestampRegression { .. }
            | TrackerError::HistoryFull { .. }
            | TrackerError::ReentrantCall => ErrorKind::State,
            TrackerError::TransferFailed { .. } => ErrorKind::Transfer,
        }
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;
