//! Caller-side recovery strategies
//!
//! The tracker never retries on its own. Reporters feed failures through
//! `ErrorRecovery` to decide whether to resubmit, trim, skip or give up.

use std::collections::HashMap;
use tracing::Level;
use super::{ErrorKind, TrackerError};

pub struct ErrorRecovery {
    pub error_counts: HashMap<String, u32>,
    pub recovery_strategies: HashMap<String, RecoveryStrategy>,
}

#[derive(Clone)]
pub enum RecoveryStrategy {
    WaitForCooldown,
    TrimHistory { max_attempts: u32 },
    Skip { log_level: Level },
    Shutdown { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Resubmit once the chain reaches `block`.
    RetryAfter { block: u64 },
    /// Ask the owner to trim the series, then resubmit.
    RetryAfterTrim,
    Skip { log_level: Level },
    Escalate,
    Shutdown { reason: String },
}

impl Default for ErrorRecovery {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorRecovery {
    pub fn new() -> Self {
        let mut strategies = HashMap::new();

        strategies.insert("cooldown".to_string(), RecoveryStrategy::WaitForCooldown);

        strategies.insert(
            "history_full".to_string(),
            RecoveryStrategy::TrimHistory { max_attempts: 3 },
        );

        strategies.insert(
            "halted".to_string(),
            RecoveryStrategy::Skip { log_level: Level::WARN },
        );

        strategies.insert(
            "invalid_input".to_string(),
            RecoveryStrategy::Skip { log_level: Level::WARN },
        );

        strategies.insert(
            "unauthorized".to_string(),
            RecoveryStrategy::Shutdown {
                reason: "reporter identity lost its role".to_string(),
            },
        );

        Self {
            error_counts: HashMap::new(),
            recovery_strategies: strategies,
        }
    }

    pub fn handle_error(&mut self, error: &TrackerError) -> RecoveryAction {
        let error_type = self.classify_error(error);
        let count = self.error_counts.entry(error_type.clone()).or_insert(0);
        *count += 1;

        match self.recovery_strategies.get(&error_type) {
            Some(RecoveryStrategy::WaitForCooldown) => match error {
                TrackerError::CooldownActive { next_allowed, .. } => RecoveryAction::RetryAfter {
                    block: *next_allowed,
                },
                _ => RecoveryAction::Escalate,
            },
            Some(RecoveryStrategy::TrimHistory { max_attempts }) => {
                if *count <= *max_attempts {
                    RecoveryAction::RetryAfterTrim
                } else {
                    RecoveryAction::Escalate
                }
            }
            Some(RecoveryStrategy::Skip { log_level }) => RecoveryAction::Skip {
                log_level: *log_level,
            },
            Some(RecoveryStrategy::Shutdown { reason }) => RecoveryAction::Shutdown {
                reason: reason.clone(),
            },
            None => RecoveryAction::Escalate,
        }
    }

    /// Forget the failure history of one error class after a success.
    pub fn reset(&mut self, error_type: &str) {
        self.error_counts.remove(error_type);
    }

    pub fn classify_error(&self, error: &TrackerError) -> String {
        match error {
            TrackerError::CooldownActive { .. } => "cooldown".to_string(),
            TrackerError::HistoryFull { .. } => "history_full".to_string(),
            TrackerError::Halted(_) | TrackerError::PlatformPaused => "halted".to_string(),
            TrackerError::Unauthorized { .. } => "unauthorized".to_string(),
            TrackerError::TransferFailed { .. } => "transfer".to_string(),
            TrackerError::ReentrantCall => "reentrancy".to_string(),
            e if e.kind() == ErrorKind::Validation => "invalid_input".to_string(),
            _ => "state".to_string(),
        }
    }
}
