//! Reentrancy guard around operations that move value out of the tracker.
//!
//! Mutations already take `&mut self`, but a value transfer hands control to a
//! foreign implementation. The guard keeps the ordering rule explicit: while an
//! outer call holds it, every other mutating entry point fails with
//! `ReentrantCall`.

use crate::errors::{TrackerError, TrackerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReentrancyStatus {
    #[default]
    Unlocked,
    Locked,
}

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    status: ReentrancyStatus,
}

impl ReentrancyGuard {
    pub fn acquire(&mut self) -> TrackerResult<()> {
        match self.status {
            ReentrancyStatus::Unlocked => {
                self.status = ReentrancyStatus::Locked;
                Ok(())
            }
            ReentrancyStatus::Locked => Err(TrackerError::ReentrantCall),
        }
    }

    pub fn release(&mut self) {
        self.status = ReentrancyStatus::Unlocked;
    }

    /// Check without taking the lock, for mutations that never transfer value.
    pub fn ensure_unlocked(&self) -> TrackerResult<()> {
        match self.status {
            ReentrancyStatus::Unlocked => Ok(()),
            ReentrancyStatus::Locked => Err(TrackerError::ReentrantCall),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status == ReentrancyStatus::Locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_rejected_until_release() {
        let mut guard = ReentrancyGuard::default();
        guard.acquire().unwrap();
        assert!(guard.is_locked());
        assert_eq!(guard.acquire(), Err(TrackerError::ReentrantCall));
        assert_eq!(guard.ensure_unlocked(), Err(TrackerError::ReentrantCall));

        guard.release();
        assert!(guard.ensure_unlocked().is_ok());
        assert!(guard.acquire().is_ok());
    }
}
