//! Report fees, tracker balance and outbound value transfers

pub mod transfer;

pub use transfer::*;

use alloy::primitives::U256;
use crate::errors::{TrackerError, TrackerResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Treasury {
    /// Value held by the tracker and not yet swept.
    pub balance: U256,
    pub report_fee: U256,
    pub max_report_fee: U256,
    pub fees_forwarded: U256,
}

impl Treasury {
    pub fn new(report_fee: U256, max_report_fee: U256) -> Self {
        Self {
            balance: U256::ZERO,
            report_fee: report_fee.min(max_report_fee),
            max_report_fee,
            fees_forwarded: U256::ZERO,
        }
    }

    pub fn set_report_fee(&mut self, fee: U256) -> TrackerResult<U256> {
        if fee > self.max_report_fee {
            return Err(TrackerError::FeeTooHigh {
                fee,
                max: self.max_report_fee,
            });
        }
        Ok(std::mem::replace(&mut self.report_fee, fee))
    }

    /// Fee owed for `items` reports, saturating on overflow.
    pub fn fee_for(&self, items: usize) -> U256 {
        self.report_fee.saturating_mul(U256::from(items))
    }

    pub fn ensure_paid(&self, items: usize, paid: U256) -> TrackerResult<U256> {
        let required = self.fee_for(items);
        if paid < required {
            return Err(TrackerError::InsufficientFee { required, paid });
        }
        Ok(required)
    }

    /// Amount a sweep of `requested` actually moves.
    pub fn sweepable(&self, requested: U256) -> U256 {
        requested.min(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_ceiling_is_enforced() {
        let mut treasury = Treasury::new(U256::from(10u64), U256::from(100u64));
        assert_eq!(treasury.set_report_fee(U256::from(100u64)), Ok(U256::from(10u64)));
        assert!(matches!(
            treasury.set_report_fee(U256::from(101u64)),
            Err(TrackerError::FeeTooHigh { .. })
        ));
        assert_eq!(treasury.report_fee, U256::from(100u64));
    }

    #[test]
    fn aggregate_fee_scales_with_items() {
        let treasury = Treasury::new(U256::from(7u64), U256::from(100u64));
        assert_eq!(treasury.ensure_paid(3, U256::from(21u64)), Ok(U256::from(21u64)));
        assert_eq!(
            treasury.ensure_paid(3, U256::from(20u64)),
            Err(TrackerError::InsufficientFee {
                required: U256::from(21u64),
                paid: U256::from(20u64),
            })
        );
    }

    #[test]
    fn sweep_is_capped_at_balance() {
        let mut treasury = Treasury::new(U256::ZERO, U256::from(100u64));
        treasury.balance = U256::from(40u64);
        assert_eq!(treasury.sweepable(U256::from(100u64)), U256::from(40u64));
        assert_eq!(treasury.sweepable(U256::from(5u64)), U256::from(5u64));
    }
}
