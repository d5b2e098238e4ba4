//! External value transfer collaborator

use alloy::primitives::{Address, U256};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransferFailure(pub String);

/// Moves value out of the tracker. Implementations may fail; the tracker
/// rolls back the whole enclosing operation when they do.
pub trait ValueTransfer {
    fn transfer(&mut self, to: Address, amount: U256) -> Result<(), TransferFailure>;
}

/// In-memory ledger of credited recipients, with a switch to reject transfers.
#[derive(Debug, Default)]
pub struct LedgerTransfer {
    pub credited: HashMap<Address, U256>,
    pub transfers: u64,
    pub reject: bool,
}

impl LedgerTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn balance_of(&self, account: &Address) -> U256 {
        self.credited.get(account).copied().unwrap_or(U256::ZERO)
    }
}

impl ValueTransfer for LedgerTransfer {
    fn transfer(&mut self, to: Address, amount: U256) -> Result<(), TransferFailure> {
        if self.reject {
            return Err(TransferFailure(format!("recipient {to} rejected {amount} wei")));
        }
        let entry = self.credited.entry(to).or_insert(U256::ZERO);
        *entry = entry.saturating_add(amount);
        self.transfers += 1;
        Ok(())
    }
}
