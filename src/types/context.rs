//! Caller context for mutating operations

use alloy::primitives::{Address, U256};

/// Who is calling, at which block, and how much value came with the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub block: u64,
    pub value: U256,
}

impl CallContext {
    pub fn new(caller: Address, block: u64) -> Self {
        Self { caller, block, value: U256::ZERO }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}
