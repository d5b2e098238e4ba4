//! Owner / guardian / updater role model

use alloy::primitives::Address;
use serde::Serialize;
use crate::errors::{TrackerError, TrackerResult};

/// Authority required by an operation. The owner satisfies every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Owner,
    Guardian,
    Updater,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessControl {
    pub owner: Address,
    pub guardian: Address,
    pub updater: Address,
    pub paused: bool,
}

impl AccessControl {
    /// Fresh role set where the owner also holds the guardian and updater seats.
    pub fn new(owner: Address) -> TrackerResult<Self> {
        ensure_nonzero(owner)?;
        Ok(Self {
            owner,
            guardian: owner,
            updater: owner,
            paused: false,
        })
    }

    pub fn has_role(&self, caller: Address, role: Role) -> bool {
        if caller == self.owner {
            return true;
        }
        match role {
            Role::Owner => false,
            Role::Guardian => caller == self.guardian,
            Role::Updater => caller == self.updater,
        }
    }

    pub fn authorize(&self, caller: Address, required: Role) -> TrackerResult<()> {
        if self.has_role(caller, required) {
            Ok(())
        } else {
            Err(TrackerError::Unauthorized { caller, required })
        }
    }

    pub fn ensure_not_paused(&self) -> TrackerResult<()> {
        if self.paused {
            Err(TrackerError::PlatformPaused)
        } else {
            Ok(())
        }
    }

    /// Replace the holder of `role`, returning the previous holder.
    pub fn assign(&mut self, role: Role, holder: Address) -> TrackerResult<Address> {
        ensure_nonzero(holder)?;
        let slot = match role {
            Role::Owner => &mut self.owner,
            Role::Guardian => &mut self.guardian,
            Role::Updater => &mut self.updater,
        };
        Ok(std::mem::replace(slot, holder))
    }
}

fn ensure_nonzero(address: Address) -> TrackerResult<()> {
    if address == Address::ZERO {
        Err(TrackerError::ZeroAddress)
    } else {
        Ok(())
    }
}
