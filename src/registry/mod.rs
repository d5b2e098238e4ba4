//! Registry of tracked symbols
//!
//! Dense roster in registration order plus a hash-to-slot index. Removal
//! compacts the roster and rewrites the slots of every later entry, so an
//! index below `len()` always resolves to a live symbol.

use std::collections::HashMap;
use tracing::info;
use crate::{
    config::{MAX_COOLDOWN_BLOCKS, MAX_SYMBOLS, MAX_WINDOW_LENGTH, MIN_WINDOW_LENGTH},
    errors::{TrackerError, TrackerResult},
    types::{SymbolConfig, SymbolHash},
};

#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub symbol: SymbolHash,
    pub config: SymbolConfig,
}

#[derive(Debug, Default)]
pub struct SymbolRegistry {
    entries: Vec<RegistryEntry>,
    slots: HashMap<SymbolHash, usize>,
}

pub fn validate_window(window: u64) -> TrackerResult<()> {
    if (MIN_WINDOW_LENGTH..=MAX_WINDOW_LENGTH).contains(&window) {
        Ok(())
    } else {
        Err(TrackerError::WindowOutOfRange {
            window,
            min: MIN_WINDOW_LENGTH,
            max: MAX_WINDOW_LENGTH,
        })
    }
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        symbol: SymbolHash,
        window_length: u64,
        cooldown: u64,
        block: u64,
    ) -> TrackerResult<usize> {
        if self.slots.contains_key(&symbol) {
            return Err(TrackerError::AlreadyRegistered(symbol));
        }
        if self.entries.len() >= MAX_SYMBOLS {
            return Err(TrackerError::CapacityExceeded { max: MAX_SYMBOLS });
        }
        validate_window(window_length)?;

        let slot = self.entries.len();
        self.entries.push(RegistryEntry {
            symbol,
            config: SymbolConfig::new(window_length, cooldown, block),
        });
        self.slots.insert(symbol, slot);

        info!(%symbol, slot, window_length, "Registered symbol");
        Ok(slot)
    }

    pub fn remove(&mut self, symbol: &SymbolHash) -> TrackerResult<RegistryEntry> {
        let slot = self.slots.remove(symbol).ok_or(TrackerError::NotFound(*symbol))?;
        let entry = self.entries.remove(slot);
        for (index, later) in self.entries.iter().enumerate().skip(slot) {
            self.slots.insert(later.symbol, index);
        }
        info!(%symbol, slot, remaining = self.entries.len(), "Removed symbol");
        Ok(entry)
    }

    pub fn contains(&self, symbol: &SymbolHash) -> bool {
        self.slots.contains_key(symbol)
    }

    pub fn get(&self, symbol: &SymbolHash) -> TrackerResult<&SymbolConfig> {
        self.slots
            .get(symbol)
            .map(|&slot| &self.entries[slot].config)
            .ok_or(TrackerError::NotFound(*symbol))
    }

    pub fn get_mut(&mut self, symbol: &SymbolHash) -> TrackerResult<&mut SymbolConfig> {
        match self.slots.get(symbol) {
            Some(&slot) => Ok(&mut self.entries[slot].config),
            None => Err(TrackerError::NotFound(*symbol)),
        }
    }

    pub fn index_of(&self, symbol: &SymbolHash) -> Option<usize> {
        self.slots.get(symbol).copied()
    }

    pub fn symbol_at(&self, index: usize) -> Option<SymbolHash> {
        self.entries.get(index).map(|entry| entry.symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn set_cooldown(&mut self, symbol: &SymbolHash, blocks: u64) -> TrackerResult<u64> {
        if blocks > MAX_COOLDOWN_BLOCKS {
            return Err(TrackerError::CooldownOutOfRange {
                blocks,
                max: MAX_COOLDOWN_BLOCKS,
            });
        }
        let config = self.get_mut(symbol)?;
        Ok(std::mem::replace(&mut config.cooldown, blocks))
    }

    pub fn halt(&mut self, symbol: &SymbolHash) -> TrackerResult<()> {
        let config = self.get_mut(symbol)?;
        if config.halted {
            return Err(TrackerError::AlreadyHalted(*symbol));
        }
        config.halted = true;
        Ok(())
    }

    pub fn lift(&mut self, symbol: &SymbolHash) -> TrackerResult<()> {
        let config = self.get_mut(symbol)?;
        if !config.halted {
            return Err(TrackerError::NotHalted(*symbol));
        }
        config.halted = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::symbol_hash;
    use proptest::prelude::*;

    #[test]
    fn rejects_duplicates_and_bad_windows() {
        let mut registry = SymbolRegistry::new();
        let btc = symbol_hash("BTC");
        registry.register(btc, 100, 0, 1).unwrap();

        assert_eq!(registry.register(btc, 100, 0, 2), Err(TrackerError::AlreadyRegistered(btc)));
        assert!(matches!(
            registry.register(symbol_hash("ETH"), 11, 0, 2),
            Err(TrackerError::WindowOutOfRange { window: 11, .. })
        ));
        assert!(registry.register(symbol_hash("ETH"), MAX_WINDOW_LENGTH + 1, 0, 2).is_err());
        assert!(registry.register(symbol_hash("ETH"), MAX_WINDOW_LENGTH, 0, 2).is_ok());
        assert!(registry.register(symbol_hash("SOL"), MIN_WINDOW_LENGTH, 0, 2).is_ok());
    }

    #[test]
    fn capacity_is_enforced() {
        let mut registry = SymbolRegistry::new();
        for i in 0..MAX_SYMBOLS {
            registry.register(symbol_hash(&format!("SYM{i}")), 100, 0, 0).unwrap();
        }
        assert_eq!(
            registry.register(symbol_hash("ONE_MORE"), 100, 0, 0),
            Err(TrackerError::CapacityExceeded { max: MAX_SYMBOLS })
        );
        registry.remove(&symbol_hash("SYM3")).unwrap();
        assert!(registry.register(symbol_hash("ONE_MORE"), 100, 0, 0).is_ok());
    }

    #[test]
    fn removal_compacts_roster_and_rewrites_indices() {
        let mut registry = SymbolRegistry::new();
        let symbols: Vec<_> = ["A", "B", "C", "D"].iter().map(|t| symbol_hash(t)).collect();
        for symbol in &symbols {
            registry.register(*symbol, 100, 0, 0).unwrap();
        }

        registry.remove(&symbols[1]).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.symbol_at(0), Some(symbols[0]));
        assert_eq!(registry.symbol_at(1), Some(symbols[2]));
        assert_eq!(registry.symbol_at(2), Some(symbols[3]));
        assert_eq!(registry.symbol_at(3), None);
        assert_eq!(registry.index_of(&symbols[3]), Some(2));
        assert_eq!(registry.index_of(&symbols[1]), None);
        assert_eq!(registry.remove(&symbols[1]).map(|e| e.symbol), Err(TrackerError::NotFound(symbols[1])));
    }

    #[test]
    fn re_registration_starts_fresh() {
        let mut registry = SymbolRegistry::new();
        let btc = symbol_hash("BTC");
        registry.register(btc, 100, 0, 0).unwrap();
        registry.set_cooldown(&btc, 9).unwrap();
        registry.halt(&btc).unwrap();
        registry.remove(&btc).unwrap();

        registry.register(btc, 50, 0, 7).unwrap();
        let config = registry.get(&btc).unwrap();
        assert_eq!(config, &SymbolConfig::new(50, 0, 7));
    }

    #[test]
    fn halt_and_lift_are_guarded() {
        let mut registry = SymbolRegistry::new();
        let btc = symbol_hash("BTC");
        registry.register(btc, 100, 0, 0).unwrap();

        assert_eq!(registry.lift(&btc), Err(TrackerError::NotHalted(btc)));
        registry.halt(&btc).unwrap();
        assert_eq!(registry.halt(&btc), Err(TrackerError::AlreadyHalted(btc)));
        registry.lift(&btc).unwrap();
        assert!(!registry.get(&btc).unwrap().halted);

        assert!(matches!(
            registry.set_cooldown(&btc, MAX_COOLDOWN_BLOCKS + 1),
            Err(TrackerError::CooldownOutOfRange { .. })
        ));
        assert_eq!(registry.set_cooldown(&btc, 4), Ok(0));
    }

    proptest! {
        #[test]
        fn window_accepted_only_within_bounds(window in 0u64..50_000) {
            let mut registry = SymbolRegistry::new();
            let accepted = registry.register(symbol_hash("X"), window, 0, 0).is_ok();
            prop_assert_eq!(accepted, (MIN_WINDOW_LENGTH..=MAX_WINDOW_LENGTH).contains(&window));
        }
    }
}
