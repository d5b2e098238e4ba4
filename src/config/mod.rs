//! Configuration management for the heat-band tracker

pub mod settings;

pub use settings::*;

use lazy_static::lazy_static;

// Registry bounds
pub const MAX_SYMBOLS: usize = 96;
pub const MIN_WINDOW_LENGTH: u64 = 12;
pub const MAX_WINDOW_LENGTH: u64 = 40_320; // one week of 15s blocks
pub const MAX_COOLDOWN_BLOCKS: u64 = MAX_WINDOW_LENGTH;

// Report processing bounds
pub const MAX_BATCH_SIZE: usize = 32;
pub const MIN_HISTORY_LENGTH: usize = 2;
pub const MAX_HISTORY_LENGTH: usize = 10_000;

// Fixed-point conventions
pub const PRICE_DECIMALS: u32 = 8;
pub const E8: u128 = 100_000_000;
pub const BPS_DENOMINATOR: u32 = 10_000;

lazy_static! {
    pub static ref CONFIG: Config = Config::load();
}
