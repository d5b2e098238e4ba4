//! Random-walk price generator

use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::config::{BPS_DENOMINATOR, E8};

/// Per-tick moves are uniform in `±max_step_bps`; with probability
/// `shock_chance` the move is scaled up to `±max_shock_bps` instead.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    price: u128,
    max_step_bps: u32,
    max_shock_bps: u32,
    shock_chance: f64,
    rng: StdRng,
}

impl RandomWalk {
    pub fn new(start_price: u128) -> Self {
        Self::with_rng(start_price, StdRng::from_os_rng())
    }

    pub fn seeded(start_price: u128, seed: u64) -> Self {
        Self::with_rng(start_price, StdRng::seed_from_u64(seed))
    }

    fn with_rng(start_price: u128, rng: StdRng) -> Self {
        Self {
            price: start_price.max(1),
            max_step_bps: 150,
            max_shock_bps: 4_000,
            shock_chance: 0.02,
            rng,
        }
    }

    pub fn with_steps(mut self, max_step_bps: u32, max_shock_bps: u32, shock_chance: f64) -> Self {
        self.max_step_bps = max_step_bps.min(BPS_DENOMINATOR - 1);
        self.max_shock_bps = max_shock_bps.min(BPS_DENOMINATOR - 1);
        self.shock_chance = shock_chance.clamp(0.0, 1.0);
        self
    }

    pub fn price(&self) -> u128 {
        self.price
    }

    /// Advance one tick and return the new price. Never reaches zero.
    pub fn next_price(&mut self) -> u128 {
        let bound = if self.rng.random_bool(self.shock_chance) {
            self.max_shock_bps
        } else {
            self.max_step_bps
        } as i64;
        let step_bps = if bound == 0 { 0 } else { self.rng.random_range(-bound..=bound) };

        let delta = self.price.saturating_mul(step_bps.unsigned_abs() as u128) / BPS_DENOMINATOR as u128;
        self.price = if step_bps >= 0 {
            self.price.saturating_add(delta)
        } else {
            self.price.saturating_sub(delta)
        }
        .max(1);
        self.price
    }
}

/// Rough starting prices so the demo output looks familiar.
pub fn demo_start_price(ticker: &str) -> u128 {
    match ticker.to_ascii_uppercase().as_str() {
        "BTC" => 65_000 * E8,
        "ETH" => 3_200 * E8,
        "SOL" => 150 * E8,
        _ => 100 * E8,
    }
}
