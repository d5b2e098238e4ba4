//! Trailing-window volatility computation

pub mod calculator;

pub use calculator::*;
