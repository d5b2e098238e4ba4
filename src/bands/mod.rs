//! Threshold configuration and band classification

pub mod thresholds;
pub mod classifier;

pub use thresholds::*;
pub use classifier::*;
