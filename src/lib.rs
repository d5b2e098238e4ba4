//! Heat-band tracker
//!
//! Keeps a bounded price history per registered symbol, derives a trailing
//! volatility figure from it, and classifies each symbol into one of five
//! ordered heat bands. Reports are role-gated, optionally fee-bearing, and
//! every committed state change is published to an event sink.

pub mod config;
pub mod types;
pub mod errors;
pub mod access;
pub mod bands;
pub mod volatility;
pub mod store;
pub mod registry;
pub mod treasury;
pub mod events;
pub mod storage;
pub mod tracker;
pub mod query;
pub mod simulation;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{TrackerError, TrackerResult};
pub use tracker::{share, HeatTracker, SharedTracker};
pub use types::*;
