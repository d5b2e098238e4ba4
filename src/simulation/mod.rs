//! Simulated price feed for the demo binary

pub mod price_walk;
pub mod reporter;

pub use price_walk::*;
pub use reporter::*;
