//! Core data types and structures

pub mod symbol;
pub mod band;
pub mod observation;
pub mod context;
pub mod volatility;
pub mod outcome;

pub use symbol::*;
pub use band::*;
pub use observation::*;
pub use context::*;
pub use volatility::*;
pub use outcome::*;
