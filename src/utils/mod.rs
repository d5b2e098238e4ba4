//! Utility functions and helpers

pub mod math;
pub mod logging;
pub mod display;
pub mod pagination;

pub use math::*;
pub use logging::*;
pub use display::*;
pub use pagination::*;
