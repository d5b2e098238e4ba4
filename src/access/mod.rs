//! Role checks, platform pause and reentrancy protection

pub mod roles;
pub mod reentrancy;

pub use roles::*;
pub use reentrancy::*;
