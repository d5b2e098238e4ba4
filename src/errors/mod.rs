//! Error taxonomy and caller-side recovery classification

pub mod tracker_error;
pub mod recovery;

pub use tracker_error::*;
pub use recovery::*;
