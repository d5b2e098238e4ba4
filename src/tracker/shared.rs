//! Shared handle for async callers

use std::sync::Arc;
use tokio::sync::RwLock;
use crate::events::{EventSink, MemoryEventSink};
use super::HeatTracker;

/// Writers take the lock for the whole call, so mutations never interleave.
pub type SharedTracker<S = MemoryEventSink> = Arc<RwLock<HeatTracker<S>>>;

pub fn share<S: EventSink>(tracker: HeatTracker<S>) -> SharedTracker<S> {
    Arc::new(RwLock::new(tracker))
}
