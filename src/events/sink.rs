//! Event sinks

use tracing::{info, warn};
use super::{EventRecord, TrackerEvent};

/// Receives every committed event, in emission order.
pub trait EventSink: Send + Sync {
    fn publish(&mut self, record: &EventRecord);
}

/// Keeps every record in memory. Used by tests and dashboards polling in-process.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    pub records: Vec<EventRecord>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> impl Iterator<Item = &TrackerEvent> {
        self.records.iter().map(|record| &record.event)
    }

    pub fn count(&self, name: &str) -> usize {
        self.events().filter(|event| event.name() == name).count()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl EventSink for MemoryEventSink {
    fn publish(&mut self, record: &EventRecord) {
        self.records.push(record.clone());
    }
}

/// Forwards events to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&mut self, record: &EventRecord) {
        match &record.event {
            TrackerEvent::BandCrossed { symbol, from, to } if to > from && to.is_elevated() => {
                warn!(%symbol, %from, %to, block = record.block, "🔥 Band crossed");
            }
            TrackerEvent::VolatilitySpike { symbol, band, volatility_e8 } => {
                warn!(%symbol, %band, volatility_e8, block = record.block, "⚠️  Volatility spike");
            }
            TrackerEvent::PriceReported { .. }
            | TrackerEvent::SnapshotAppended { .. }
            | TrackerEvent::HeatLevelChanged { .. } => {
                tracing::debug!(event = record.event.name(), block = record.block, "Event");
            }
            other => {
                info!(event = other.name(), block = record.block, "Event");
            }
        }
    }
}

/// Publishes each record to every inner sink.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl EventSink for FanoutSink {
    fn publish(&mut self, record: &EventRecord) {
        for sink in &mut self.sinks {
            sink.publish(record);
        }
    }
}
