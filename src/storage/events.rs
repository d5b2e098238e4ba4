//! Notification log storage

use anyhow::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use crate::events::{EventRecord, EventSink};

pub fn event_log_path(dir: &Path) -> PathBuf {
    dir.join(format!("events_{}.jsonl", Utc::now().format("%Y-%m-%d")))
}

pub fn save_event(dir: &Path, record: &EventRecord) -> Result<()> {
    let filename = event_log_path(dir);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)?;

    writeln!(file, "{}", serde_json::to_string(record)?)?;

    debug!(
        event_id = %record.id,
        event = record.event.name(),
        block = record.block,
        "Saved event"
    );

    Ok(())
}

/// Appends every event as one JSON line to a daily file.
#[derive(Debug)]
pub struct JsonlEventSink {
    dir: PathBuf,
    pub failures: u64,
}

impl JsonlEventSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, failures: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl EventSink for JsonlEventSink {
    fn publish(&mut self, record: &EventRecord) {
        if let Err(e) = save_event(&self.dir, record) {
            self.failures += 1;
            error!("Failed to save event {}: {}", record.event.name(), e);
        }
    }
}
