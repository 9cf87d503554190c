//! Event recording and run manifest export.

use crate::config::{FixtureConfig, FixtureKind};
use crate::error::{FixtureError, Result};
use crate::generator::Corruption;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Something that happened during a fixture run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FixtureEvent {
    RunStarted {
        seed: u64,
        valid_count: u32,
        invalid_count: u32,
    },
    FixtureGenerated {
        index: u32,
        kind: FixtureKind,
        record_count: usize,
        depth: usize,
        line_count: usize,
        corruption: Option<Corruption>,
    },
    FixtureWritten {
        index: u32,
        path: PathBuf,
    },
    /// The fixture's label disagrees with its tree.
    AuditFailed {
        index: u32,
        expected: bool,
        actual: bool,
    },
    RunFinished {
        fixtures: u32,
        audit_failures: usize,
    },
}

/// Receiver of fixture events.
///
/// Implementations can collect events for a manifest, print them, or drop
/// them.
pub trait EventSink: Send + Sync + 'static {
    /// Called when an event occurs.
    fn emit(&self, event: FixtureEvent);

    /// Called once when the run finishes.
    fn flush(&self) {}
}

/// Sink that discards all events.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: FixtureEvent) {}
}

/// Recorder that keeps every event with a timestamp.
pub struct FixtureEventRecorder {
    events: Mutex<Vec<TimestampedEvent>>,
    start_time: Instant,
}

impl FixtureEventRecorder {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            start_time: Instant::now(),
        }
    }

    /// Get all recorded events.
    pub fn events(&self) -> Vec<TimestampedEvent> {
        self.events.lock().clone()
    }

    /// Take and clear all events.
    pub fn take(&self) -> Vec<TimestampedEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Default for FixtureEventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for FixtureEventRecorder {
    fn emit(&self, event: FixtureEvent) {
        let timestamp_us = self.start_time.elapsed().as_micros() as u64;
        self.events.lock().push(TimestampedEvent {
            timestamp_us,
            event,
        });
    }
}

/// Event with timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedEvent {
    /// Microseconds since the recorder was created.
    pub timestamp_us: u64,
    pub event: FixtureEvent,
}

/// Complete run record, written as the JSON manifest.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub config: FixtureConfig,
    pub seed: u64,
    pub events: Vec<TimestampedEvent>,
    pub stats: RunStats,
    pub metadata: RunMetadata,
}

impl RunRecord {
    /// Export to a JSON file, creating parent directories as needed.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| FixtureError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| FixtureError::io(path, e))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Summary statistics for a run.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub fixtures_written: u64,
    pub valid_fixtures: u64,
    pub invalid_fixtures: u64,
    pub total_records: u64,
    pub max_depth: u64,
    pub corruptions_applied: u64,
    pub corruptions_skipped: u64,
    pub audit_failures: u64,
}

impl RunStats {
    pub fn from_events(events: &[TimestampedEvent]) -> Self {
        let mut stats = RunStats::default();

        for event in events {
            match &event.event {
                FixtureEvent::FixtureGenerated {
                    kind,
                    record_count,
                    depth,
                    corruption,
                    ..
                } => {
                    match kind {
                        FixtureKind::Valid => stats.valid_fixtures += 1,
                        FixtureKind::Invalid => stats.invalid_fixtures += 1,
                    }
                    stats.total_records += *record_count as u64;
                    stats.max_depth = stats.max_depth.max(*depth as u64);
                    match corruption {
                        Some(Corruption::Swapped { .. }) => stats.corruptions_applied += 1,
                        Some(Corruption::Skipped { .. }) => stats.corruptions_skipped += 1,
                        None => {}
                    }
                }
                FixtureEvent::FixtureWritten { .. } => stats.fixtures_written += 1,
                FixtureEvent::AuditFailed { .. } => stats.audit_failures += 1,
                _ => {}
            }
        }

        stats
    }
}

/// Metadata for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub timestamp: String,
    pub duration_ms: u64,
    pub platform: String,
    pub generator_version: String,
}

impl RunMetadata {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            timestamp: unix_timestamp(),
            duration_ms,
            platform: std::env::consts::OS.to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Seconds since the Unix epoch, as text.
fn unix_timestamp() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_secs())
}
