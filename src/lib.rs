//! Seeded generator of labeled fixtures for binary-search-tree checkers.
//!
//! This crate provides tools for:
//! - Generating employee records with unique `(department, id)` keys
//! - Building random-shaped BSTs over them from a seeded shuffle
//! - Corrupting a BST with a single payload swap
//! - Serializing trees to level-order text with `null` placeholders
//! - Writing numbered `test<N>/input.txt` + `output.txt` fixture pairs
//!
//! All randomness in a run comes from one seeded RNG, so a fixed seed and
//! configuration reproduce the same files byte for byte.

mod config;
mod error;
pub mod generator;
mod presets;
mod recorder;
mod runner;
mod serializer;
mod validator;

pub use config::{FixtureConfig, FixtureKind, DEFAULT_DEPARTMENTS, DEFAULT_JOB_TITLES};
pub use error::{FixtureError, Result};
pub use generator::{corrupt, Corruption, Node, Record, RecordGenerator, RecordKey, Tree};
pub use presets::Presets;
pub use recorder::{
    EventSink, FixtureEvent, FixtureEventRecorder, NullSink, RunMetadata, RunRecord, RunStats,
    TimestampedEvent,
};
pub use runner::{Fixture, FixtureRunner, FixtureSummary, RunResult, INPUT_FILE, OUTPUT_FILE};
pub use serializer::{serialize, NULL_TOKEN};
pub use validator::{audit, ValidationFailure, ValidationResult};
