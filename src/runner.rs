//! Fixture orchestration: generate, corrupt, serialize, audit, write.

use crate::config::{FixtureConfig, FixtureKind};
use crate::error::{FixtureError, Result};
use crate::generator::{corrupt, Corruption, RecordGenerator, Tree};
use crate::recorder::{
    EventSink, FixtureEvent, FixtureEventRecorder, NullSink, RunMetadata, RunRecord, RunStats,
};
use crate::serializer::serialize;
use crate::validator::{audit, ValidationFailure, ValidationResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Name of the serialized tree file inside a fixture directory.
pub const INPUT_FILE: &str = "input.txt";
/// Name of the expected verdict file inside a fixture directory.
pub const OUTPUT_FILE: &str = "output.txt";

/// One generated test case, before it is written.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub index: u32,
    pub kind: FixtureKind,
    pub tree: Tree,
    pub lines: Vec<String>,
    /// `None` for valid fixtures, which are never corrupted.
    pub corruption: Option<Corruption>,
    /// Set when the label disagrees with the tree.
    pub audit_failure: Option<ValidationFailure>,
}

impl Fixture {
    /// Directory of this fixture under `root`.
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(format!("test{}", self.index))
    }

    /// Contents of `input.txt`: every line newline-terminated.
    pub fn input_text(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }

    /// Contents of `output.txt`.
    pub fn output_text(&self) -> &'static str {
        if self.kind.expected_verdict() {
            "true\n"
        } else {
            "false\n"
        }
    }

    /// Write `input.txt` and `output.txt` under `root/test<N>`.
    pub fn write_to(&self, root: &Path) -> Result<PathBuf> {
        let dir = self.dir(root);
        std::fs::create_dir_all(&dir).map_err(|e| FixtureError::io(&dir, e))?;

        let input = dir.join(INPUT_FILE);
        std::fs::write(&input, self.input_text()).map_err(|e| FixtureError::io(&input, e))?;

        let output = dir.join(OUTPUT_FILE);
        std::fs::write(&output, self.output_text()).map_err(|e| FixtureError::io(&output, e))?;

        Ok(dir)
    }

    pub fn summary(&self) -> FixtureSummary {
        FixtureSummary {
            index: self.index,
            kind: self.kind,
            record_count: self.tree.len(),
            depth: self.tree.depth(),
            line_count: self.lines.len(),
            corruption: self.corruption,
        }
    }
}

/// Compact description of a written fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSummary {
    pub index: u32,
    pub kind: FixtureKind,
    pub record_count: usize,
    pub depth: usize,
    pub line_count: usize,
    pub corruption: Option<Corruption>,
}

/// Result of a fixture run.
#[derive(Debug, Default, Clone)]
pub struct RunResult {
    pub fixtures: Vec<FixtureSummary>,
    pub validation_successes: u32,
    pub validation_failures: Vec<ValidationFailure>,
    pub total_duration: Duration,
}

impl RunResult {
    /// True when every fixture's label matches its tree.
    pub fn is_success(&self) -> bool {
        self.validation_failures.is_empty()
    }

    fn merge_validation(&mut self, result: ValidationResult) {
        self.validation_successes += result.successes;
        self.validation_failures.extend(result.failures);
    }
}

/// Fixture generator driven by a single seeded RNG.
pub struct FixtureRunner {
    config: FixtureConfig,
    rng: ChaCha8Rng,
    sink: Arc<dyn EventSink>,
    recorder: Option<Arc<FixtureEventRecorder>>,
}

impl FixtureRunner {
    /// Validate `config` and seed the run RNG.
    ///
    /// Events are recorded when the config names a manifest path.
    pub fn new(config: FixtureConfig) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);

        let recorder = config
            .manifest_path
            .as_ref()
            .map(|_| Arc::new(FixtureEventRecorder::new()));
        let sink: Arc<dyn EventSink> = match &recorder {
            Some(recorder) => recorder.clone(),
            None => Arc::new(NullSink),
        };

        Ok(Self {
            config,
            rng,
            sink,
            recorder,
        })
    }

    /// Send events to `sink` instead of the default recorder or null sink.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self.recorder = None;
        self
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Get the recorder (if the config asked for a manifest).
    pub fn recorder(&self) -> Option<&Arc<FixtureEventRecorder>> {
        self.recorder.as_ref()
    }

    /// Generate every configured fixture and write it under the output root.
    ///
    /// Valid fixtures come first, numbered from `start_index`, followed by
    /// the invalid ones. The first I/O error aborts the run. In strict mode
    /// so does the first fixture whose label disagrees with its tree; that
    /// fixture is still written, and so is the manifest.
    pub fn run(&mut self) -> Result<RunResult> {
        let start = Instant::now();
        let mut result = RunResult::default();
        let root = self.config.output_dir.clone();
        std::fs::create_dir_all(&root).map_err(|e| FixtureError::io(&root, e))?;

        self.sink.emit(FixtureEvent::RunStarted {
            seed: self.config.seed,
            valid_count: self.config.valid_count,
            invalid_count: self.config.invalid_count,
        });

        let mut index = self.config.start_index;
        let mut mismatch = None;
        'kinds: for kind in [FixtureKind::Valid, FixtureKind::Invalid] {
            let count = match kind {
                FixtureKind::Valid => self.config.valid_count,
                FixtureKind::Invalid => self.config.invalid_count,
            };
            for ordinal in 0..count {
                let range = self.config.range_for(kind, ordinal);
                let fixture = self.generate_fixture(kind, index, range)?;

                let path = fixture.write_to(&root)?;
                self.sink.emit(FixtureEvent::FixtureWritten { index, path });

                let mut validation = ValidationResult::default();
                validation.record(fixture.audit_failure.clone());
                result.merge_validation(validation);
                result.fixtures.push(fixture.summary());

                if self.config.strict {
                    if let Some(failure) = &fixture.audit_failure {
                        mismatch = Some(FixtureError::LabelMismatch {
                            index: failure.index,
                            expected: failure.expected,
                            actual: failure.actual,
                        });
                        break 'kinds;
                    }
                }

                index += 1;
            }
        }

        self.sink.emit(FixtureEvent::RunFinished {
            fixtures: result.fixtures.len() as u32,
            audit_failures: result.validation_failures.len(),
        });
        self.sink.flush();
        result.total_duration = start.elapsed();

        if let Some(path) = self.config.manifest_path.clone() {
            self.export_run_record(&result).export_to_file(&path)?;
        }

        match mismatch {
            Some(err) => Err(err),
            None => Ok(result),
        }
    }

    /// Build one fixture in memory.
    ///
    /// Draws, in order: the record count from `range`, the records, the
    /// insertion shuffle, and for invalid fixtures the two swap positions.
    pub fn generate_fixture(
        &mut self,
        kind: FixtureKind,
        index: u32,
        range: RangeInclusive<usize>,
    ) -> Result<Fixture> {
        if range.is_empty() {
            return Err(FixtureError::invalid_config(format!(
                "empty employee range for test{index}"
            )));
        }
        let count = self.rng.gen_range(range);
        let records = RecordGenerator::new(&self.config)?.generate_batch(&mut self.rng, count)?;

        let mut tree = Tree::build(records, &mut self.rng);
        let corruption = match kind {
            FixtureKind::Valid => None,
            FixtureKind::Invalid => Some(corrupt(&mut tree, &mut self.rng)),
        };
        let lines = serialize(&tree);
        let audit_failure = audit(index, kind, &tree);

        let fixture = Fixture {
            index,
            kind,
            tree,
            lines,
            corruption,
            audit_failure,
        };

        self.sink.emit(FixtureEvent::FixtureGenerated {
            index,
            kind,
            record_count: fixture.tree.len(),
            depth: fixture.tree.depth(),
            line_count: fixture.lines.len(),
            corruption,
        });
        if let Some(failure) = &fixture.audit_failure {
            self.sink.emit(FixtureEvent::AuditFailed {
                index,
                expected: failure.expected,
                actual: failure.actual,
            });
        }

        Ok(fixture)
    }

    /// Export run record.
    pub fn export_run_record(&self, result: &RunResult) -> RunRecord {
        let events = self
            .recorder
            .as_ref()
            .map(|r| r.events())
            .unwrap_or_default();
        let stats = RunStats::from_events(&events);

        RunRecord {
            config: self.config.clone(),
            seed: self.config.seed,
            events,
            stats,
            metadata: RunMetadata::new(result.total_duration.as_millis() as u64),
        }
    }
}
