//! Configuration types for fixture generation.

use crate::error::{FixtureError, Result};
use crate::serializer::NULL_TOKEN;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Default department enumeration.
pub const DEFAULT_DEPARTMENTS: [&str; 7] = [
    "HR",
    "Finance",
    "Engineering",
    "Marketing",
    "Sales",
    "IT",
    "Management",
];

/// Default job-title enumeration.
pub const DEFAULT_JOB_TITLES: [&str; 6] = [
    "Junior",
    "Midlevel",
    "Senior",
    "Director",
    "Executive",
    "God",
];

/// Complete configuration for a fixture run.
///
/// Every field has a default, so a JSON config file only needs to name the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    // === Layout ===
    /// Root directory that receives the `test<N>` directories.
    pub output_dir: PathBuf,

    /// Number of the first fixture directory.
    pub start_index: u32,

    /// Number of fixtures labeled `true`.
    pub valid_count: u32,

    /// Number of fixtures labeled `false`.
    pub invalid_count: u32,

    // === Tree sizes ===
    /// Employee count range for ordinary fixtures.
    pub employee_range: RangeInclusive<usize>,

    /// Employee count range for the last valid and the last invalid fixture.
    pub special_range: RangeInclusive<usize>,

    // === Record payloads ===
    pub departments: Vec<String>,

    pub job_titles: Vec<String>,

    /// Range of `id_in_department`.
    pub id_range: RangeInclusive<u32>,

    /// Range of generated name lengths.
    pub name_length: RangeInclusive<usize>,

    pub salary_range: RangeInclusive<u32>,

    // === RNG ===
    /// Seed of the single RNG driving the whole run.
    pub seed: u64,

    // === Audit ===
    /// Abort the run when a fixture's label disagrees with its tree.
    pub strict: bool,

    /// Where to write the JSON run manifest (None = no manifest).
    pub manifest_path: Option<PathBuf>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("tests"),
            start_index: 9,
            valid_count: 3,
            invalid_count: 3,
            employee_range: 20..=30,
            special_range: 200..=300,
            departments: DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
            job_titles: DEFAULT_JOB_TITLES.iter().map(|j| j.to_string()).collect(),
            id_range: 1..=200,
            name_length: 1..=5,
            salary_range: 1000..=5000,
            seed: 123,
            strict: false,
            manifest_path: None,
        }
    }
}

impl FixtureConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::default().overlay_json_file(path)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::default().overlay_json_str(text)
    }

    /// Replace the fields named in a JSON config file, keeping every other
    /// field of `self`.
    pub fn overlay_json_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
        self.overlay_json_str(&text)
    }

    /// Replace the top-level fields present in the JSON object `text`.
    ///
    /// Ranges are replaced whole, so a range given in `text` needs both
    /// `start` and `end`.
    pub fn overlay_json_str(self, text: &str) -> Result<Self> {
        let Value::Object(fields) = serde_json::from_str::<Value>(text)? else {
            return Err(FixtureError::invalid_config(
                "config file must contain a JSON object",
            ));
        };
        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(base) = &mut merged {
            base.extend(fields);
        }
        Ok(serde_json::from_value(merged)?)
    }

    // === Builder methods ===

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_start_index(mut self, index: u32) -> Self {
        self.start_index = index;
        self
    }

    pub fn with_valid_count(mut self, count: u32) -> Self {
        self.valid_count = count;
        self
    }

    pub fn with_invalid_count(mut self, count: u32) -> Self {
        self.invalid_count = count;
        self
    }

    pub fn with_employee_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.employee_range = range;
        self
    }

    pub fn with_special_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.special_range = range;
        self
    }

    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_job_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_id_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.id_range = range;
        self
    }

    pub fn with_name_length(mut self, range: RangeInclusive<usize>) -> Self {
        self.name_length = range;
        self
    }

    pub fn with_salary_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.salary_range = range;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    /// Number of distinct `(department, id)` keys available to one fixture.
    pub fn key_space(&self) -> usize {
        let ids = if self.id_range.is_empty() {
            0
        } else {
            (*self.id_range.end() - *self.id_range.start()) as usize + 1
        };
        self.departments.len() * ids
    }

    /// Employee count range for the `ordinal`-th fixture of `kind`.
    ///
    /// The last fixture of each kind uses the special range.
    pub fn range_for(&self, kind: FixtureKind, ordinal: u32) -> RangeInclusive<usize> {
        let count = match kind {
            FixtureKind::Valid => self.valid_count,
            FixtureKind::Invalid => self.invalid_count,
        };
        if ordinal + 1 == count {
            self.special_range.clone()
        } else {
            self.employee_range.clone()
        }
    }

    /// Total number of fixtures a run writes, `None` if it overflows `u32`.
    pub fn total_fixtures(&self) -> Option<u32> {
        self.valid_count.checked_add(self.invalid_count)
    }

    /// Check every constraint the generator relies on.
    pub fn validate(&self) -> Result<()> {
        // The runner advances the index once past the last fixture.
        if self
            .total_fixtures()
            .and_then(|total| self.start_index.checked_add(total))
            .is_none()
        {
            return Err(FixtureError::invalid_config(format!(
                "start_index {} plus {} valid and {} invalid fixtures overflows the test index",
                self.start_index, self.valid_count, self.invalid_count
            )));
        }

        validate_tokens("departments", &self.departments)?;
        validate_tokens("job_titles", &self.job_titles)?;

        for (name, empty) in [
            ("employee_range", self.employee_range.is_empty()),
            ("special_range", self.special_range.is_empty()),
            ("id_range", self.id_range.is_empty()),
            ("name_length", self.name_length.is_empty()),
            ("salary_range", self.salary_range.is_empty()),
        ] {
            if empty {
                return Err(FixtureError::invalid_config(format!(
                    "{name} must have min <= max"
                )));
            }
        }

        if *self.name_length.start() == 0 {
            return Err(FixtureError::invalid_config(
                "name_length must start at 1 or more",
            ));
        }

        let capacity = self.key_space();
        for (name, range) in [
            ("employee_range", &self.employee_range),
            ("special_range", &self.special_range),
        ] {
            if *range.end() > capacity {
                return Err(FixtureError::invalid_config(format!(
                    "{name} max {} exceeds the key space of {capacity}",
                    range.end()
                )));
            }
        }

        Ok(())
    }
}

/// Values end up inside space-separated, comma-separated lines, so they must
/// not contain either separator or collide with the `null` token.
fn validate_tokens(field: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(FixtureError::invalid_config(format!(
            "{field} must not be empty"
        )));
    }
    for value in values {
        if value.is_empty()
            || value == NULL_TOKEN
            || value.contains(',')
            || value.chars().any(char::is_whitespace)
        {
            return Err(FixtureError::invalid_config(format!(
                "{field} entry {value:?} must be non-empty, not {NULL_TOKEN:?}, and free of commas and whitespace"
            )));
        }
    }
    Ok(())
}

/// Expected verdict of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    /// Built tree written as-is, labeled `true`.
    Valid,
    /// Built tree corrupted before writing, labeled `false`.
    Invalid,
}

impl FixtureKind {
    pub fn name(&self) -> &'static str {
        match self {
            FixtureKind::Valid => "valid",
            FixtureKind::Invalid => "invalid",
        }
    }

    /// The verdict written to `output.txt`.
    pub fn expected_verdict(&self) -> bool {
        matches!(self, FixtureKind::Valid)
    }
}
