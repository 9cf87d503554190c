//! Employee records and their unique random generation.

use crate::config::FixtureConfig;
use crate::error::{FixtureError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Ordering key of a record: department first, then id within the department.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub department: String,
    pub id_in_department: u32,
}

impl RecordKey {
    pub fn new(department: impl Into<String>, id_in_department: u32) -> Self {
        Self {
            department: department.into(),
            id_in_department,
        }
    }
}

/// Payload stored at each tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub department: String,
    pub id_in_department: u32,
    pub job_title: String,
    pub salary: u32,
}

impl Record {
    /// Owned copy of this record's key.
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.department.clone(), self.id_in_department)
    }

    /// Compare keys without allocating.
    pub fn key_cmp(&self, other: &Record) -> Ordering {
        (self.department.as_str(), self.id_in_department)
            .cmp(&(other.department.as_str(), other.id_in_department))
    }
}

/// Renders the record line `name,department,id,job_title,salary`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.name, self.department, self.id_in_department, self.job_title, self.salary
        )
    }
}

/// Produces records whose keys are unique within one `used_keys` set.
pub struct RecordGenerator<'a> {
    config: &'a FixtureConfig,
    capacity: usize,
}

impl<'a> RecordGenerator<'a> {
    /// Validates `config` so sampling never sees an empty enumeration or range.
    pub fn new(config: &'a FixtureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            capacity: config.key_space(),
            config,
        })
    }

    /// Number of distinct keys this generator can hand out per `used_keys` set.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Generate one record with a key absent from `used_keys`, then add its key.
    ///
    /// The key is resampled until it is fresh; the remaining fields are only
    /// sampled once the key is committed.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        used_keys: &mut HashSet<RecordKey>,
    ) -> Result<Record> {
        if used_keys.len() >= self.capacity {
            return Err(FixtureError::KeySpaceExhausted {
                requested: used_keys.len() + 1,
                capacity: self.capacity,
            });
        }

        let key = loop {
            let department = pick(rng, &self.config.departments);
            let id_in_department = rng.gen_range(self.config.id_range.clone());
            let key = RecordKey::new(department, id_in_department);
            if !used_keys.contains(&key) {
                break key;
            }
        };
        used_keys.insert(key.clone());

        let name_len = rng.gen_range(self.config.name_length.clone());
        let name = random_lowercase(rng, name_len);
        let job_title = pick(rng, &self.config.job_titles).to_string();
        let salary = rng.gen_range(self.config.salary_range.clone());

        Ok(Record {
            name,
            department: key.department,
            id_in_department: key.id_in_department,
            job_title,
            salary,
        })
    }

    /// Generate `count` records with keys unique among themselves.
    pub fn generate_batch<R: Rng>(&self, rng: &mut R, count: usize) -> Result<Vec<Record>> {
        let mut used_keys = HashSet::with_capacity(count);
        (0..count)
            .map(|_| self.generate(rng, &mut used_keys))
            .collect()
    }
}

// Callers guarantee `values` is non-empty (checked by `FixtureConfig::validate`).
fn pick<'v, R: Rng>(rng: &mut R, values: &'v [String]) -> &'v str {
    &values[rng.gen_range(0..values.len())]
}

fn random_lowercase<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}
