//! Self-audit of generated fixtures.
//!
//! Every fixture carries an expected verdict. The audit compares that verdict
//! with the actual ordering of the tree it was written from, so a fixture
//! whose label would mislead a checker is reported instead of silently
//! shipped.

use crate::config::FixtureKind;
use crate::generator::Tree;
use serde::{Deserialize, Serialize};

/// A fixture whose label disagrees with its tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Fixture directory number.
    pub index: u32,
    /// Verdict written to `output.txt`.
    pub expected: bool,
    /// Whether the tree actually is a valid BST.
    pub actual: bool,
    /// Node count of the tree.
    pub node_count: usize,
}

/// Check one fixture's label against its tree.
pub fn audit(index: u32, kind: FixtureKind, tree: &Tree) -> Option<ValidationFailure> {
    let expected = kind.expected_verdict();
    let actual = tree.is_ordered();
    (expected != actual).then(|| ValidationFailure {
        index,
        expected,
        actual,
        node_count: tree.len(),
    })
}

/// Result of auditing a batch of fixtures.
#[derive(Debug, Default, Clone)]
pub struct ValidationResult {
    pub successes: u32,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn record(&mut self, outcome: Option<ValidationFailure>) {
        match outcome {
            Some(failure) => self.failures.push(failure),
            None => self.successes += 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{corrupt, Record};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tree_of(ids: &[u32]) -> Tree {
        let mut tree = Tree::new();
        for &id in ids {
            tree.insert(Record {
                name: "z".to_string(),
                department: "IT".to_string(),
                id_in_department: id,
                job_title: "Executive".to_string(),
                salary: 3000,
            });
        }
        tree
    }

    #[test]
    fn test_valid_tree_labeled_true_passes() {
        assert_eq!(audit(9, FixtureKind::Valid, &tree_of(&[2, 1, 3])), None);
    }

    #[test]
    fn test_corrupted_tree_labeled_false_passes() {
        let mut tree = tree_of(&[2, 1, 3]);
        corrupt(&mut tree, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(audit(12, FixtureKind::Invalid, &tree), None);
    }

    #[test]
    fn test_single_node_labeled_false_is_reported() {
        let mut tree = tree_of(&[1]);
        let outcome = corrupt(&mut tree, &mut ChaCha8Rng::seed_from_u64(5));
        assert!(!outcome.is_applied());

        let failure = audit(14, FixtureKind::Invalid, &tree).unwrap();
        assert_eq!(
            failure,
            ValidationFailure {
                index: 14,
                expected: false,
                actual: true,
                node_count: 1,
            }
        );
    }

    #[test]
    fn test_result_tallies() {
        let mut result = ValidationResult::default();
        result.record(None);
        result.record(audit(3, FixtureKind::Invalid, &tree_of(&[])));
        assert_eq!(result.successes, 1);
        assert_eq!(result.failures.len(), 1);
        assert!(!result.is_success());
    }
}
