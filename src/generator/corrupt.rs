//! Deliberate BST violations.

use super::tree::Tree;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What `corrupt` did to a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Corruption {
    /// Payloads at these two in-order positions were exchanged.
    Swapped { first: usize, second: usize },
    /// Fewer than two nodes; the tree was left as is.
    Skipped { len: usize },
}

impl Corruption {
    pub fn is_applied(&self) -> bool {
        matches!(self, Corruption::Swapped { .. })
    }
}

/// Swap the records of two distinct nodes chosen uniformly at random.
///
/// The shape is untouched, so only the payload-to-position mapping changes.
/// Since the in-order sequence of a BST is strictly increasing, exchanging
/// any two positions leaves an inversion between some ancestor and
/// descendant. Trees with fewer than two nodes are returned unchanged and
/// reported as [`Corruption::Skipped`].
pub fn corrupt<R: Rng>(tree: &mut Tree, rng: &mut R) -> Corruption {
    let mut records = tree.records_in_order_mut();
    let len = records.len();
    if len < 2 {
        return Corruption::Skipped { len };
    }

    let picked = index::sample(rng, len, 2);
    let (a, b) = (picked.index(0), picked.index(1));
    let (first, second) = (a.min(b), a.max(b));

    let (head, tail) = records.split_at_mut(second);
    std::mem::swap(&mut *head[first], &mut *tail[0]);

    Corruption::Swapped { first, second }
}
