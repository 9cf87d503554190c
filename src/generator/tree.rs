//! Binary search tree over employee records.

use super::record::{Record, RecordKey};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// Node of the tree. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub record: Record,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }
}

/// Binary tree of records, built as a BST but not required to stay one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    root: Option<Box<Node>>,
    len: usize,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing node structure, e.g. one read back from fixture text.
    pub fn from_root(root: Option<Box<Node>>) -> Self {
        fn count(node: Option<&Node>) -> usize {
            node.map_or(0, |n| 1 + count(n.left.as_deref()) + count(n.right.as_deref()))
        }
        let len = count(root.as_deref());
        Self { root, len }
    }

    /// Shuffle `records` with `rng` and insert them in that order.
    ///
    /// Any insertion order yields a valid BST; the order only decides the shape.
    pub fn build<R: Rng>(mut records: Vec<Record>, rng: &mut R) -> Self {
        records.shuffle(rng);
        let mut tree = Self::new();
        for record in records {
            tree.insert(record);
        }
        tree
    }

    /// Standard BST insertion: smaller keys go left, everything else right.
    pub fn insert(&mut self, record: Record) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match record.key_cmp(&node.record) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *slot = Some(Box::new(Node::new(record)));
        self.len += 1;
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Records in in-order (left, node, right) sequence.
    pub fn in_order(&self) -> Vec<&Record> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = self.root();

        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push(&node.record);
                current = node.right.as_deref();
            }
        }

        out
    }

    pub fn keys_in_order(&self) -> Vec<RecordKey> {
        self.in_order().into_iter().map(Record::key).collect()
    }

    /// Mutable in-order access to every record, for payload swaps.
    pub(crate) fn records_in_order_mut(&mut self) -> Vec<&mut Record> {
        fn walk<'a>(slot: &'a mut Option<Box<Node>>, out: &mut Vec<&'a mut Record>) {
            if let Some(node) = slot {
                let Node {
                    record,
                    left,
                    right,
                } = &mut **node;
                walk(left, out);
                out.push(record);
                walk(right, out);
            }
        }

        let mut out = Vec::with_capacity(self.len);
        walk(&mut self.root, &mut out);
        out
    }

    /// True when in-order keys are strictly increasing, i.e. the tree is a
    /// valid BST with distinct keys.
    pub fn is_ordered(&self) -> bool {
        self.in_order()
            .windows(2)
            .all(|pair| pair[0].key_cmp(pair[1]) == Ordering::Less)
    }

    /// Number of levels (0 for the empty tree).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut level: Vec<&Node> = self.root().into_iter().collect();
        while !level.is_empty() {
            depth += 1;
            level = level
                .iter()
                .flat_map(|node| [node.left.as_deref(), node.right.as_deref()])
                .flatten()
                .collect();
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FixtureConfig;
    use crate::generator::RecordGenerator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn record(name: &str, department: &str, id: u32) -> Record {
        Record {
            name: name.to_string(),
            department: department.to_string(),
            id_in_department: id,
            job_title: "Senior".to_string(),
            salary: 2500,
        }
    }

    fn count_nodes(node: Option<&Node>) -> usize {
        match node {
            None => 0,
            Some(n) => 1 + count_nodes(n.left.as_deref()) + count_nodes(n.right.as_deref()),
        }
    }

    #[test]
    fn test_insert_places_smaller_left() {
        let mut tree = Tree::new();
        tree.insert(record("name2", "HR", 2));
        tree.insert(record("name1", "HR", 1));

        let root = tree.root().unwrap();
        assert_eq!(root.record.key(), RecordKey::new("HR", 2));
        assert_eq!(
            root.left.as_ref().unwrap().record.key(),
            RecordKey::new("HR", 1)
        );
        assert!(root.right.is_none());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_equal_keys_go_right() {
        let mut tree = Tree::new();
        tree.insert(record("a", "IT", 5));
        tree.insert(record("b", "IT", 5));

        let root = tree.root().unwrap();
        assert!(root.left.is_none());
        assert_eq!(root.right.as_ref().unwrap().record.name, "b");
        // Duplicates make the order non-strict.
        assert!(!tree.is_ordered());
    }

    #[test]
    fn test_from_root_counts_nodes() {
        let mut root = Node::new(record("b", "HR", 2));
        root.left = Some(Box::new(Node::new(record("a", "HR", 1))));
        root.right = Some(Box::new(Node::new(record("c", "HR", 3))));

        let tree = Tree::from_root(Some(Box::new(root)));
        assert_eq!(tree.len(), 3);
        assert!(tree.is_ordered());
        assert_eq!(Tree::from_root(None), Tree::new());
    }

    #[test]
    fn test_empty_tree() {
        let tree = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.in_order().is_empty());
        assert!(tree.is_ordered());
    }

    #[test]
    fn test_built_trees_are_ordered_with_all_nodes() {
        let config = FixtureConfig::default();
        let generator = RecordGenerator::new(&config).unwrap();

        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let count = rng.gen_range(1..=60);
            let records = generator.generate_batch(&mut rng, count).unwrap();
            let mut expected = records.iter().map(Record::key).collect::<Vec<_>>();
            expected.sort();

            let tree = Tree::build(records, &mut rng);
            assert!(tree.is_ordered(), "seed {seed} produced an unordered tree");
            assert_eq!(tree.len(), count);
            assert_eq!(count_nodes(tree.root()), count);
            assert_eq!(tree.keys_in_order(), expected);
        }
    }

    #[test]
    fn test_shuffle_varies_shape() {
        let records: Vec<_> = (1..=15).map(|id| record("x", "HR", id)).collect();
        let shapes: std::collections::HashSet<usize> = (0..20)
            .map(|seed| Tree::build(records.clone(), &mut ChaCha8Rng::seed_from_u64(seed)).depth())
            .collect();
        assert!(shapes.len() > 1, "every seed produced the same depth");
    }

    #[test]
    fn test_records_in_order_mut_matches_in_order() {
        let mut tree = Tree::new();
        for id in [5, 3, 8, 1, 4, 9] {
            tree.insert(record("n", "Sales", id));
        }
        let ids: Vec<u32> = tree
            .records_in_order_mut()
            .into_iter()
            .map(|r| r.id_in_department)
            .collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 8, 9]);
    }

    #[test]
    fn test_deep_skewed_tree() {
        let mut tree = Tree::new();
        for id in 1..=2000 {
            tree.insert(record("n", "HR", id));
        }
        assert_eq!(tree.depth(), 2000);
        assert_eq!(tree.in_order().len(), 2000);
        assert!(tree.is_ordered());
    }
}
