//! Level-order text serialization of trees.

use crate::generator::{Node, Tree};

/// Token written for an absent child slot.
pub const NULL_TOKEN: &str = "null";

/// Serialize `tree` into one line per level, left to right.
///
/// Each slot is either the record line of a node or [`NULL_TOKEN`]. Only
/// children of present nodes become slots of the next level, and trailing
/// absent slots are dropped before that level is rendered, so interior `null`s
/// survive while a line never ends in one. A level with no present node ends
/// the output. The empty tree serializes to no lines.
pub fn serialize(tree: &Tree) -> Vec<String> {
    let mut lines = Vec::new();
    let mut level: Vec<Option<&Node>> = tree.root().into_iter().map(Some).collect();

    while !level.is_empty() {
        let mut parts = Vec::with_capacity(level.len());
        let mut next = Vec::with_capacity(level.len() * 2);

        for slot in &level {
            match slot {
                Some(node) => {
                    parts.push(node.record.to_string());
                    next.push(node.left.as_deref());
                    next.push(node.right.as_deref());
                }
                None => parts.push(NULL_TOKEN.to_string()),
            }
        }

        if level.iter().any(Option::is_some) {
            lines.push(parts.join(" "));
        } else {
            break;
        }

        while matches!(next.last(), Some(None)) {
            next.pop();
        }
        level = next;
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Record;

    fn record(name: &str, id: u32) -> Record {
        Record {
            name: name.to_string(),
            department: "HR".to_string(),
            id_in_department: id,
            job_title: "Junior".to_string(),
            salary: 1500,
        }
    }

    fn tree_of(ids: &[u32]) -> Tree {
        let mut tree = Tree::new();
        for &id in ids {
            tree.insert(record(&format!("n{id}"), id));
        }
        tree
    }

    #[test]
    fn test_empty_tree_has_no_lines() {
        assert!(serialize(&Tree::new()).is_empty());
    }

    #[test]
    fn test_single_node() {
        assert_eq!(serialize(&tree_of(&[4])), vec!["n4,HR,4,Junior,1500"]);
    }

    #[test]
    fn test_root_with_left_child() {
        let mut tree = Tree::new();
        tree.insert(record("name2", 2));
        tree.insert(record("name1", 1));
        assert_eq!(
            serialize(&tree),
            vec!["name2,HR,2,Junior,1500", "name1,HR,1,Junior,1500"]
        );
    }

    #[test]
    fn test_trailing_nulls_trimmed_interior_kept() {
        //      5
        //    /   \
        //   3     8
        //    \   /
        //     4 7
        let lines = serialize(&tree_of(&[5, 3, 8, 4, 7]));
        assert_eq!(
            lines,
            vec![
                "n5,HR,5,Junior,1500",
                "n3,HR,3,Junior,1500 n8,HR,8,Junior,1500",
                "null n4,HR,4,Junior,1500 n7,HR,7,Junior,1500",
            ]
        );
    }

    #[test]
    fn test_right_skewed_chain() {
        let lines = serialize(&tree_of(&[1, 2, 3]));
        assert_eq!(
            lines,
            vec![
                "n1,HR,1,Junior,1500",
                "null n2,HR,2,Junior,1500",
                "null n3,HR,3,Junior,1500",
            ]
        );
    }

    #[test]
    fn test_null_slots_only_under_present_parents() {
        //     4
        //    / \
        //   2   6
        //  /     \
        // 1       7
        let lines = serialize(&tree_of(&[4, 2, 6, 1, 7]));
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "n1,HR,1,Junior,1500 null null n7,HR,7,Junior,1500"
        );
    }

    #[test]
    fn test_lines_never_end_in_null() {
        let lines = serialize(&tree_of(&[10, 5, 15, 3, 12, 1, 20, 11]));
        for line in &lines {
            assert!(!line.ends_with(NULL_TOKEN), "line ends with null: {line}");
        }
    }
}
