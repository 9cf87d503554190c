//! Record generation, BST construction, and corruption.

mod corrupt;
mod record;
mod tree;

pub use corrupt::{corrupt, Corruption};
pub use record::{Record, RecordGenerator, RecordKey};
pub use tree::{Node, Tree};
