//! In-memory coordination tree adapter.

mod tree;

pub use tree::InMemoryConfigTree;
