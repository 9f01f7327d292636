//! `ZooKeeper` adapter for the coordination tree port.

mod tree;

pub use tree::ZooKeeperConfigTree;
