//! Adapter implementations of the coordination tree port.

pub mod memory;
pub mod zookeeper;
