//! Adapter implementations of the database port.

pub mod memory;
pub mod mysql;
