//! Domain model for tenant clients.

mod client;
mod error;

pub use client::{ClientBinding, ClientDescriptor, setting_text};
pub use error::TenantDomainError;
