//! Domain model for relational provisioning.
//!
//! Connection settings, schema identifiers, and API consumer records, kept
//! free of any database client types.

mod consumer;
mod error;
mod schema;
mod settings;

pub use consumer::{
    CREDENTIAL_LENGTH, ConsumerCredentials, ConsumerOverrides, ConsumerRecord, ConsumerScope,
    generate_credential, generate_credential_with,
};
pub use error::DatastoreDomainError;
pub use schema::{SchemaName, SchemaScript, SchemaScriptKind};
pub use settings::DatabaseSettings;
