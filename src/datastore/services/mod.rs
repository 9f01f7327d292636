//! Provisioning services for client schemas and consumer credentials.

mod issuer;
mod provisioner;

pub use issuer::{CredentialIssuer, IssuedCredentials, ScopeOutcome};
pub use provisioner::{SchemaOutcome, SchemaProvisionError, SchemaProvisioner};
