//! Conditional insertion of API consumer credentials.

use crate::datastore::{
    domain::{ConsumerOverrides, ConsumerRecord, ConsumerScope, DatabaseSettings},
    ports::{DatabaseConnector, DatastoreResult, ProvisioningSession},
};
use mockable::Clock;
use std::sync::Arc;

/// Result of issuing one scope's credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeOutcome {
    /// A new row was inserted.
    Inserted(ConsumerRecord),
    /// A row for this client and scope already existed.
    AlreadyPresent,
}

impl ScopeOutcome {
    /// Returns the inserted record, if any.
    #[must_use]
    pub const fn inserted(&self) -> Option<&ConsumerRecord> {
        match self {
            Self::Inserted(record) => Some(record),
            Self::AlreadyPresent => None,
        }
    }
}

/// Outcome of [`CredentialIssuer::issue`] for both scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    /// Outcome for the `js` scope.
    pub js: ScopeOutcome,
    /// Outcome for the `all` scope.
    pub all: ScopeOutcome,
}

/// Registers `js` and `all` consumer credentials for clients.
#[derive(Debug)]
pub struct CredentialIssuer<D, C>
where
    D: DatabaseConnector,
    C: Clock + Send + Sync,
{
    connector: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> CredentialIssuer<D, C>
where
    D: DatabaseConnector,
    C: Clock + Send + Sync,
{
    /// Creates an issuer.
    #[must_use]
    pub const fn new(connector: Arc<D>, clock: Arc<C>) -> Self {
        Self { connector, clock }
    }

    /// Inserts a consumer row for `client` in each scope that has none.
    ///
    /// Scopes are handled independently, `js` first. Values missing from
    /// `overrides` are generated. Existing rows are never updated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::datastore::ports::DatastoreError`] when the server
    /// cannot be reached or a statement fails.
    pub async fn issue(
        &self,
        client: &str,
        settings: &DatabaseSettings,
        overrides: &ConsumerOverrides,
    ) -> DatastoreResult<IssuedCredentials> {
        let session = self.connector.connect(settings).await?;
        let js = self
            .issue_scope(&session, client, ConsumerScope::Js, overrides)
            .await?;
        let all = self
            .issue_scope(&session, client, ConsumerScope::All, overrides)
            .await?;
        Ok(IssuedCredentials { js, all })
    }

    async fn issue_scope(
        &self,
        session: &D::Session,
        client: &str,
        scope: ConsumerScope,
        overrides: &ConsumerOverrides,
    ) -> DatastoreResult<ScopeOutcome> {
        if session.consumer_exists(client, scope).await? {
            tracing::info!(client, %scope, "consumer key already present");
            return Ok(ScopeOutcome::AlreadyPresent);
        }

        let record =
            ConsumerRecord::issue(client, scope, overrides.credentials_for(scope), &*self.clock);
        session.insert_consumer(&record).await?;
        tracing::info!(
            client,
            %scope,
            consumer_key = record.consumer_key(),
            "consumer key added"
        );
        Ok(ScopeOutcome::Inserted(record))
    }
}
