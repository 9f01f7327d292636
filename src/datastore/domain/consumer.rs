//! API consumer credential records.

use chrono::{DateTime, Utc};
use mockable::Clock;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of generated consumer keys and secrets.
pub const CREDENTIAL_LENGTH: usize = 20;

const CREDENTIAL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Access scope of a consumer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerScope {
    /// Browser-side access: a consumer key with no secret.
    Js,
    /// Full REST API access: a consumer key and secret.
    All,
}

impl ConsumerScope {
    /// Returns the persisted scope value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ConsumerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consumer key and secret pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
    key: String,
    secret: String,
}

impl ConsumerCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Returns the consumer key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the consumer secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Pre-supplied credential values used instead of generated ones.
///
/// The same overrides apply to every client provisioned in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerOverrides {
    /// Consumer key for the `js` scope.
    pub js_consumer_key: Option<String>,
    /// Consumer key for the `all` scope.
    pub all_consumer_key: Option<String>,
    /// Consumer secret for the `all` scope.
    pub all_consumer_secret: Option<String>,
}

impl ConsumerOverrides {
    /// Resolves the credentials to insert for `scope`, generating any value
    /// that was not supplied.
    ///
    /// The `js` scope always has an empty secret.
    #[must_use]
    pub fn credentials_for(&self, scope: ConsumerScope) -> ConsumerCredentials {
        match scope {
            ConsumerScope::Js => ConsumerCredentials::new(
                self.js_consumer_key
                    .clone()
                    .unwrap_or_else(generate_credential),
                String::new(),
            ),
            ConsumerScope::All => ConsumerCredentials::new(
                self.all_consumer_key
                    .clone()
                    .unwrap_or_else(generate_credential),
                self.all_consumer_secret
                    .clone()
                    .unwrap_or_else(generate_credential),
            ),
        }
    }
}

/// Row of the `API.CONSUMER` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerRecord {
    credentials: ConsumerCredentials,
    name: String,
    short_name: String,
    created_at: DateTime<Utc>,
    active: bool,
    secure: bool,
    scope: ConsumerScope,
}

impl ConsumerRecord {
    /// Creates an active, non-secure record for a client.
    ///
    /// Both the display name and the short name are the client name.
    #[must_use]
    pub fn issue(
        client: &str,
        scope: ConsumerScope,
        credentials: ConsumerCredentials,
        clock: &impl Clock,
    ) -> Self {
        Self {
            credentials,
            name: client.to_owned(),
            short_name: client.to_owned(),
            created_at: clock.utc(),
            active: true,
            secure: false,
            scope,
        }
    }

    /// Returns the consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        self.credentials.key()
    }

    /// Returns the consumer secret.
    #[must_use]
    pub fn consumer_secret(&self) -> &str {
        self.credentials.secret()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the short name used for idempotency checks.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the credential is active.
    #[must_use]
    pub const fn active(&self) -> bool {
        self.active
    }

    /// Returns whether the credential requires secure transport.
    #[must_use]
    pub const fn secure(&self) -> bool {
        self.secure
    }

    /// Returns the access scope.
    #[must_use]
    pub const fn scope(&self) -> ConsumerScope {
        self.scope
    }
}

/// Generates a random credential of [`CREDENTIAL_LENGTH`] characters drawn
/// from `A-Z0-9`.
#[must_use]
pub fn generate_credential() -> String {
    generate_credential_with(&mut rand::rng())
}

/// Generates a credential using the supplied random source.
#[must_use]
pub fn generate_credential_with<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    (0..CREDENTIAL_LENGTH)
        .filter_map(|_| CREDENTIAL_ALPHABET.choose(&mut *rng).copied().map(char::from))
        .collect()
}
