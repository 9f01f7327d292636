//! Diesel row models for provisioning queries.

use diesel::prelude::*;

/// Row returned by the schema catalog lookup.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct SchemaNameRow {
    /// Matching schema name.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub schema_name: String,
}

/// Row returned by the consumer existence lookup.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct ConsumerKeyRow {
    /// Key of the matching consumer.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub consumer_key: String,
}
