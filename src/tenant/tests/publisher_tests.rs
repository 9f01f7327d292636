//! Client publisher tests against in-memory adapters.

use std::sync::Arc;

use crate::cluster::domain::{DatabaseSettingsMap, ServerDescriptor, extract_database_settings};
use crate::coordination::{
    adapters::memory::InMemoryConfigTree, domain::TreePath, ports::ConfigTree,
};
use crate::datastore::{
    adapters::memory::InMemoryDatabaseCluster,
    domain::{ConsumerOverrides, ConsumerScope, SchemaName, SchemaScriptKind},
    scripts::ScriptLibrary,
    services::{CredentialIssuer, SchemaOutcome, SchemaProvisioner, ScopeOutcome},
};
use crate::tenant::{
    domain::{ClientDescriptor, TenantDomainError},
    services::{ClientPublishError, ClientPublisher},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

type TestPublisher = ClientPublisher<InMemoryConfigTree, InMemoryDatabaseCluster, DefaultClock>;

struct Harness {
    tree: Arc<InMemoryConfigTree>,
    cluster: InMemoryDatabaseCluster,
    publisher: TestPublisher,
    databases: DatabaseSettingsMap,
    node: TreePath,
}

#[fixture]
fn harness() -> Harness {
    let tree = Arc::new(InMemoryConfigTree::new());
    let cluster = InMemoryDatabaseCluster::new();
    let connector = Arc::new(cluster.clone());
    let provisioner = Arc::new(SchemaProvisioner::new(
        Arc::clone(&connector),
        Arc::new(ScriptLibrary::inline([(
            SchemaScriptKind::Client,
            "CREATE TABLE items (id INT);",
        )])),
    ));
    let issuer = Arc::new(CredentialIssuer::new(connector, Arc::new(DefaultClock)));
    let servers = [
        server("ClientDB", "h1"),
        server("Other", "h2"),
    ];
    Harness {
        publisher: ClientPublisher::new(Arc::clone(&tree), provisioner, issuer),
        databases: extract_database_settings(&servers).expect("unique names"),
        node: TreePath::new("/all_clients").expect("valid path"),
        tree,
        cluster,
    }
}

fn server(name: &str, host: &str) -> ServerDescriptor {
    ServerDescriptor {
        name: name.to_owned(),
        host: host.to_owned(),
        port: 3306,
        user: "u".to_owned(),
        password: "p".to_owned(),
    }
}

async fn text_at(tree: &InMemoryConfigTree, raw: &str) -> Option<String> {
    let node = TreePath::new(raw).expect("valid path");
    tree.get_data(&node)
        .await
        .expect("read should succeed")
        .map(|data| String::from_utf8(data).expect("utf-8 data"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publishes_binding_and_one_leaf_per_setting(harness: Harness) {
    let client = ClientDescriptor::new("acme", None)
        .with_setting("algorithms", json!("recentItems"))
        .with_setting("max_items", json!(50))
        .with_setting("flags", json!({"beta": true}));

    let report = harness
        .publisher
        .publish_client(
            &client,
            &harness.databases,
            &harness.node,
            &ConsumerOverrides::default(),
        )
        .await
        .expect("publish should succeed");

    assert_eq!(report.database, "ClientDB");
    assert_eq!(report.schema, SchemaOutcome::Created);
    assert_eq!(report.leaves.len(), 3);
    assert_eq!(
        text_at(&harness.tree, "/all_clients/acme").await.as_deref(),
        Some(r#"{"DB_JNDI_NAME":"ClientDB"}"#)
    );
    assert_eq!(
        text_at(&harness.tree, "/all_clients/acme/algorithms").await.as_deref(),
        Some("recentItems")
    );
    assert_eq!(
        text_at(&harness.tree, "/all_clients/acme/max_items").await.as_deref(),
        Some("50")
    );
    assert_eq!(
        text_at(&harness.tree, "/all_clients/acme/flags").await.as_deref(),
        Some(r#"{"beta":true}"#)
    );
    let children = harness
        .tree
        .children(&report.node)
        .expect("children should list");
    assert_eq!(children.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provisions_schema_and_credentials_on_resolved_database(harness: Harness) {
    let client = ClientDescriptor::new("acme", Some("Other".to_owned()));

    let report = harness
        .publisher
        .publish_client(
            &client,
            &harness.databases,
            &harness.node,
            &ConsumerOverrides::default(),
        )
        .await
        .expect("publish should succeed");

    assert_eq!(
        harness.cluster.schemas("h2:3306").expect("schemas"),
        vec![SchemaName::new("acme").expect("valid schema")]
    );
    assert!(harness.cluster.schemas("h1:3306").expect("schemas").is_empty());
    let scopes: Vec<_> = harness
        .cluster
        .consumers("h2:3306")
        .expect("rows")
        .iter()
        .map(|row| (row.short_name().to_owned(), row.scope()))
        .collect();
    assert_eq!(
        scopes,
        vec![
            ("acme".to_owned(), ConsumerScope::Js),
            ("acme".to_owned(), ConsumerScope::All),
        ]
    );
    assert!(report.credentials.js.inserted().is_some());
    assert_eq!(
        text_at(&harness.tree, "/all_clients/acme").await.as_deref(),
        Some(r#"{"DB_JNDI_NAME":"Other"}"#)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rerun_is_idempotent_for_schema_and_credentials(harness: Harness) {
    let clients = vec![ClientDescriptor::new("acme", None).with_setting("x", json!("1"))];
    let overrides = ConsumerOverrides::default();

    harness
        .publisher
        .publish_all(&clients, &harness.databases, &harness.node, &overrides)
        .await
        .expect("first run should succeed");
    let reports = harness
        .publisher
        .publish_all(&clients, &harness.databases, &harness.node, &overrides)
        .await
        .expect("second run should succeed");

    let [report] = reports.as_slice() else {
        panic!("expected one report, found {}", reports.len());
    };
    assert_eq!(report.schema, SchemaOutcome::AlreadyPresent);
    assert_eq!(report.credentials.js, ScopeOutcome::AlreadyPresent);
    assert_eq!(report.credentials.all, ScopeOutcome::AlreadyPresent);
    assert_eq!(harness.cluster.consumers("h1:3306").expect("rows").len(), 2);
    assert_eq!(harness.cluster.schema_creations().expect("creations").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_database_fails_before_any_side_effect(harness: Harness) {
    let client = ClientDescriptor::new("acme", Some("Missing".to_owned()));

    let result = harness
        .publisher
        .publish_client(
            &client,
            &harness.databases,
            &harness.node,
            &ConsumerOverrides::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(ClientPublishError::Domain(TenantDomainError::UnknownDatabase { .. }))
    ));
    assert_eq!(harness.cluster.connection_count().expect("count"), 0);
    assert!(harness.tree.paths().expect("paths").is_empty());
}

#[rstest]
#[case("..")]
#[case("a\u{1}b")]
#[tokio::test(flavor = "multi_thread")]
async fn unusable_setting_key_fails_before_any_side_effect(
    harness: Harness,
    #[case] key: &str,
) {
    let client = ClientDescriptor::new("acme", None).with_setting(key, json!("x"));

    let result = harness
        .publisher
        .publish_client(
            &client,
            &harness.databases,
            &harness.node,
            &ConsumerOverrides::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(ClientPublishError::Domain(TenantDomainError::InvalidNodeName { .. }))
    ));
    assert_eq!(harness.cluster.connection_count().expect("count"), 0);
    assert!(harness.tree.paths().expect("paths").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_client_stops_later_clients(harness: Harness) {
    let clients = vec![
        ClientDescriptor::new("acme", None),
        ClientDescriptor::new("bad-name", None),
        ClientDescriptor::new("globex", None),
    ];

    let result = harness
        .publisher
        .publish_all(
            &clients,
            &harness.databases,
            &harness.node,
            &ConsumerOverrides::default(),
        )
        .await;

    assert!(matches!(
        result,
        Err(ClientPublishError::Domain(TenantDomainError::InvalidClientName { .. }))
    ));
    assert!(text_at(&harness.tree, "/all_clients/acme").await.is_some());
    assert!(text_at(&harness.tree, "/all_clients/globex").await.is_none());
}
