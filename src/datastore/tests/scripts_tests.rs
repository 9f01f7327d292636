//! Schema script library tests.

use crate::datastore::{
    domain::SchemaScriptKind,
    scripts::{ScriptError, ScriptLibrary},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct SchemaDir {
    _temp: TempDir,
    path: Utf8PathBuf,
}

#[fixture]
fn schema_dir() -> SchemaDir {
    let temp = TempDir::new().expect("temp dir");
    let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("utf-8 temp path");
    SchemaDir { _temp: temp, path }
}

fn write_file(dir: &Utf8Path, name: &str, contents: &str) {
    Dir::open_ambient_dir(dir, ambient_authority())
        .expect("open dir")
        .write(name, contents)
        .expect("write file");
}

#[rstest]
fn loads_scripts_from_directory(schema_dir: SchemaDir) {
    write_file(&schema_dir.path, "api.sql", "CREATE DATABASE api;");
    write_file(&schema_dir.path, "client.sql", "CREATE TABLE t (id INT);");
    let library = ScriptLibrary::open(&schema_dir.path).expect("open library");

    let api = library.load(SchemaScriptKind::Api).expect("api script");
    let client = library.load(SchemaScriptKind::Client).expect("client script");

    assert_eq!(api.kind(), SchemaScriptKind::Api);
    assert_eq!(api.sql(), "CREATE DATABASE api;");
    assert_eq!(client.sql(), "CREATE TABLE t (id INT);");
}

#[rstest]
fn rereads_file_on_each_load(schema_dir: SchemaDir) {
    write_file(&schema_dir.path, "client.sql", "first");
    let library = ScriptLibrary::open(&schema_dir.path).expect("open library");
    assert_eq!(library.load(SchemaScriptKind::Client).expect("load").sql(), "first");

    write_file(&schema_dir.path, "client.sql", "second");
    assert_eq!(library.load(SchemaScriptKind::Client).expect("load").sql(), "second");
}

#[rstest]
fn missing_file_reports_full_path(schema_dir: SchemaDir) {
    let library = ScriptLibrary::open(&schema_dir.path).expect("open library");

    let err = library
        .load(SchemaScriptKind::Client)
        .expect_err("client.sql is absent");

    match err {
        ScriptError::Missing(path) => assert_eq!(path, schema_dir.path.join("client.sql")),
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn missing_directory_fails_to_open(schema_dir: SchemaDir) {
    let absent = schema_dir.path.join("absent");

    let result = ScriptLibrary::open(&absent);

    assert!(matches!(result, Err(ScriptError::Open { path, .. }) if path == absent));
}

#[rstest]
fn inline_library_serves_only_supplied_scripts() {
    let library = ScriptLibrary::inline([(SchemaScriptKind::Api, "CREATE DATABASE api;")]);

    assert_eq!(
        library.load(SchemaScriptKind::Api).expect("api script").sql(),
        "CREATE DATABASE api;"
    );
    assert!(matches!(
        library.load(SchemaScriptKind::Client),
        Err(ScriptError::Missing(_))
    ));
}
