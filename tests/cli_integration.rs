//! Testes de integração para a CLI do querybind.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn querybind_bin() -> Command {
    Command::cargo_bin("querybind").expect("binary is built")
}

const DOCUMENT: &str = r#"{
    "table": {"name": "users", "columns": [
        {"name": "id", "type": "integer"},
        {"name": "name", "type": "text"},
        {"name": "age", "type": "integer"}
    ]},
    "where": {"and": [
        {"field": "age", "comp": "gte", "value": 18},
        {"field": "name", "comp": "rlike", "value": "A"}
    ]},
    "order_by": [{"field": "name"}],
    "paginate": {"limit": 5}
}"#;

fn write_document(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("users.json");
    std::fs::write(&path, DOCUMENT).expect("Failed to write document");
    path
}

#[test]
fn test_version_command() {
    querybind_bin()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("querybind"));
}

#[test]
fn test_help_command() {
    querybind_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn test_invalid_command() {
    querybind_bin()
        .arg("invalid-command-that-does-not-exist")
        .assert()
        .failure();
}

#[test]
fn test_verbose_and_quiet_flags() {
    querybind_bin().args(["-v", "version"]).assert().success();
    querybind_bin().args(["-q", "version"]).assert().success();
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("querybind.toml");

    querybind_bin()
        .arg("init")
        .arg("--path")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("initialized"));

    let content = std::fs::read_to_string(&config_path).expect("Failed to read config");
    assert!(content.contains("[general]"));
    assert!(content.contains("[cache]"));
    assert!(content.contains("[sql]"));

    // Second run keeps the existing file
    querybind_bin()
        .arg("init")
        .arg("--path")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_compile_prints_sql_and_params() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let document = write_document(&temp_dir);

    querybind_bin()
        .arg("compile")
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "WHERE users.age >= ? AND users.name LIKE ? ORDER BY users.name ASC LIMIT 5",
        ))
        .stdout(predicate::str::contains(r#"-- params: [18,"A%"]"#));
}

#[test]
fn test_compile_literal_postgres() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let document = write_document(&temp_dir);

    querybind_bin()
        .args(["compile", "--dialect", "postgres", "--literal"])
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "WHERE users.age >= 18 AND users.name LIKE 'A%'",
        ));
}

#[test]
fn test_compile_uses_dialect_from_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let document = write_document(&temp_dir);
    let config = temp_dir.path().join("custom.toml");
    std::fs::write(&config, "[sql]\ndialect = \"postgres\"\n").expect("Failed to write config");

    querybind_bin()
        .arg("--config")
        .arg(&config)
        .args(["compile", "--json"])
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains("$1"))
        .stdout(predicate::str::contains("\"params\""));
}

#[test]
fn test_compile_reports_unknown_field() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"table": {"name": "t", "columns": [{"name": "id"}]}, "where": {"field": "age", "value": 1}}"#,
    )
    .expect("Failed to write document");

    querybind_bin()
        .arg("compile")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("age"));
}

#[test]
fn test_schema_prints_ddl() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let document = write_document(&temp_dir);

    querybind_bin()
        .arg("schema")
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE IF NOT EXISTS users"))
        .stdout(predicate::str::contains("id INTEGER PRIMARY KEY"));
}

#[cfg(feature = "sqlite")]
#[test]
fn test_query_reads_rows_from_sqlite() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let document = write_document(&temp_dir);
    let db = temp_dir.path().join("data.db");

    let conn = rusqlite::Connection::open(&db).expect("Failed to open db");
    conn.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER);
         INSERT INTO users VALUES (1, 'Ana', 30), (2, 'Bia', 40), (3, 'Alan', 12);",
    )
    .expect("Failed to seed db");
    drop(conn);

    querybind_bin()
        .arg("query")
        .arg(&document)
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"Ana""#))
        .stdout(predicate::str::contains("Bia").not())
        .stdout(predicate::str::contains("Alan").not());
}
