//! Testes de integração para documentos de consulta.

use std::fs;

use querybind::document::{FilterNode, QueryDocument};
use querybind::query::bind_cache_scope;
use querybind::sql::Dialect;
use querybind::QueryError;
use tempfile::TempDir;

const ORDERS_TOML: &str = r#"
outer_join = ["customer"]

[table]
name = "orders"
columns = [
    { name = "id", type = "integer" },
    { name = "total", type = "real" },
    { name = "status", type = "text" },
    { name = "customer_id", type = "integer" },
]

[[table.relations]]
name = "customer"
local = "customer_id"
remote = "id"

[table.relations.table]
name = "customer"
columns = [
    { name = "id", type = "integer" },
    { name = "email", type = "text" },
]

[where]
or = [
    { field = "status", comp = "in", value = ["paid", "shipped"] },
    { field = "customer.email", comp = "llike", value = "@example.com" },
]

[[order_by]]
field = "total"
direction = "desc"

[[order_by]]
field = "id"

[paginate]
page = 3
per_page = 20
"#;

#[test]
fn test_load_toml_document_from_disk() {
    let _scope = bind_cache_scope();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.toml");
    fs::write(&path, ORDERS_TOML).unwrap();

    let doc = QueryDocument::load(&path).unwrap();
    assert!(matches!(doc.filter, Some(FilterNode::Or { .. })));

    let compiled = doc.build().unwrap().compile(Dialect::Postgres);
    assert_eq!(
        compiled.sql,
        "SELECT orders.id, orders.total, orders.status, orders.customer_id FROM orders \
         LEFT OUTER JOIN customer ON orders.customer_id = customer.id \
         WHERE orders.status IN ($1, $2) OR customer.email LIKE $3 \
         ORDER BY orders.total DESC, orders.id ASC LIMIT 20 OFFSET 40"
    );
    assert_eq!(compiled.params.len(), 3);
}

#[test]
fn test_load_json_document_by_default() {
    let _scope = bind_cache_scope();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("query.any");
    fs::write(
        &path,
        r#"{"table": {"name": "t", "columns": [{"name": "id", "type": "integer"}]},
            "where": {"field": "id", "comp": "lte", "value": 9}}"#,
    )
    .unwrap();

    let sql = QueryDocument::load(&path)
        .unwrap()
        .build()
        .unwrap()
        .compile_literal(Dialect::Sqlite);
    assert_eq!(sql, "SELECT t.id FROM t WHERE t.id <= 9");
}

#[test]
fn test_missing_document_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = QueryDocument::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, QueryError::Io(_)));
}

#[test]
fn test_unknown_field_fails_to_build() {
    let _scope = bind_cache_scope();
    let doc = QueryDocument::from_json(
        r#"{"table": {"name": "t", "columns": [{"name": "id"}]},
            "order_by": [{"field": "nope"}]}"#,
    )
    .unwrap();
    assert!(matches!(doc.build(), Err(QueryError::FieldNotFound { .. })));
}

#[test]
fn test_object_values_are_rejected() {
    let _scope = bind_cache_scope();
    let doc = QueryDocument::from_json(
        r#"{"table": {"name": "t", "columns": [{"name": "id"}]},
            "where": {"field": "id", "value": {"nested": true}}}"#,
    )
    .unwrap();
    assert!(matches!(doc.build(), Err(QueryError::InvalidValue(_))));
}

#[cfg(feature = "sqlite")]
#[test]
fn test_document_runs_against_sqlite() {
    use querybind::sql::sqlite::{create_table, fetch_all};

    let _scope = bind_cache_scope();
    let doc = QueryDocument::from_json(
        r#"{
            "table": {"name": "item", "columns": [
                {"name": "id", "type": "integer"},
                {"name": "label", "type": "text"}
            ]},
            "where": {"not": {"field": "label", "comp": "ilike", "value": "TMP"}},
            "order_by": [{"field": "id", "direction": "desc"}],
            "paginate": {"limit": 2, "after": 1}
        }"#,
    )
    .unwrap();

    let conn = rusqlite::Connection::open_in_memory().unwrap();
    create_table(&conn, &doc.table()).unwrap();
    conn.execute_batch(
        "INSERT INTO item (id, label) VALUES (1, 'one'), (2, 'tmp-two'), (3, 'three'), (4, 'four');",
    )
    .unwrap();

    let rows = fetch_all(&conn, &doc.build().unwrap()).unwrap();
    let ids: Vec<_> = rows.iter().map(|row| row["id"].to_string()).collect();
    assert_eq!(ids, vec!["4", "3"]);
}
