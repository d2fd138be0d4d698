//! Testes de integração executando as cláusulas em um SQLite em memória.

#![cfg(feature = "sqlite")]

use querybind::mapper::{ColumnType, Table};
use querybind::query::{
    and, as_date, bind_cache_scope, not, or, ApplyClause, ApplyWhere, BindClause, Comparator,
    GroupWhere, OrderBy, Operator, Paginate, Where,
};
use querybind::sql::sqlite::{create_table, fetch_all, Row};
use querybind::sql::{select, Select};
use querybind::Value;
use rusqlite::{params, Connection};

struct Fixture {
    conn: Connection,
    person: Table,
    address: Table,
}

fn fixture() -> Fixture {
    let person = Table::new("person")
        .with_column("id", ColumnType::Integer)
        .with_column("name", ColumnType::Text)
        .with_column("age", ColumnType::Integer)
        .with_column("created_at", ColumnType::DateTime);
    let address = Table::new("address")
        .with_column("id", ColumnType::Integer)
        .with_column("street", ColumnType::Text)
        .with_column("person_id", ColumnType::Integer)
        .with_relation("person", &person, "person_id", "id");

    let conn = Connection::open_in_memory().expect("in-memory database");
    create_table(&conn, &person).unwrap();
    create_table(&conn, &address).unwrap();

    for (id, name, age, created_at) in [
        (1, "Alice", 25, "2024-01-01 09:00:00"),
        (2, "Bob", 30, "2024-01-02 10:30:00"),
        (3, "Charlie", 35, "2024-01-03 18:45:00"),
    ] {
        conn.execute(
            "INSERT INTO person (id, name, age, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, age, created_at],
        )
        .unwrap();
    }
    for (id, street, person_id) in [(1, "Rua A", 1), (2, "Rua B", 2), (3, "Rua C", 2)] {
        conn.execute(
            "INSERT INTO address (id, street, person_id) VALUES (?1, ?2, ?3)",
            params![id, street, person_id],
        )
        .unwrap();
    }

    Fixture {
        conn,
        person,
        address,
    }
}

fn filtered(fx: &Fixture, clause: impl Into<Box<dyn BindClause>>) -> Select {
    ApplyWhere::new(&fx.person, [clause])
        .unwrap()
        .apply(select(&fx.person))
        .unwrap()
}

fn names(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get("name").and_then(Value::as_text).map(String::from))
        .collect()
}

fn count(fx: &Fixture, clause: impl Into<Box<dyn BindClause>>) -> usize {
    fetch_all(&fx.conn, &filtered(fx, clause)).unwrap().len()
}

#[test]
fn test_where_filters_rows() {
    let _scope = bind_cache_scope();
    let fx = fixture();

    assert_eq!(count(&fx, Where::compare("age", 26, Comparator::Greater)), 2);
    assert_eq!(count(&fx, Where::new("name", "Alice")), 1);
    assert_eq!(count(&fx, Where::compare("name", "Alice", Comparator::NotEquals)), 2);
    assert_eq!(count(&fx, Where::empty("age")), 3);
}

#[test]
fn test_group_where() {
    let _scope = bind_cache_scope();
    let fx = fixture();

    assert_eq!(count(&fx, and([Where::new("name", "Alice"), Where::new("age", 25)])), 1);
    assert_eq!(count(&fx, and([Where::new("name", "Alice"), Where::new("age", 30)])), 0);
    assert_eq!(count(&fx, or([Where::new("name", "Alice"), Where::new("name", "Bob")])), 2);

    let nested = GroupWhere::new(
        Operator::And,
        [Where::compare("age", 30, Comparator::GreaterEquals)],
    )
    .with(or([
        Where::compare("name", "B", Comparator::rlike()),
        Where::compare("name", "C", Comparator::rlike()),
    ]));
    assert_eq!(count(&fx, nested), 2);

    assert_eq!(count(&fx, not(Where::new("name", "Alice"))), 2);
    assert_eq!(count(&fx, and(Vec::<Where>::new())), 3);
}

#[test]
fn test_like_and_insensitive_like() {
    let _scope = bind_cache_scope();
    let fx = fixture();

    assert_eq!(count(&fx, Where::compare("name", "li", Comparator::like())), 2);
    assert_eq!(count(&fx, Where::compare("name", "e", Comparator::llike())), 2);

    let rows = fetch_all(
        &fx.conn,
        &filtered(&fx, Where::compare("name", "ALI", Comparator::insensitive_like(Default::default()))),
    )
    .unwrap();
    assert_eq!(names(&rows), vec!["Alice".to_string()]);
}

#[test]
fn test_in_between_and_range() {
    let _scope = bind_cache_scope();
    let fx = fixture();

    assert_eq!(count(&fx, Where::compare("age", vec![25, 35], Comparator::In)), 2);
    assert_eq!(count(&fx, Where::compare("age", vec![25, 35], Comparator::NotIn)), 1);
    assert_eq!(count(&fx, Where::compare("age", Vec::<i64>::new(), Comparator::In)), 0);
    assert_eq!(count(&fx, Where::compare("age", Vec::<i64>::new(), Comparator::NotIn)), 3);

    assert_eq!(count(&fx, Where::compare("age", [25, 35], Comparator::Between)), 3);
    assert_eq!(count(&fx, Where::compare("age", [25, 35], Comparator::Range)), 2);
}

#[test]
fn test_as_date_compares_only_the_date() {
    let _scope = bind_cache_scope();
    let fx = fixture();

    let rows = fetch_all(
        &fx.conn,
        &filtered(&fx, Where::compare("created_at", "2024-01-02", as_date(Comparator::Equals))),
    )
    .unwrap();
    assert_eq!(names(&rows), vec!["Bob".to_string()]);
}

#[test]
fn test_order_and_pagination() {
    let _scope = bind_cache_scope();
    let fx = fixture();

    let query = OrderBy::desc("age").apply(select(&fx.person)).unwrap();
    let rows = fetch_all(&fx.conn, &query).unwrap();
    assert_eq!(names(&rows), vec!["Charlie", "Bob", "Alice"]);

    let page = Paginate::limit_offset(1, 1).apply(query.clone()).unwrap();
    assert_eq!(names(&fetch_all(&fx.conn, &page).unwrap()), vec!["Bob"]);

    let offset_only = OrderBy::asc("id").apply(select(&fx.person)).unwrap().offset(1);
    assert_eq!(names(&fetch_all(&fx.conn, &offset_only).unwrap()), vec!["Bob", "Charlie"]);

    let keyset = OrderBy::asc("id")
        .apply(select(&fx.person))
        .and_then(|q| Paginate::field(10, 1).apply(q))
        .unwrap();
    assert_eq!(names(&fetch_all(&fx.conn, &keyset).unwrap()), vec!["Bob", "Charlie"]);
}

#[test]
fn test_filter_through_relation() {
    let _scope = bind_cache_scope();
    let fx = fixture();

    let query = ApplyWhere::new(&fx.address, [Where::new("person.name", "Bob")])
        .unwrap()
        .apply(select(&fx.address).outer_join("person").unwrap())
        .and_then(|q| OrderBy::asc("id").apply(q))
        .unwrap();

    let rows = fetch_all(&fx.conn, &query).unwrap();
    let streets: Vec<_> = rows
        .iter()
        .filter_map(|row| row.get("street").and_then(Value::as_text))
        .collect();
    assert_eq!(streets, vec!["Rua B", "Rua C"]);
}

#[test]
fn test_isnull_matches_missing_values() {
    let _scope = bind_cache_scope();
    let fx = fixture();
    fx.conn
        .execute("INSERT INTO person (id, name) VALUES (4, 'Dave')", [])
        .unwrap();

    assert_eq!(count(&fx, Where::compare("age", true, Comparator::IsNull)), 1);
    assert_eq!(count(&fx, Where::compare("age", false, Comparator::IsNull)), 3);
    assert_eq!(count(&fx, Where::new("age", Value::Null)), 1);
}
