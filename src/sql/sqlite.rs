//! Execução de consultas no SQLite.

use std::collections::BTreeMap;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};

use crate::mapper::Table;
use crate::types::errors::QueryResult;
use crate::types::value::Value;

use super::{Dialect, Select};

/// Linha de resultado: nome da coluna para valor.
pub type Row = BTreeMap<String, Value>;

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::from(rusqlite::types::Null),
            Value::Bool(b) => ToSqlOutput::from(*b),
            Value::Int(i) => ToSqlOutput::from(*i),
            Value::Float(f) => ToSqlOutput::from(*f),
            Value::Text(s) => ToSqlOutput::from(s.as_str()),
            Value::Bytes(b) => ToSqlOutput::from(b.as_slice()),
            Value::Date(d) => ToSqlOutput::from(d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => ToSqlOutput::from(t.format("%H:%M:%S%.f").to_string()),
            Value::DateTime(dt) => ToSqlOutput::from(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            Value::List(_) => {
                return Err(rusqlite::Error::ToSqlConversionFailure(
                    "listas são expandidas na renderização e não podem ser vinculadas".into(),
                ))
            }
        })
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Int(i),
            ValueRef::Real(f) => Value::Float(f),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
        }
    }
}

/// Cria a tabela, se ainda não existir.
pub fn create_table(conn: &Connection, table: &Table) -> QueryResult<()> {
    let ddl = table.create_sql(Dialect::Sqlite);
    tracing::debug!(table = table.name(), "creating table");
    conn.execute_batch(&ddl)?;
    Ok(())
}

/// Executa a consulta e retorna todas as linhas.
///
/// Colunas com o mesmo nome em entidades diferentes ficam com o valor da
/// última.
pub fn fetch_all(conn: &Connection, query: &Select) -> QueryResult<Vec<Row>> {
    let compiled = query.compile(Dialect::Sqlite);
    tracing::debug!(sql = %compiled.sql, params = compiled.params.len(), "executing query");

    let mut stmt = conn.prepare(&compiled.sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let rows = stmt.query_map(params_from_iter(compiled.params.iter()), |row| {
        let mut out = Row::new();
        for (i, name) in names.iter().enumerate() {
            out.insert(name.clone(), Value::from(row.get_ref(i)?));
        }
        Ok(out)
    })?;

    let rows = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
