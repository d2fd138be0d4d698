//! Mapeamento de tabela.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::sql::{quote_ident, Column, Dialect};

use super::{Mapper, MapperKey};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

fn next_table_id() -> u64 {
    NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Tipo de uma coluna, usado no DDL.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Real,
    #[default]
    Text,
    Boolean,
    Blob,
    Date,
    Time,
    DateTime,
}

impl ColumnType {
    fn sql_name(self, dialect: Dialect) -> &'static str {
        match (self, dialect) {
            (ColumnType::Integer, Dialect::Sqlite) => "INTEGER",
            (ColumnType::Integer, Dialect::Postgres) => "BIGINT",
            (ColumnType::Real, Dialect::Sqlite) => "REAL",
            (ColumnType::Real, Dialect::Postgres) => "DOUBLE PRECISION",
            (ColumnType::Text, _) => "TEXT",
            (ColumnType::Boolean, _) => "BOOLEAN",
            (ColumnType::Blob, Dialect::Sqlite) => "BLOB",
            (ColumnType::Blob, Dialect::Postgres) => "BYTEA",
            (ColumnType::Date, _) => "DATE",
            (ColumnType::Time, _) => "TIME",
            (ColumnType::DateTime, Dialect::Sqlite) => "DATETIME",
            (ColumnType::DateTime, Dialect::Postgres) => "TIMESTAMP",
        }
    }
}

/// Definição de coluna.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
}

/// Relação com outra tabela: `local` desta tabela aponta para `remote` do alvo.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub target: Arc<Table>,
    pub local: String,
    pub remote: String,
}

/// Tabela mapeada.
///
/// Cada `Table::new` recebe uma identidade única no processo; clones
/// compartilham a identidade e, portanto, as entradas de cache. Os métodos
/// `with_*` mudam a estrutura e geram uma identidade nova.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    id: u64,
    name: String,
    columns: Vec<ColumnDef>,
    primary_key: String,
    relations: Vec<(String, Relation)>,
}

impl Table {
    /// Cria uma tabela sem colunas, com chave primária `id`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: next_table_id(),
            name: name.into(),
            columns: Vec::new(),
            primary_key: "id".to_string(),
            relations: Vec::new(),
        }
    }

    /// Adiciona uma coluna.
    pub fn with_column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.id = next_table_id();
        self.columns.push(ColumnDef {
            name: name.into(),
            column_type,
        });
        self
    }

    /// Define a chave primária.
    pub fn with_primary_key(mut self, name: impl Into<String>) -> Self {
        self.id = next_table_id();
        self.primary_key = name.into();
        self
    }

    /// Adiciona uma relação `name` para `target`, ligando `local` a `remote`.
    pub fn with_relation(
        mut self,
        name: impl Into<String>,
        target: &Table,
        local: impl Into<String>,
        remote: impl Into<String>,
    ) -> Self {
        self.id = next_table_id();
        self.relations.push((
            name.into(),
            Relation {
                target: Arc::new(target.clone()),
                local: local.into(),
                remote: remote.into(),
            },
        ));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    /// Relação pelo nome.
    pub fn get_relation(&self, name: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|(rel_name, _)| rel_name == name)
            .map(|(_, rel)| rel)
    }

    pub fn relations(&self) -> &[(String, Relation)] {
        &self.relations
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Colunas qualificadas, na ordem de declaração.
    pub fn qualified_columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns
            .iter()
            .map(move |c| Column::new(self.name.clone(), c.name.clone()))
    }

    /// DDL `CREATE TABLE IF NOT EXISTS`.
    pub fn create_sql(&self, dialect: Dialect) -> String {
        let mut defs = Vec::with_capacity(self.columns.len());
        for col in &self.columns {
            let mut def = format!("{} {}", quote_ident(&col.name), col.column_type.sql_name(dialect));
            if col.name == self.primary_key {
                def = match (dialect, col.column_type) {
                    (Dialect::Postgres, ColumnType::Integer) => format!(
                        "{} BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY",
                        quote_ident(&col.name)
                    ),
                    _ => format!("{def} PRIMARY KEY"),
                };
            }
            if let Some((_, rel)) = self.relations.iter().find(|(_, r)| r.local == col.name) {
                def.push_str(&format!(
                    " REFERENCES {}({})",
                    quote_ident(rel.target.name()),
                    quote_ident(&rel.remote)
                ));
            }
            defs.push(def);
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(&self.name),
            defs.join(", ")
        )
    }
}

impl Mapper for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn cache_key(&self) -> Option<MapperKey> {
        Some(MapperKey(self.id))
    }

    fn column(&self, name: &str) -> Option<Column> {
        self.has_column(name)
            .then(|| Column::new(self.name.clone(), name))
    }

    fn related(&self, name: &str) -> Option<&dyn Mapper> {
        self.get_relation(name)
            .map(|rel| rel.target.as_ref() as &dyn Mapper)
    }

    fn primary_key(&self) -> Option<Column> {
        self.column(&self.primary_key)
    }
}
