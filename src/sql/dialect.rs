//! Dialetos SQL suportados na renderização.

use serde::{Deserialize, Serialize};

/// Dialeto SQL.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// SQLite: placeholders `?`, booleanos `1`/`0`, sem `ILIKE`.
    #[default]
    Sqlite,
    /// PostgreSQL: placeholders `$n`, booleanos `true`/`false`.
    Postgres,
}

impl Dialect {
    /// Literal verdadeiro.
    pub fn true_literal(self) -> &'static str {
        match self {
            Dialect::Sqlite => "1",
            Dialect::Postgres => "true",
        }
    }

    /// Literal falso.
    pub fn false_literal(self) -> &'static str {
        match self {
            Dialect::Sqlite => "0",
            Dialect::Postgres => "false",
        }
    }

    /// Placeholder do parâmetro de posição `index` (começando em 1).
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Sqlite => "?".to_string(),
            Dialect::Postgres => format!("${index}"),
        }
    }

    /// Se o dialeto tem o operador `ILIKE`.
    pub fn supports_ilike(self) -> bool {
        matches!(self, Dialect::Postgres)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Sqlite => write!(f, "sqlite"),
            Dialect::Postgres => write!(f, "postgres"),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = crate::QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Dialect::Sqlite),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            other => Err(crate::QueryError::config(format!("dialeto desconhecido: {other}"))),
        }
    }
}
