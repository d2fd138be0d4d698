//! Colunas e expressões escalares.

use crate::types::value::Value;

use super::writer::{SqlFragment, SqlWriter};

/// Referência qualificada a uma coluna.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Tabela dona da coluna.
    pub table: String,
    /// Nome da coluna.
    pub name: String,
}

impl Column {
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

/// Funções SQL aplicáveis a uma expressão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Date,
    Time,
    Lower,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Date => "date",
            Function::Time => "time",
            Function::Lower => "lower",
        }
    }
}

/// Expressão escalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Coluna de uma tabela.
    Column(Column),
    /// Parâmetro vinculado. Listas viram `(?, ?, ...)`.
    Param(Value),
    /// Chamada de função.
    Func(Function, Box<Expr>),
}

impl Expr {
    pub fn param(value: impl Into<Value>) -> Self {
        Expr::Param(value.into())
    }

    pub fn func(function: Function, expr: Expr) -> Self {
        Expr::Func(function, Box::new(expr))
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        Expr::Column(column)
    }
}

impl SqlFragment for Column {
    fn write_sql(&self, w: &mut SqlWriter) {
        w.push_ident(&self.table);
        w.push(".");
        w.push_ident(&self.name);
    }
}

impl SqlFragment for Expr {
    fn write_sql(&self, w: &mut SqlWriter) {
        match self {
            Expr::Column(column) => column.write_sql(w),
            Expr::Param(Value::List(items)) => {
                w.push("(");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        w.push(", ");
                    }
                    w.push_param(item);
                }
                w.push(")");
            }
            Expr::Param(value) => w.push_param(value),
            Expr::Func(function, inner) => {
                w.push(function.name());
                w.push("(");
                inner.write_sql(w);
                w.push(")");
            }
        }
    }
}
