//! Renderização de fragmentos SQL.
//!
//! Um [`SqlWriter`] acumula o texto SQL e os parâmetros. No modo literal os
//! valores são embutidos no texto, o que permite comparar duas consultas
//! pelo SQL final.

use serde::Serialize;

use crate::types::value::Value;

use super::Dialect;

/// Palavras reservadas que sempre recebem aspas.
const RESERVED: &[&str] = &[
    "all", "and", "as", "by", "check", "column", "default", "from", "group", "having", "in",
    "index", "is", "join", "key", "limit", "not", "null", "offset", "on", "or", "order",
    "select", "table", "to", "user", "where",
];

/// Algo que sabe se escrever como SQL.
pub trait SqlFragment {
    fn write_sql(&self, w: &mut SqlWriter);
}

/// Resultado da compilação: SQL com placeholders e os parâmetros em ordem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compiled {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Acumulador de SQL.
#[derive(Debug)]
pub struct SqlWriter {
    dialect: Dialect,
    literal: bool,
    buf: String,
    params: Vec<Value>,
}

impl SqlWriter {
    /// Writer com parâmetros vinculados.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            literal: false,
            buf: String::new(),
            params: Vec::new(),
        }
    }

    /// Writer que embute os valores no texto.
    pub fn literal(dialect: Dialect) -> Self {
        Self {
            literal: true,
            ..Self::new(dialect)
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn push(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Escreve um identificador, com aspas quando necessário.
    pub fn push_ident(&mut self, ident: &str) {
        let quoted = quote_ident(ident);
        self.buf.push_str(&quoted);
    }

    /// Escreve um parâmetro (ou o literal, no modo literal).
    pub fn push_param(&mut self, value: &Value) {
        if self.literal {
            let literal = literal(value, self.dialect);
            self.buf.push_str(&literal);
        } else {
            self.params.push(value.clone());
            let placeholder = self.dialect.placeholder(self.params.len());
            self.buf.push_str(&placeholder);
        }
    }

    /// Escreve SQL cru, trocando cada `?` fora de aspas pelo parâmetro
    /// correspondente.
    pub fn push_raw(&mut self, sql: &str, params: &[Value]) {
        let mut params = params.iter();
        let mut in_quotes = false;
        for c in sql.chars() {
            match c {
                '\'' => {
                    in_quotes = !in_quotes;
                    self.buf.push(c);
                }
                '?' if !in_quotes => match params.next() {
                    Some(value) => self.push_param(value),
                    None => self.buf.push(c),
                },
                _ => self.buf.push(c),
            }
        }
    }

    pub fn finish(self) -> Compiled {
        Compiled {
            sql: self.buf,
            params: self.params,
        }
    }
}

/// Compila um fragmento com parâmetros vinculados.
pub fn compile(fragment: &impl SqlFragment, dialect: Dialect) -> Compiled {
    let mut w = SqlWriter::new(dialect);
    fragment.write_sql(&mut w);
    w.finish()
}

/// Compila um fragmento com os valores embutidos.
pub fn compile_literal(fragment: &impl SqlFragment, dialect: Dialect) -> String {
    let mut w = SqlWriter::literal(dialect);
    fragment.write_sql(&mut w);
    w.finish().sql
}

/// Coloca aspas em identificadores fora de `[A-Za-z_][A-Za-z0-9_]*` ou reservados.
pub fn quote_ident(ident: &str) -> String {
    let mut chars = ident.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());

    if simple && !RESERVED.contains(&ident.to_ascii_lowercase().as_str()) {
        ident.to_string()
    } else {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

/// Floats não finitos: o SQLite não tem NaN (vira `NULL`) e lê `9e999` como
/// infinito; o PostgreSQL aceita as formas textuais com cast.
fn float_literal(f: f64, dialect: Dialect) -> String {
    match (dialect, f.is_nan(), f.is_infinite()) {
        (_, false, false) => format!("{f:?}"),
        (Dialect::Sqlite, true, _) => "NULL".to_string(),
        (Dialect::Sqlite, _, _) if f > 0.0 => "9e999".to_string(),
        (Dialect::Sqlite, _, _) => "-9e999".to_string(),
        (Dialect::Postgres, true, _) => "'NaN'::float8".to_string(),
        (Dialect::Postgres, _, _) if f > 0.0 => "'Infinity'::float8".to_string(),
        (Dialect::Postgres, _, _) => "'-Infinity'::float8".to_string(),
    }
}

/// Representação literal de um valor.
pub fn literal(value: &Value, dialect: Dialect) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => dialect.true_literal().to_string(),
        Value::Bool(false) => dialect.false_literal().to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => float_literal(*f, dialect),
        Value::Text(s) => quote_text(s),
        Value::Bytes(b) => match dialect {
            Dialect::Sqlite => format!("X'{}'", hex::encode(b)),
            Dialect::Postgres => format!("'\\x{}'", hex::encode(b)),
        },
        Value::Date(d) => quote_text(&d.format("%Y-%m-%d").to_string()),
        Value::Time(t) => quote_text(&t.format("%H:%M:%S%.f").to_string()),
        Value::DateTime(dt) => quote_text(&dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(|v| literal(v, dialect)).collect();
            format!("({})", items.join(", "))
        }
    }
}

fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
