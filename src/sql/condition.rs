//! Condições booleanas (predicados de `WHERE`).

use crate::types::value::Value;

use super::expr::{Expr, Function};
use super::writer::{SqlFragment, SqlWriter};

/// Operador de comparação binária.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Like,
    ILike,
    In,
    NotIn,
}

impl CompareOp {
    fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Like => "LIKE",
            CompareOp::ILike => "ILIKE",
            CompareOp::In => "IN",
            CompareOp::NotIn => "NOT IN",
        }
    }
}

/// Predicado SQL pronto para ir num `WHERE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    True,
    False,
    Compare {
        lhs: Expr,
        op: CompareOp,
        rhs: Expr,
    },
    Between {
        expr: Expr,
        low: Expr,
        high: Expr,
    },
    IsNull {
        expr: Expr,
        negated: bool,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    /// SQL cru; cada `?` é trocado por um parâmetro.
    Raw {
        sql: String,
        params: Vec<Value>,
    },
}

impl Condition {
    pub fn compare(lhs: impl Into<Expr>, op: CompareOp, rhs: impl Into<Expr>) -> Self {
        Condition::Compare {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    pub fn between(expr: impl Into<Expr>, low: impl Into<Expr>, high: impl Into<Expr>) -> Self {
        Condition::Between {
            expr: expr.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn is_null(expr: impl Into<Expr>) -> Self {
        Condition::IsNull {
            expr: expr.into(),
            negated: false,
        }
    }

    pub fn is_not_null(expr: impl Into<Expr>) -> Self {
        Condition::IsNull {
            expr: expr.into(),
            negated: true,
        }
    }

    pub fn raw(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Condition::Raw {
            sql: sql.into(),
            params,
        }
    }

    /// Conjunção, achatando `And` aninhados.
    pub fn and(items: impl IntoIterator<Item = Condition>) -> Self {
        let mut flat = Vec::new();
        for item in items {
            match item {
                Condition::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Condition::And(flat)
    }

    /// Disjunção, achatando `Or` aninhados.
    pub fn or(items: impl IntoIterator<Item = Condition>) -> Self {
        let mut flat = Vec::new();
        for item in items {
            match item {
                Condition::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Condition::Or(flat)
    }

    /// Negação.
    pub fn negate(self) -> Self {
        Condition::Not(Box::new(self))
    }

    /// Retorna `true` se a condição sempre é verdadeira.
    pub fn is_true(&self) -> bool {
        match self {
            Condition::True => true,
            Condition::And(items) | Condition::Or(items) => items.is_empty(),
            _ => false,
        }
    }

    fn write_group(items: &[Condition], joiner: &str, w: &mut SqlWriter) {
        match items {
            [] => w.push(w.dialect().true_literal()),
            [single] => single.write_sql(w),
            _ => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        w.push(joiner);
                    }
                    let wrap = match item {
                        Condition::Raw { .. } => true,
                        Condition::Or(inner) => joiner == " AND " && inner.len() > 1,
                        _ => false,
                    };
                    if wrap {
                        w.push("(");
                        item.write_sql(w);
                        w.push(")");
                    } else {
                        item.write_sql(w);
                    }
                }
            }
        }
    }
}

impl SqlFragment for Condition {
    fn write_sql(&self, w: &mut SqlWriter) {
        match self {
            Condition::True => w.push(w.dialect().true_literal()),
            Condition::False => w.push(w.dialect().false_literal()),
            Condition::Compare {
                lhs,
                op: CompareOp::ILike,
                rhs,
            } if !w.dialect().supports_ilike() => {
                Expr::func(Function::Lower, lhs.clone()).write_sql(w);
                w.push(" LIKE ");
                Expr::func(Function::Lower, rhs.clone()).write_sql(w);
            }
            Condition::Compare { lhs, op, rhs } => {
                lhs.write_sql(w);
                w.push(" ");
                w.push(op.as_sql());
                w.push(" ");
                rhs.write_sql(w);
            }
            Condition::Between { expr, low, high } => {
                expr.write_sql(w);
                w.push(" BETWEEN ");
                low.write_sql(w);
                w.push(" AND ");
                high.write_sql(w);
            }
            Condition::IsNull { expr, negated } => {
                expr.write_sql(w);
                w.push(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Condition::And(items) => Self::write_group(items, " AND ", w),
            Condition::Or(items) => Self::write_group(items, " OR ", w),
            Condition::Not(inner) => {
                w.push("NOT (");
                inner.write_sql(w);
                w.push(")");
            }
            Condition::Raw { sql, params } => w.push_raw(sql, params),
        }
    }
}
