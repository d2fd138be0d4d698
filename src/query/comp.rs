//! Comparadores: transformam uma coluna e um operando em uma condição.

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::sql::{CompareOp, Condition, Expr, Function};
use crate::types::errors::{QueryError, QueryResult};
use crate::types::value::Value;

use super::resolver::Operand;

/// Posição do curinga `%` em comparações `LIKE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LikeKind {
    /// `%valor%`
    #[default]
    Both,
    /// `%valor` (termina com)
    Left,
    /// `valor%` (começa com)
    Right,
}

impl LikeKind {
    /// Monta o padrão para `value`.
    pub fn pattern(self, value: &str) -> String {
        match self {
            LikeKind::Both => format!("%{value}%"),
            LikeKind::Left => format!("%{value}"),
            LikeKind::Right => format!("{value}%"),
        }
    }
}

/// Função de comparação definida pelo usuário.
pub type CompareFn = fn(Expr, &Operand) -> QueryResult<Condition>;

/// Comparador customizado com nome.
///
/// Igualdade e hash consideram o nome e o endereço da função.
#[derive(Clone, Copy)]
pub struct CustomComparator {
    pub name: &'static str,
    pub func: CompareFn,
}

impl PartialEq for CustomComparator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.func as usize == other.func as usize
    }
}

impl Eq for CustomComparator {}

impl Hash for CustomComparator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        (self.func as usize).hash(state);
    }
}

impl std::fmt::Debug for CustomComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CustomComparator").field(&self.name).finish()
    }
}

/// Comparador.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Sempre verdadeiro, ignora o valor.
    AlwaysTrue,
    #[default]
    Equals,
    NotEquals,
    Greater,
    GreaterEquals,
    Lesser,
    LesserEquals,
    /// `BETWEEN low AND high`; espera uma lista de dois valores.
    Between,
    /// `>= low AND < high`; espera uma lista de dois valores.
    Range,
    Like(LikeKind),
    InsensitiveLike(LikeKind),
    /// `true` gera `IS NULL`, `false` gera `IS NOT NULL`.
    IsNull,
    In,
    NotIn,
    /// Aplica uma função SQL à coluna antes de comparar.
    Wrapped(Function, Box<Comparator>),
    Custom(CustomComparator),
}

/// Compara `date(coluna)` com o valor.
pub fn as_date(comparator: Comparator) -> Comparator {
    Comparator::Wrapped(Function::Date, Box::new(comparator))
}

/// Compara `time(coluna)` com o valor.
pub fn as_time(comparator: Comparator) -> Comparator {
    Comparator::Wrapped(Function::Time, Box::new(comparator))
}

impl Comparator {
    /// `LIKE '%valor%'`.
    pub fn like() -> Self {
        Comparator::Like(LikeKind::Both)
    }

    /// `LIKE 'valor%'`.
    pub fn rlike() -> Self {
        Comparator::Like(LikeKind::Right)
    }

    /// `LIKE '%valor'`.
    pub fn llike() -> Self {
        Comparator::Like(LikeKind::Left)
    }

    /// `ILIKE` com o curinga na posição dada.
    pub fn insensitive_like(kind: LikeKind) -> Self {
        Comparator::InsensitiveLike(kind)
    }

    /// Comparador customizado.
    pub fn custom(name: &'static str, func: CompareFn) -> Self {
        Comparator::Custom(CustomComparator { name, func })
    }

    /// Nome do comparador, o mesmo aceito por `FromStr`.
    pub fn name(&self) -> String {
        match self {
            Comparator::AlwaysTrue => "always_true".to_string(),
            Comparator::Equals => "equals".to_string(),
            Comparator::NotEquals => "not_equals".to_string(),
            Comparator::Greater => "greater".to_string(),
            Comparator::GreaterEquals => "greater_equals".to_string(),
            Comparator::Lesser => "lesser".to_string(),
            Comparator::LesserEquals => "lesser_equals".to_string(),
            Comparator::Between => "between".to_string(),
            Comparator::Range => "range".to_string(),
            Comparator::Like(LikeKind::Both) => "like".to_string(),
            Comparator::Like(LikeKind::Right) => "rlike".to_string(),
            Comparator::Like(LikeKind::Left) => "llike".to_string(),
            Comparator::InsensitiveLike(LikeKind::Both) => "ilike".to_string(),
            Comparator::InsensitiveLike(LikeKind::Right) => "irlike".to_string(),
            Comparator::InsensitiveLike(LikeKind::Left) => "illike".to_string(),
            Comparator::IsNull => "isnull".to_string(),
            Comparator::In => "in".to_string(),
            Comparator::NotIn => "not_in".to_string(),
            Comparator::Wrapped(function, inner) => format!("{}({})", function.name(), inner.name()),
            Comparator::Custom(custom) => custom.name.to_string(),
        }
    }

    /// Monta a condição comparando `attr` com `operand`.
    pub fn compare(&self, attr: Expr, operand: &Operand) -> QueryResult<Condition> {
        match self {
            Comparator::AlwaysTrue => Ok(Condition::True),
            Comparator::Equals => Ok(match operand {
                Operand::Value(Value::Null) => Condition::is_null(attr),
                _ => Condition::compare(attr, CompareOp::Eq, operand.to_expr()),
            }),
            Comparator::NotEquals => Ok(match operand {
                Operand::Value(Value::Null) => Condition::is_not_null(attr),
                _ => Condition::compare(attr, CompareOp::NotEq, operand.to_expr()),
            }),
            Comparator::Greater => Ok(Condition::compare(attr, CompareOp::Gt, operand.to_expr())),
            Comparator::GreaterEquals => {
                Ok(Condition::compare(attr, CompareOp::GtEq, operand.to_expr()))
            }
            Comparator::Lesser => Ok(Condition::compare(attr, CompareOp::Lt, operand.to_expr())),
            Comparator::LesserEquals => {
                Ok(Condition::compare(attr, CompareOp::LtEq, operand.to_expr()))
            }
            Comparator::Between => {
                let (low, high) = self.pair(operand)?;
                Ok(Condition::between(attr, Expr::param(low), Expr::param(high)))
            }
            Comparator::Range => {
                let (low, high) = self.pair(operand)?;
                Ok(Condition::and([
                    Condition::compare(attr.clone(), CompareOp::GtEq, Expr::param(low)),
                    Condition::compare(attr, CompareOp::Lt, Expr::param(high)),
                ]))
            }
            Comparator::Like(kind) => {
                let text = self.text(operand)?;
                Ok(Condition::compare(attr, CompareOp::Like, Expr::param(kind.pattern(text))))
            }
            Comparator::InsensitiveLike(kind) => {
                let text = self.text(operand)?;
                Ok(Condition::compare(attr, CompareOp::ILike, Expr::param(kind.pattern(text))))
            }
            Comparator::IsNull => match operand {
                Operand::Value(Value::Bool(true)) => Ok(Condition::is_null(attr)),
                Operand::Value(Value::Bool(false)) => Ok(Condition::is_not_null(attr)),
                other => Err(self.reject(other, "esperado um booleano")),
            },
            Comparator::In | Comparator::NotIn => {
                let items = match operand {
                    Operand::Value(Value::List(items)) => items,
                    other => return Err(self.reject(other, "esperado uma lista")),
                };
                let negated = matches!(self, Comparator::NotIn);
                Ok(match (items.is_empty(), negated) {
                    (true, false) => Condition::False,
                    (true, true) => Condition::True,
                    (false, false) => Condition::compare(attr, CompareOp::In, Expr::param(items.clone())),
                    (false, true) => {
                        Condition::compare(attr, CompareOp::NotIn, Expr::param(items.clone()))
                    }
                })
            }
            Comparator::Wrapped(function, inner) => inner.compare(Expr::func(*function, attr), operand),
            Comparator::Custom(custom) => (custom.func)(attr, operand),
        }
    }

    fn pair(&self, operand: &Operand) -> QueryResult<(Value, Value)> {
        match operand {
            Operand::Value(Value::List(items)) if items.len() == 2 => {
                Ok((items[0].clone(), items[1].clone()))
            }
            other => Err(self.reject(other, "esperado uma lista de dois valores")),
        }
    }

    fn text<'a>(&self, operand: &'a Operand) -> QueryResult<&'a str> {
        match operand {
            Operand::Value(Value::Text(text)) => Ok(text),
            other => Err(self.reject(other, "esperado um texto")),
        }
    }

    fn reject(&self, operand: &Operand, reason: &str) -> QueryError {
        tracing::warn!(comparator = %self, operand = ?operand, "operand rejected");
        QueryError::invalid_operand(self, format!("{reason}, recebido {}", operand.kind()))
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Comparator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "always_true" => Comparator::AlwaysTrue,
            "equals" | "eq" => Comparator::Equals,
            "not_equals" | "ne" => Comparator::NotEquals,
            "greater" | "gt" => Comparator::Greater,
            "greater_equals" | "gte" => Comparator::GreaterEquals,
            "lesser" | "lt" => Comparator::Lesser,
            "lesser_equals" | "lte" => Comparator::LesserEquals,
            "between" => Comparator::Between,
            "range" => Comparator::Range,
            "like" => Comparator::Like(LikeKind::Both),
            "rlike" => Comparator::Like(LikeKind::Right),
            "llike" => Comparator::Like(LikeKind::Left),
            "ilike" => Comparator::InsensitiveLike(LikeKind::Both),
            "irlike" => Comparator::InsensitiveLike(LikeKind::Right),
            "illike" => Comparator::InsensitiveLike(LikeKind::Left),
            "isnull" | "is_null" => Comparator::IsNull,
            "in" => Comparator::In,
            "not_in" => Comparator::NotIn,
            other => return Err(QueryError::UnknownComparator(other.to_string())),
        })
    }
}
