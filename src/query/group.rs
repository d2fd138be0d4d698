//! Grupos de cláusulas combinadas com `AND`/`OR`, e negação.

use crate::mapper::Mapper;
use crate::sql::Condition;
use crate::types::errors::QueryResult;

use super::BindClause;

/// Operador que combina as condições de um grupo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

/// Grupo de cláusulas.
///
/// Um grupo vazio vincula para uma condição verdadeira, seja `AND` ou `OR`.
#[derive(Debug)]
pub struct GroupWhere {
    items: Vec<Box<dyn BindClause>>,
    operator: Operator,
}

impl GroupWhere {
    pub fn new<I>(operator: Operator, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Box<dyn BindClause>>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            operator,
        }
    }

    /// Adiciona uma cláusula ao grupo.
    pub fn with(mut self, clause: impl Into<Box<dyn BindClause>>) -> Self {
        self.items.push(clause.into());
        self
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl BindClause for GroupWhere {
    fn bind(&self, mapper: &dyn Mapper) -> QueryResult<Condition> {
        if self.is_empty() {
            return Ok(Condition::True);
        }
        let bound = self
            .items
            .iter()
            .map(|item| item.bind(mapper))
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(match self.operator {
            Operator::And => Condition::and(bound),
            Operator::Or => Condition::or(bound),
        })
    }
}

/// Combina as cláusulas com `AND`.
pub fn and<I>(items: I) -> GroupWhere
where
    I: IntoIterator,
    I::Item: Into<Box<dyn BindClause>>,
{
    GroupWhere::new(Operator::And, items)
}

/// Combina as cláusulas com `OR`.
pub fn or<I>(items: I) -> GroupWhere
where
    I: IntoIterator,
    I::Item: Into<Box<dyn BindClause>>,
{
    GroupWhere::new(Operator::Or, items)
}

/// Negação de uma cláusula.
#[derive(Debug)]
pub struct Not(Box<dyn BindClause>);

impl BindClause for Not {
    fn bind(&self, mapper: &dyn Mapper) -> QueryResult<Condition> {
        Ok(self.0.bind(mapper)?.negate())
    }
}

/// Nega a cláusula.
pub fn not(clause: impl Into<Box<dyn BindClause>>) -> Not {
    Not(clause.into())
}
