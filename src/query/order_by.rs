//! Ordenação.

use crate::mapper::retrieve_attr;
use crate::sql::Select;
use crate::types::errors::QueryResult;

pub use crate::sql::OrderDirection;

use super::ApplyClause;

/// Ordenação por um campo do mapper principal da consulta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    pub field: Option<String>,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub fn new(field: Option<String>, direction: OrderDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(Some(field.into()), OrderDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(Some(field.into()), OrderDirection::Desc)
    }

    /// Sem ordenação: `apply` devolve a consulta intacta.
    pub fn none() -> Self {
        Self::new(None, OrderDirection::Asc)
    }
}

impl ApplyClause for OrderBy {
    fn apply(&self, query: Select) -> QueryResult<Select> {
        let Some(field) = &self.field else {
            return Ok(query);
        };
        let column = retrieve_attr(query.primary(), field)?;
        Ok(query.order_by(column, self.direction))
    }
}
