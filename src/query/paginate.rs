//! Paginação por limite/deslocamento ou por campo (keyset).

use crate::mapper::retrieve_attr;
use crate::sql::{CompareOp, Condition, Expr, Select};
use crate::types::errors::{QueryError, QueryResult};
use crate::types::value::Value;

use super::ApplyClause;

/// Campo padrão da paginação por campo.
pub const DEFAULT_PAGINATION_FIELD: &str = "id";

/// Estratégia de paginação.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Paginate {
    /// Não altera a consulta.
    #[default]
    None,
    /// `LIMIT limit OFFSET offset`.
    LimitOffset { limit: u64, offset: u64 },
    /// `WHERE principal.field > after LIMIT limit`.
    Field {
        limit: u64,
        after: Value,
        field: String,
    },
}

impl Paginate {
    pub fn none() -> Self {
        Paginate::None
    }

    pub fn limit_offset(limit: u64, offset: u64) -> Self {
        Paginate::LimitOffset { limit, offset }
    }

    /// Paginação por `id`, começando depois de `after`.
    pub fn field(limit: u64, after: impl Into<Value>) -> Self {
        Self::field_on(limit, after, DEFAULT_PAGINATION_FIELD)
    }

    /// Paginação por um campo qualquer do mapper principal.
    pub fn field_on(limit: u64, after: impl Into<Value>, field: impl Into<String>) -> Self {
        Paginate::Field {
            limit,
            after: after.into(),
            field: field.into(),
        }
    }

    /// Página `page` (a partir de 1) com `per_page` itens.
    pub fn page(page: u64, per_page: u64) -> QueryResult<Self> {
        if page == 0 {
            return Err(QueryError::InvalidPagination(
                "páginas começam em 1".to_string(),
            ));
        }
        if per_page == 0 {
            return Err(QueryError::InvalidPagination(
                "o tamanho da página deve ser maior que zero".to_string(),
            ));
        }
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| QueryError::InvalidPagination("deslocamento estoura u64".to_string()))?;
        Ok(Self::limit_offset(per_page, offset))
    }
}

impl ApplyClause for Paginate {
    fn apply(&self, query: Select) -> QueryResult<Select> {
        match self {
            Paginate::None => Ok(query),
            Paginate::LimitOffset { limit, offset } => Ok(query.limit(*limit).offset(*offset)),
            Paginate::Field {
                limit,
                after,
                field,
            } => {
                let column = retrieve_attr(query.primary(), field)?;
                let condition = Condition::compare(column, CompareOp::Gt, Expr::Param(after.clone()));
                Ok(query.filter(condition).limit(*limit))
            }
        }
    }
}
