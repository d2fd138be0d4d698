//! Cláusulas declarativas de consulta.
//!
//! Cláusulas de bind ([`BindClause`]) viram uma [`Condition`] quando
//! vinculadas a um mapper. Cláusulas de aplicação ([`ApplyClause`])
//! transformam um [`Select`].
//!
//! - [`Where`] - Filtro sobre um campo, com cache de binds
//! - [`and`], [`or`], [`not`] - Combinação de cláusulas
//! - [`OrderBy`] - Ordenação
//! - [`Paginate`] - Paginação por limite/deslocamento ou por campo

pub mod comp;
mod group;
mod null;
mod order_by;
mod paginate;
mod resolver;
mod where_clause;

pub use comp::{as_date, as_time, Comparator, CustomComparator, LikeKind};
pub use group::{and, not, or, GroupWhere, Not, Operator};
pub use null::NullBind;
pub use order_by::{OrderBy, OrderDirection};
pub use paginate::{Paginate, DEFAULT_PAGINATION_FIELD};
pub use resolver::{FieldResolver, Operand, Resolver, ValueResolver};
pub use where_clause::{
    bind_cache_override, bind_cache_scope, bind_cache_stats, clear_bind_cache, configure_bind_cache,
    with_bind_cache, AlwaysTrue, ApplyWhere, BindCache, BindKey, RawQuery, Where,
};

use crate::mapper::Mapper;
use crate::sql::{Condition, Select};
use crate::types::errors::QueryResult;

/// Papel de uma cláusula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseType {
    /// Vinculada a um mapper, produz uma condição.
    Bind,
    /// Aplicada a uma consulta, produz outra consulta.
    Apply,
}

/// Cláusula que produz uma condição ao ser vinculada a um mapper.
pub trait BindClause: std::fmt::Debug {
    fn bind(&self, mapper: &dyn Mapper) -> QueryResult<Condition>;

    fn clause_type(&self) -> ClauseType {
        ClauseType::Bind
    }
}

/// Cláusula que transforma uma consulta.
pub trait ApplyClause: std::fmt::Debug {
    fn apply(&self, query: Select) -> QueryResult<Select>;

    fn clause_type(&self) -> ClauseType {
        ClauseType::Apply
    }
}

macro_rules! impl_into_boxed_clause {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Box<dyn BindClause> {
                fn from(clause: $ty) -> Self {
                    Box::new(clause)
                }
            }
        )*
    };
}

impl_into_boxed_clause!(Where, GroupWhere, Not, AlwaysTrue, NullBind, RawQuery);

/// Aplica as cláusulas em ordem.
pub fn apply_all(query: Select, clauses: &[&dyn ApplyClause]) -> QueryResult<Select> {
    clauses
        .iter()
        .try_fold(query, |query, clause| clause.apply(query))
}
