//! Cláusula nula.

use crate::mapper::Mapper;
use crate::sql::Condition;
use crate::types::errors::QueryResult;

use super::BindClause;

/// Cláusula que não filtra nada: o bind ignora o mapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullBind;

impl BindClause for NullBind {
    fn bind(&self, _mapper: &dyn Mapper) -> QueryResult<Condition> {
        Ok(Condition::True)
    }
}
