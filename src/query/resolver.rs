//! Resolução do valor esperado de um `Where` no momento do bind.

use crate::mapper::{retrieve_attr, Mapper};
use crate::sql::{Column, Expr};
use crate::types::errors::QueryResult;
use crate::types::value::Value;

/// Lado direito de uma comparação já resolvido.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Value(Value),
    Column(Column),
}

impl Operand {
    pub fn to_expr(&self) -> Expr {
        match self {
            Operand::Value(value) => Expr::Param(value.clone()),
            Operand::Column(column) => Expr::Column(column.clone()),
        }
    }

    /// Nome curto do tipo, usado em mensagens de erro.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Value(value) => value.kind(),
            Operand::Column(_) => "column",
        }
    }
}

impl<T: Into<Value>> From<T> for Operand {
    fn from(value: T) -> Self {
        Operand::Value(value.into())
    }
}

/// Resolve o valor esperado contra o mapper.
pub trait Resolver: std::fmt::Debug + Send + Sync {
    fn resolve(&self, mapper: &dyn Mapper) -> QueryResult<Operand>;

    /// `false` quando não há valor: o `Where` vira uma condição verdadeira.
    fn is_present(&self) -> bool;
}

/// Resolve para um valor fixo.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueResolver(pub Option<Value>);

impl ValueResolver {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Some(value.into()))
    }

    pub fn empty() -> Self {
        Self(None)
    }
}

impl Resolver for ValueResolver {
    fn resolve(&self, _mapper: &dyn Mapper) -> QueryResult<Operand> {
        Ok(Operand::Value(self.0.clone().unwrap_or(Value::Null)))
    }

    fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

/// Resolve para outra coluna do mesmo mapper (ou de uma relação).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResolver(pub String);

impl FieldResolver {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl Resolver for FieldResolver {
    fn resolve(&self, mapper: &dyn Mapper) -> QueryResult<Operand> {
        retrieve_attr(mapper, &self.0).map(Operand::Column)
    }

    fn is_present(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::{ColumnType, Table};

    fn users() -> Table {
        Table::new("users")
            .with_column("id", ColumnType::Integer)
            .with_column("name", ColumnType::Text)
    }

    #[test]
    fn test_resolve_with_list() {
        let resolver = ValueResolver::new(vec![1, 2, 3]);
        assert_eq!(
            resolver.resolve(&users()).unwrap(),
            Operand::Value(Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
    }

    #[test]
    fn test_resolve_with_other_type() {
        let resolver = ValueResolver::new(5);
        assert_eq!(resolver.resolve(&users()).unwrap(), Operand::from(5));
    }

    #[test]
    fn test_is_present() {
        assert!(!ValueResolver::empty().is_present());
        assert!(ValueResolver::new(5).is_present());
        assert!(ValueResolver::new(Value::Null).is_present());
    }

    #[test]
    fn test_field_resolver() {
        let t = users();
        assert_eq!(
            FieldResolver::new("id").resolve(&t).unwrap(),
            Operand::Column(Column::new("users", "id"))
        );
        assert!(FieldResolver::new("missing").resolve(&t).is_err());
    }
}
