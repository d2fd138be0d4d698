//! Camada mínima de expressões SQL.
//!
//! - [`Column`], [`Expr`] - Referências e expressões escalares
//! - [`Condition`] - Predicados booleanos produzidos pelo bind
//! - [`Select`] - Instrução sobre a qual cláusulas de ordenação e paginação se aplicam
//! - [`compile`], [`compile_literal`] - Renderização para um [`Dialect`]

mod condition;
mod dialect;
mod expr;
mod select;
mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use condition::{CompareOp, Condition};
pub use dialect::Dialect;
pub use expr::{Column, Expr, Function};
pub use select::{select, Join, JoinKind, OrderDirection, OrderItem, Select};
pub use writer::{compile, compile_literal, literal, quote_ident, Compiled, SqlFragment, SqlWriter};
