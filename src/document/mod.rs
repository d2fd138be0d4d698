//! Consultas descritas em documentos JSON ou TOML.
//!
//! Um documento traz a tabela, a árvore de filtros, a ordenação e a
//! paginação; [`QueryDocument::build`] monta o [`crate::sql::Select`].

mod model;

pub use model::{
    Cast, ColumnSpec, FilterNode, OrderSpec, PaginateSpec, QueryDocument, RelationSpec, TableSpec,
    WhereSpec,
};
