//! Mapeamentos de tabela contra os quais os campos são resolvidos.
//!
//! - [`Mapper`] - Trait que resolve nomes de campo em colunas
//! - [`Table`] - Mapeamento concreto com colunas e relações
//! - [`retrieve_attr`] - Resolução de caminhos como `"another.name"`

mod attribute;
mod table;

pub use attribute::{
    attribute_cache_scope, attribute_cache_stats, clear_attribute_cache,
    configure_attribute_cache, retrieve_attr,
};
pub use table::{ColumnDef, ColumnType, Relation, Table};

use crate::sql::Column;

/// Identidade de um mapper dentro do cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapperKey(pub u64);

/// Objeto contra o qual campos são resolvidos.
pub trait Mapper: std::fmt::Debug {
    /// Nome usado em mensagens de erro.
    fn name(&self) -> &str;

    /// Chave de cache. `None` significa que o mapper não pode ser cacheado:
    /// binds contra ele sempre recalculam a comparação.
    fn cache_key(&self) -> Option<MapperKey>;

    /// Coluna com o nome dado.
    fn column(&self, name: &str) -> Option<Column>;

    /// Mapper relacionado pelo nome da relação.
    fn related(&self, name: &str) -> Option<&dyn Mapper>;

    /// Chave primária, se houver.
    fn primary_key(&self) -> Option<Column> {
        None
    }
}
