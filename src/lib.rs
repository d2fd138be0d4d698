//! # querybind
//!
//! Cláusulas declarativas de consulta vinculadas a mappers de tabela.
//!
//! Filtros ([`query::Where`]), combinações ([`query::and`], [`query::or`]),
//! ordenação ([`query::OrderBy`]) e paginação ([`query::Paginate`]) são
//! descritos sem conhecer a tabela e viram SQL quando vinculados a um
//! [`mapper::Mapper`].
//!
//! ## Módulos
//!
//! - [`query`] - Cláusulas de bind e de aplicação
//! - [`mapper`] - Tabelas, relações e resolução de atributos
//! - [`sql`] - Expressões, condições e `SELECT` com dialetos
//! - [`cache`] - Cache FIFO limitado para binds e atributos
//! - [`document`] - Consultas descritas em JSON/TOML
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod document;
pub mod mapper;
pub mod query;
pub mod sql;
pub mod types;

pub use types::config::Config;
pub use types::errors::{QueryError, QueryResult};
pub use types::value::Value;

/// Aplica a configuração de cache à thread atual.
pub fn configure(config: &Config) {
    query::configure_bind_cache(config.cache.enabled, config.cache.bind_capacity);
    mapper::configure_attribute_cache(config.cache.enabled, config.cache.attribute_capacity);
    tracing::debug!(
        enabled = config.cache.enabled,
        bind_capacity = config.cache.bind_capacity,
        attribute_capacity = config.cache.attribute_capacity,
        "caches configured"
    );
}
