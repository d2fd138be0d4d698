//! Resolução de atributos com cache.

use std::cell::RefCell;

use crate::cache::{CacheScope, CacheStats, FifoCache, DEFAULT_CAPACITY};
use crate::sql::Column;
use crate::types::errors::{QueryError, QueryResult};

use super::{Mapper, MapperKey};

thread_local! {
    static ATTRIBUTE_CACHE: RefCell<FifoCache<(MapperKey, String), Column>> =
        RefCell::new(FifoCache::new(DEFAULT_CAPACITY));
}

/// Resolve `path` contra `mapper`.
///
/// `path` é o nome de uma coluna ou um caminho pontuado atravessando
/// relações (`"another.name"`). Qualquer segmento inexistente gera
/// [`QueryError::FieldNotFound`].
pub fn retrieve_attr(mapper: &dyn Mapper, path: &str) -> QueryResult<Column> {
    let Some(key) = mapper.cache_key() else {
        return resolve_path(mapper, path);
    };

    let cache_key = (key, path.to_string());
    if let Some(column) = ATTRIBUTE_CACHE.with(|cache| cache.borrow_mut().get(&cache_key).cloned()) {
        return Ok(column);
    }

    let column = resolve_path(mapper, path)?;
    ATTRIBUTE_CACHE.with(|cache| cache.borrow_mut().put(cache_key, column.clone()));
    Ok(column)
}

fn resolve_path(mapper: &dyn Mapper, path: &str) -> QueryResult<Column> {
    let not_found = || QueryError::field_not_found(path, mapper.name());

    let mut segments = path.split('.');
    let field = segments.next_back().ok_or_else(not_found)?;

    let mut current = mapper;
    for relation in segments {
        current = current.related(relation).ok_or_else(not_found)?;
    }

    current.column(field).ok_or_else(|| {
        tracing::debug!(mapper = mapper.name(), path, "field not found");
        not_found()
    })
}

/// Estatísticas do cache de atributos da thread atual.
pub fn attribute_cache_stats() -> CacheStats {
    ATTRIBUTE_CACHE.with(|cache| cache.borrow().stats())
}

/// Limpa o cache de atributos da thread atual.
pub fn clear_attribute_cache() {
    ATTRIBUTE_CACHE.with(|cache| cache.borrow_mut().clear());
}

/// Guarda que limpa o cache de atributos ao sair de escopo.
pub fn attribute_cache_scope() -> CacheScope {
    CacheScope::new(clear_attribute_cache)
}

/// Ajusta o cache de atributos da thread atual.
pub fn configure_attribute_cache(enabled: bool, capacity: usize) {
    ATTRIBUTE_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        cache.resize(capacity);
        cache.set_enabled(enabled);
    });
}
