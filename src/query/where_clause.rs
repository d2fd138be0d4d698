//! Cláusula `Where` e o cache de comparações vinculadas.

use std::cell::RefCell;
use std::sync::Arc;

use crate::cache::{CacheScope, CacheStats, FifoCache, DEFAULT_CAPACITY};
use crate::mapper::{retrieve_attr, Mapper, MapperKey};
use crate::sql::{Condition, Expr, Select};
use crate::types::errors::QueryResult;
use crate::types::value::Value;

use super::comp::Comparator;
use super::group::and;
use super::resolver::{FieldResolver, Operand, Resolver, ValueResolver};
use super::{ApplyClause, BindClause};

/// Chave do cache de binds: `(mapper, campo, valor resolvido, comparador)`.
///
/// `present` separa um valor ausente (sem filtro) de um `Null` explícito,
/// que resolvem para o mesmo operando.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindKey {
    pub mapper: MapperKey,
    pub field: String,
    pub operand: Operand,
    pub present: bool,
    pub comparator: Comparator,
}

/// Cache de comparações vinculadas.
pub type BindCache = FifoCache<BindKey, Condition>;

thread_local! {
    static BIND_CACHE: RefCell<BindCache> = RefCell::new(BindCache::new(DEFAULT_CAPACITY));
}

/// Executa `f` com o cache de binds da thread atual.
pub fn with_bind_cache<R>(f: impl FnOnce(&mut BindCache) -> R) -> R {
    BIND_CACHE.with(|cache| f(&mut cache.borrow_mut()))
}

/// Estatísticas do cache de binds da thread atual.
pub fn bind_cache_stats() -> CacheStats {
    with_bind_cache(|cache| cache.stats())
}

/// Limpa o cache de binds da thread atual.
pub fn clear_bind_cache() {
    with_bind_cache(|cache| cache.clear());
}

/// Guarda que limpa o cache de binds ao sair de escopo.
pub fn bind_cache_scope() -> CacheScope {
    CacheScope::new(clear_bind_cache)
}

/// Ajusta o cache de binds da thread atual.
pub fn configure_bind_cache(enabled: bool, capacity: usize) {
    with_bind_cache(|cache| {
        cache.resize(capacity);
        cache.set_enabled(enabled);
    });
}

/// Reconfigura o cache de binds enquanto a guarda viver; no `drop` a
/// configuração anterior volta e o cache é limpo.
pub fn bind_cache_override(enabled: bool, capacity: usize) -> CacheScope {
    let (was_enabled, was_capacity) = with_bind_cache(|cache| (cache.is_enabled(), cache.capacity()));
    configure_bind_cache(enabled, capacity);
    CacheScope::new(clear_bind_cache).restoring(configure_bind_cache, was_enabled, was_capacity)
}

/// Filtro sobre um campo: `campo <comparador> valor`.
///
/// Sem valor esperado o bind produz uma condição verdadeira, o que permite
/// montar filtros opcionais sem condicionais.
#[derive(Debug, Clone)]
pub struct Where {
    field: String,
    expected: Arc<dyn Resolver>,
    comparator: Comparator,
}

impl Where {
    /// `campo = valor`.
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, value, Comparator::Equals)
    }

    /// `campo <comparador> valor`.
    pub fn compare(field: impl Into<String>, value: impl Into<Value>, comparator: Comparator) -> Self {
        Self::with_resolver(field, ValueResolver::new(value), comparator)
    }

    /// Filtro opcional: `None` não filtra nada.
    pub fn optional<V: Into<Value>>(
        field: impl Into<String>,
        value: Option<V>,
        comparator: Comparator,
    ) -> Self {
        Self::with_resolver(field, ValueResolver(value.map(Into::into)), comparator)
    }

    /// Filtro sem valor; sempre verdadeiro.
    pub fn empty(field: impl Into<String>) -> Self {
        Self::with_resolver(field, ValueResolver::empty(), Comparator::Equals)
    }

    /// Compara com outra coluna: `campo <comparador> outro_campo`.
    pub fn field(field: impl Into<String>, other: impl Into<String>, comparator: Comparator) -> Self {
        Self::with_resolver(field, FieldResolver::new(other), comparator)
    }

    /// Filtro com resolvedor próprio.
    pub fn with_resolver(
        field: impl Into<String>,
        resolver: impl Resolver + 'static,
        comparator: Comparator,
    ) -> Self {
        Self {
            field: field.into(),
            expected: Arc::new(resolver),
            comparator,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    fn get_comparison(&self, attr: Expr, resolved: &Operand) -> QueryResult<Condition> {
        if self.expected.is_present() {
            self.comparator.compare(attr, resolved)
        } else {
            Ok(Condition::True)
        }
    }
}

impl BindClause for Where {
    fn bind(&self, mapper: &dyn Mapper) -> QueryResult<Condition> {
        if self.comparator == Comparator::AlwaysTrue {
            return AlwaysTrue.bind(mapper);
        }
        let resolved = self.expected.resolve(mapper)?;

        let Some(mapper_key) = mapper.cache_key() else {
            let attr = retrieve_attr(mapper, &self.field)?;
            return self.get_comparison(Expr::Column(attr), &resolved);
        };

        let key = BindKey {
            mapper: mapper_key,
            field: self.field.clone(),
            operand: resolved,
            present: self.expected.is_present(),
            comparator: self.comparator.clone(),
        };
        if let Some(cached) = with_bind_cache(|cache| cache.get(&key).cloned()) {
            tracing::trace!(field = %self.field, comparator = %self.comparator, "bind cache hit");
            return Ok(cached);
        }

        let attr = retrieve_attr(mapper, &self.field)?;
        let condition = self.get_comparison(Expr::Column(attr), &key.operand)?;
        tracing::debug!(
            mapper = mapper.name(),
            field = %self.field,
            comparator = %self.comparator,
            "bound where clause"
        );

        with_bind_cache(|cache| {
            if let Some((evicted, _)) = cache.put(key, condition.clone()) {
                tracing::trace!(field = %evicted.field, "bind cache eviction");
            }
        });
        Ok(condition)
    }
}

/// Cláusula sempre verdadeira.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysTrue;

impl BindClause for AlwaysTrue {
    fn bind(&self, _mapper: &dyn Mapper) -> QueryResult<Condition> {
        Ok(Condition::True)
    }
}

/// Condição pronta, devolvida como está em qualquer bind.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery(Condition);

impl RawQuery {
    pub fn new(condition: Condition) -> Self {
        Self(condition)
    }

    /// SQL cru com `?` como placeholders.
    pub fn sql(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self(Condition::raw(sql, params))
    }
}

impl BindClause for RawQuery {
    fn bind(&self, _mapper: &dyn Mapper) -> QueryResult<Condition> {
        Ok(self.0.clone())
    }
}

/// Vincula as cláusulas na construção e aplica o resultado como filtro.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyWhere {
    condition: Condition,
}

impl ApplyWhere {
    pub fn new<I>(mapper: &dyn Mapper, clauses: I) -> QueryResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<Box<dyn BindClause>>,
    {
        let condition = and(clauses).bind(mapper)?;
        Ok(Self { condition })
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

impl ApplyClause for ApplyWhere {
    fn apply(&self, query: Select) -> QueryResult<Select> {
        Ok(query.filter(self.condition.clone()))
    }
}
