//! Cache limitado com despejo por ordem de inserção.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache FIFO limitado.
///
/// Leituras usam `peek` e nunca alteram a ordem: a entrada despejada é
/// sempre a inserida há mais tempo. Sobrescrever uma chave existente mantém
/// a posição original dela.
pub struct FifoCache<K: Hash + Eq, V> {
    entries: Option<LruCache<K, V>>,
    enabled: bool,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V> FifoCache<K, V> {
    /// Cria um novo cache. Capacidade zero cria um cache que nunca armazena.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(LruCache::new),
            enabled: true,
            hits: 0,
            misses: 0,
        }
    }

    /// Busca no cache.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let found = self
            .enabled
            .then_some(self.entries.as_ref())
            .flatten()
            .and_then(|entries| entries.peek(key));

        match found {
            Some(value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Verifica se a chave está no cache sem contar acerto ou erro.
    pub fn contains(&self, key: &K) -> bool {
        self.entries
            .as_ref()
            .is_some_and(|entries| entries.contains(key))
    }

    /// Insere no cache.
    ///
    /// Retorna a entrada despejada, se o cache estava cheio.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.as_mut()?;

        if let Some(slot) = entries.peek_mut(&key) {
            *slot = value;
            return None;
        }
        entries.push(key, value)
    }

    /// Remove uma entrada específica.
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.as_mut().and_then(|entries| entries.pop(key))
    }

    /// Limpa todo o cache (as estatísticas são mantidas).
    pub fn clear(&mut self) {
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
    }

    /// Altera a capacidade. Reduzir descarta as entradas mais antigas.
    pub fn resize(&mut self, capacity: usize) {
        match (NonZeroUsize::new(capacity), self.entries.as_mut()) {
            (Some(cap), Some(entries)) => entries.resize(cap),
            (Some(cap), None) => self.entries = Some(LruCache::new(cap)),
            (None, _) => self.entries = None,
        }
    }

    /// Habilita ou desabilita o cache. Desabilitar descarta as entradas.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Número atual de entradas.
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    /// Verifica se o cache está vazio.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacidade máxima.
    pub fn capacity(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| entries.cap().get())
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            capacity: self.capacity(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl<K: Hash + Eq, V> std::fmt::Debug for FifoCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoCache")
            .field("enabled", &self.enabled)
            .field("stats", &self.stats())
            .finish()
    }
}
