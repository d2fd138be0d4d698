//! Caches limitados do querybind.
//!
//! Este módulo implementa um cache FIFO usado para memorizar comparações já
//! vinculadas e atributos já resolvidos. Os caches globais vivem em
//! `thread_local!`: cada thread tem o seu, sem locks.

mod fifo;

pub use fifo::{CacheStats, FifoCache};

/// Capacidade padrão dos caches de bind e de atributos.
pub const DEFAULT_CAPACITY: usize = 250;

/// Guarda que limpa um cache thread-local ao sair de escopo e, se pedido,
/// restaura a configuração anterior.
#[must_use = "o cache é limpo quando a guarda é descartada"]
pub struct CacheScope {
    clear: fn(),
    restore: Option<(fn(bool, usize), bool, usize)>,
}

impl CacheScope {
    /// Cria uma guarda que chama `clear` no `drop`.
    pub fn new(clear: fn()) -> Self {
        Self {
            clear,
            restore: None,
        }
    }

    /// No `drop`, chama `configure(enabled, capacity)` antes de limpar.
    pub fn restoring(mut self, configure: fn(bool, usize), enabled: bool, capacity: usize) -> Self {
        self.restore = Some((configure, enabled, capacity));
        self
    }
}

impl Drop for CacheScope {
    fn drop(&mut self) {
        if let Some((configure, enabled, capacity)) = self.restore.take() {
            configure(enabled, capacity);
        }
        (self.clear)();
    }
}

impl std::fmt::Debug for CacheScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheScope").finish_non_exhaustive()
    }
}
