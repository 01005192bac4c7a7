//! Cache concurrente y acotada de fingerprints por `(codificación, tipo, forma)`.
//!
//! Los fingerprints son función pura de la molécula, así que una entrada
//! nunca queda obsoleta; sólo se expulsa la menos usada cuando la cache
//! llega a su capacidad. También se recuerdan (con la misma cota) las
//! codificaciones que el adaptador no pudo interpretar.
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chem_domain::{Fingerprint, FingerprintKind, FingerprintShape};

/// Capacidad por defecto de cada tabla de la cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    encoding: String,
    kind: FingerprintKind,
    shape: FingerprintShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub unparsable: usize,
    pub capacity: usize,
}

#[derive(Debug)]
pub struct FingerprintCache {
    entries: Mutex<LruCache<CacheKey, Option<Fingerprint>>>,
    unparsable: Mutex<LruCache<String, ()>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for FingerprintCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

// Un panic dentro de una sección crítica no deja la cache inconsistente:
// cada operación es una única llamada a `LruCache`.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FingerprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache con a lo sumo `capacity` fingerprints y `capacity` codificaciones
    /// no interpretables. Una capacidad 0 se trata como 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self { entries: Mutex::new(LruCache::new(capacity)),
               unparsable: Mutex::new(LruCache::new(capacity)),
               capacity,
               hits: AtomicU64::new(0),
               misses: AtomicU64::new(0) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Devuelve la entrada cacheada o la calcula con `compute` y la guarda.
    /// Un `None` calculado también se guarda.
    pub fn get_or_insert_with<F>(&self,
                                 encoding: &str,
                                 kind: FingerprintKind,
                                 shape: FingerprintShape,
                                 compute: F)
                                 -> Option<Fingerprint>
        where F: FnOnce() -> Option<Fingerprint>
    {
        let key = CacheKey { encoding: encoding.to_string(),
                             kind,
                             shape };
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        // Se calcula sin sostener el lock.
        let value = compute();
        if let Some((evicted, _)) = lock(&self.entries).push(key, value.clone()) {
            log::trace!("cache llena, expulsado {} {} {}", evicted.encoding, evicted.kind, evicted.shape);
        }
        value
    }

    /// `Some(entrada)` si ya estaba cacheada (la entrada puede ser `None`).
    pub fn get(&self, encoding: &str, kind: FingerprintKind, shape: FingerprintShape) -> Option<Option<Fingerprint>> {
        self.lookup(&CacheKey { encoding: encoding.to_string(),
                                kind,
                                shape })
    }

    fn lookup(&self, key: &CacheKey) -> Option<Option<Fingerprint>> {
        let hit = lock(&self.entries).get(key).cloned();
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("cache hit {} {} {}", key.encoding, key.kind, key.shape);
        }
        hit
    }

    pub fn mark_unparsable(&self, encoding: &str) {
        lock(&self.unparsable).put(encoding.to_string(), ());
    }

    pub fn is_unparsable(&self, encoding: &str) -> bool {
        lock(&self.unparsable).get(encoding).is_some()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats { hits: self.hits.load(Ordering::Relaxed),
                     misses: self.misses.load(Ordering::Relaxed),
                     entries: lock(&self.entries).len(),
                     unparsable: lock(&self.unparsable).len(),
                     capacity: self.capacity.get() }
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
        lock(&self.unparsable).clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
