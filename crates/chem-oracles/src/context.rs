use chem_domain::{ChemistryAdapter, Fingerprint, FingerprintKind, FingerprintShape, DEFAULT_FINGERPRINT_BITS};

use crate::FingerprintCache;

/// Colaboradores de una evaluación: el adaptador químico, la cache opcional
/// de fingerprints y la longitud de los fingerprints de bits genéricos.
pub struct ScoringContext<'a, A> {
    adapter: &'a A,
    cache: Option<&'a FingerprintCache>,
    n_bits: usize,
}

impl<A> Clone for ScoringContext<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ScoringContext<'_, A> {}

impl<'a, A: ChemistryAdapter> ScoringContext<'a, A> {
    pub fn new(adapter: &'a A) -> Self {
        Self { adapter,
               cache: None,
               n_bits: DEFAULT_FINGERPRINT_BITS }
    }

    pub fn with_cache(mut self, cache: &'a FingerprintCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_n_bits(mut self, n_bits: usize) -> Self {
        self.n_bits = n_bits;
        self
    }

    pub fn adapter(&self) -> &'a A {
        self.adapter
    }

    pub fn cache(&self) -> Option<&'a FingerprintCache> {
        self.cache
    }

    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    /// `None` para texto en blanco o no interpretable por el adaptador.
    pub fn parse(&self, encoding: &str) -> Option<A::Structure> {
        let encoding = encoding.trim();
        if encoding.is_empty() || self.cache.is_some_and(|c| c.is_unparsable(encoding)) {
            return None;
        }
        match self.adapter.parse(encoding) {
            Ok(structure) => Some(structure),
            Err(failure) => {
                log::debug!("{}: {}", self.adapter.name(), failure);
                if let Some(cache) = self.cache {
                    cache.mark_unparsable(encoding);
                }
                None
            }
        }
    }

    /// Fingerprint de una estructura ya interpretada, pasando por la cache.
    pub fn fingerprint(&self,
                       encoding: &str,
                       structure: &A::Structure,
                       kind: FingerprintKind,
                       shape: FingerprintShape)
                       -> Option<Fingerprint> {
        match self.cache {
            Some(cache) => cache.get_or_insert_with(encoding.trim(), kind, shape, || {
                                    self.adapter.fingerprint(structure, kind, shape)
                                }),
            None => self.adapter.fingerprint(structure, kind, shape),
        }
    }

    /// Fingerprint directo desde el texto; sólo interpreta la molécula si la
    /// cache no tiene la entrada.
    pub fn fingerprint_of(&self, encoding: &str, kind: FingerprintKind, shape: FingerprintShape) -> Option<Fingerprint> {
        if let Some(hit) = self.cache.and_then(|c| c.get(encoding.trim(), kind, shape)) {
            return hit;
        }
        let structure = self.parse(encoding)?;
        self.fingerprint(encoding, &structure, kind, shape)
    }
}
