use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use chem_domain::ChemistryAdapter;

/// Conjunto inmutable de formas canónicas conocidas (p. ej. el set de
/// entrenamiento) contra el que se mide la novedad.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSet {
    canonical: BTreeSet<String>,
}

impl ReferenceSet {
    /// Canonicaliza cada codificación; las no interpretables se descartan.
    pub fn from_encodings<A, I, S>(adapter: &A, encodings: I) -> Self
        where A: ChemistryAdapter,
              I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let mut skipped = 0usize;
        let canonical = encodings.into_iter()
                                 .filter_map(|e| {
                                     let c = adapter.canonicalize(e.as_ref());
                                     if c.is_none() {
                                         skipped += 1;
                                     }
                                     c
                                 })
                                 .collect();
        if skipped > 0 {
            log::debug!("ReferenceSet: {skipped} codificaciones no interpretables descartadas");
        }
        Self { canonical }
    }

    /// Construye el conjunto a partir de formas ya canónicas.
    pub fn from_canonical<I, S>(canonical: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { canonical: canonical.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.canonical.contains(canonical)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.canonical.iter().map(String::as_str)
    }
}
