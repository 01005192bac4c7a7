//! Contrato del adaptador químico externo.
//!
//! El núcleo de scoring no interpreta estructuras: sólo pide al adaptador
//! fingerprints, descriptores, tamaños de anillo y la forma canónica. Una
//! codificación que el adaptador no puede interpretar se reporta como
//! `ParseFailure`; nunca como un valor numérico centinela.
use thiserror::Error;

use crate::{Descriptor, Fingerprint, FingerprintKind, FingerprintShape};

/// La codificación no pudo convertirse en una estructura.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no se pudo interpretar '{encoding}': {reason}")]
pub struct ParseFailure {
    pub encoding: String,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(encoding: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { encoding: encoding.into(),
               reason: reason.into() }
    }
}

/// Motor químico (RDKit u otro) visto desde el núcleo de scoring.
///
/// Las implementaciones deben ser seguras para uso concurrente de sólo
/// lectura: los oráculos evalúan lotes en paralelo sobre el mismo adaptador.
pub trait ChemistryAdapter: Send + Sync {
    /// Representación interna de una molécula interpretada.
    type Structure;

    fn name(&self) -> &str;

    fn parse(&self, encoding: &str) -> Result<Self::Structure, ParseFailure>;

    /// `None` si el motor no puede producir ese tipo/forma para la estructura.
    fn fingerprint(&self,
                   structure: &Self::Structure,
                   kind: FingerprintKind,
                   shape: FingerprintShape)
                   -> Option<Fingerprint>;

    fn descriptor(&self, structure: &Self::Structure, descriptor: Descriptor) -> Option<f64>;

    /// Tamaños de los ciclos de la base de ciclos del grafo molecular.
    fn ring_sizes(&self, structure: &Self::Structure) -> Vec<usize>;

    /// `None` si el motor no pudo producir la forma canónica.
    fn canonical_form(&self, structure: &Self::Structure) -> Option<String>;

    /// Número de átomos; cero si el motor no expone el descriptor.
    fn atom_count(&self, structure: &Self::Structure) -> usize {
        self.descriptor(structure, Descriptor::AtomCount)
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(|n| n as usize)
            .unwrap_or(0)
    }

    /// Forma canónica directamente desde el texto; `None` si no se interpreta
    /// o si el motor no produce una forma canónica no vacía.
    fn canonicalize(&self, encoding: &str) -> Option<String> {
        let structure = self.parse(encoding).ok()?;
        self.canonical_form(&structure).filter(|c| !c.is_empty())
    }

    /// Fingerprint directamente desde el texto; `None` si no se interpreta.
    fn fingerprint_of(&self, encoding: &str, kind: FingerprintKind, shape: FingerprintShape) -> Option<Fingerprint> {
        let structure = self.parse(encoding).ok()?;
        self.fingerprint(&structure, kind, shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Motor mínimo: interpreta cualquier texto salvo "x" y sólo sabe
    /// canonicalizar las cadenas en minúsculas.
    struct LowercaseOnly;

    impl ChemistryAdapter for LowercaseOnly {
        type Structure = String;

        fn name(&self) -> &str {
            "lowercase"
        }

        fn parse(&self, encoding: &str) -> Result<String, ParseFailure> {
            match encoding {
                "x" => Err(ParseFailure::new(encoding, "no interpretable")),
                other => Ok(other.to_string()),
            }
        }

        fn fingerprint(&self, _: &String, _: FingerprintKind, _: FingerprintShape) -> Option<Fingerprint> {
            None
        }

        fn descriptor(&self, _: &String, _: Descriptor) -> Option<f64> {
            None
        }

        fn ring_sizes(&self, _: &String) -> Vec<usize> {
            Vec::new()
        }

        fn canonical_form(&self, structure: &String) -> Option<String> {
            if structure.chars().all(|c| c.is_ascii_lowercase()) {
                Some(structure.clone())
            } else {
                None
            }
        }
    }

    #[test]
    fn test_canonicalize_failure_is_none_not_empty() {
        let adapter = LowercaseOnly;
        assert_eq!(adapter.canonicalize("cco").as_deref(), Some("cco"));
        assert_eq!(adapter.canonicalize("CCO"), None);
        assert_eq!(adapter.canonicalize("x"), None);
        // una forma canónica vacía tampoco cuenta como molécula
        assert_eq!(adapter.canonicalize(""), None);
    }

    #[test]
    fn test_atom_count_defaults_to_zero_without_descriptor() {
        let adapter = LowercaseOnly;
        assert_eq!(adapter.atom_count(&"cco".to_string()), 0);
    }
}
