//! Backend RDKit embebido vía pyo3.
//!
//! `RdkitEngine` implementa `ChemistryAdapter` delegando en el módulo Python
//! `rdkit_wrapper.py` (incluido en el binario). `PickledClassifier` carga un
//! modelo scikit-learn serializado con pickle.
mod bridge;

use pyo3::prelude::*;
use std::fmt;
use std::path::Path;

use chem_domain::{check_probability, ChemistryAdapter, ClassifierModel, Descriptor, DomainError, FeatureRow,
                  Fingerprint, FingerprintKind, FingerprintShape, ParseFailure};

use crate::EngineError;

impl From<PyErr> for EngineError {
    fn from(e: PyErr) -> Self {
        EngineError::Python(e.to_string())
    }
}

/// Molécula interpretada por RDKit (objeto `Mol` de Python).
pub struct RdkitMolecule {
    mol: Py<PyAny>,
}

impl fmt::Debug for RdkitMolecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RdkitMolecule(..)")
    }
}

#[derive(Debug, Clone)]
pub struct RdkitEngine {
    name: String,
}

impl RdkitEngine {
    /// Inicializa el intérprete y carga el módulo wrapper (una sola vez).
    pub fn new() -> Result<Self, EngineError> {
        bridge::init_python().map_err(|e| EngineError::Init(e.to_string()))?;
        log::info!("motor RDKit inicializado");
        Ok(Self { name: "rdkit".to_string() })
    }
}

impl ChemistryAdapter for RdkitEngine {
    type Structure = RdkitMolecule;

    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, encoding: &str) -> Result<Self::Structure, ParseFailure> {
        if encoding.trim().is_empty() {
            return Err(ParseFailure::new(encoding, "codificación vacía"));
        }
        match bridge::parse_smiles(encoding.trim()) {
            Ok(Some(mol)) => Ok(RdkitMolecule { mol }),
            Ok(None) => Err(ParseFailure::new(encoding, "RDKit no pudo interpretar el SMILES")),
            Err(e) => Err(ParseFailure::new(encoding, e.to_string())),
        }
    }

    fn fingerprint(&self,
                   structure: &Self::Structure,
                   kind: FingerprintKind,
                   shape: FingerprintShape)
                   -> Option<Fingerprint> {
        let result: Result<Fingerprint, EngineError> = match shape {
            FingerprintShape::Bits { n_bits } => bridge::fingerprint_bits(&structure.mol, kind.as_str(), n_bits)
                .map_err(EngineError::from)
                .and_then(|bits| Ok(Fingerprint::from_bits(kind, n_bits, bits)?)),
            FingerprintShape::Counts => bridge::fingerprint_counts(&structure.mol, kind.as_str())
                .map(|counts| Fingerprint::from_counts(kind, counts))
                .map_err(EngineError::from),
        };
        match result {
            Ok(fp) => Some(fp),
            Err(e) => {
                log::warn!("fingerprint {kind} ({shape}) falló: {e}");
                None
            }
        }
    }

    fn descriptor(&self, structure: &Self::Structure, descriptor: Descriptor) -> Option<f64> {
        match bridge::descriptor(&structure.mol, descriptor.as_str()) {
            Ok(v) if v.is_finite() => Some(v),
            Ok(v) => {
                log::warn!("descriptor {descriptor} no finito: {v}");
                None
            }
            Err(e) => {
                log::warn!("descriptor {descriptor} falló: {e}");
                None
            }
        }
    }

    fn ring_sizes(&self, structure: &Self::Structure) -> Vec<usize> {
        bridge::ring_sizes(&structure.mol).unwrap_or_else(|e| {
                                              log::warn!("ring_sizes falló: {e}");
                                              Vec::new()
                                          })
    }

    fn canonical_form(&self, structure: &Self::Structure) -> Option<String> {
        match bridge::canonical(&structure.mol) {
            Ok(c) if !c.is_empty() => Some(c),
            Ok(_) => {
                log::warn!("canonical devolvió una forma vacía");
                None
            }
            Err(e) => {
                log::warn!("canonical falló: {e}");
                None
            }
        }
    }
}

/// Clasificador scikit-learn cargado desde un pickle.
pub struct PickledClassifier {
    name: String,
    model: Py<PyAny>,
    n_features: Option<usize>,
}

impl fmt::Debug for PickledClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickledClassifier")
         .field("name", &self.name)
         .field("n_features", &self.n_features)
         .finish()
    }
}

impl PickledClassifier {
    /// Carga el pickle indicado. Un archivo ausente o ilegible es un error.
    pub fn load(path: impl AsRef<Path>, n_features: Option<usize>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::Io(std::io::Error::new(std::io::ErrorKind::NotFound,
                                                           format!("no existe el modelo {}", path.display()))));
        }
        bridge::init_python().map_err(|e| EngineError::Init(e.to_string()))?;
        let model = bridge::load_pickle(&path.to_string_lossy())?;
        let name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        log::info!("modelo pickle '{}' cargado desde {}", name, path.display());
        Ok(Self { name,
                  model,
                  n_features })
    }
}

impl ClassifierModel for PickledClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn predict_probability(&self, row: &FeatureRow) -> Result<f64, DomainError> {
        if let Some(expected) = self.n_features.filter(|&n| n != row.len()) {
            return Err(DomainError::FeatureLengthMismatch { expected,
                                                            found: row.len() });
        }
        let p = bridge::predict_proba(&self.model, row.values()).map_err(|e| DomainError::ExternalError(e.to_string()))?;
        check_probability(p)
    }
}
