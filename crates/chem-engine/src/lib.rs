//! chemengine: implementaciones de los contratos externos de `chem-domain`.
//!
//! - `TableAdapter`: adaptador sobre registros moleculares precalculados
//!   (fingerprints, descriptores, anillos) cargables desde JSON.
//! - `LogisticModel`: clasificador binario serializado como JSON.
//! - `rdkit` (feature): motor RDKit embebido vía pyo3 y modelos pickle de
//!   scikit-learn.
//! - `fixtures` (feature `test-fixtures`): registros sintéticos para pruebas.
use thiserror::Error;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
pub mod model;
#[cfg(feature = "rdkit")]
pub mod rdkit;
pub mod table;

pub use model::LogisticModel;
pub use table::{MoleculeRecord, TableAdapter};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("registro molecular inválido: {0}")]
    InvalidRecord(String),
    #[error("modelo inválido: {0}")]
    InvalidModel(String),
    #[error("Error inicializando Python/RDKit: {0}")]
    Init(String),
    #[error("Error en llamada a RDKit: {0}")]
    Python(String),
}

impl From<chem_domain::DomainError> for EngineError {
    fn from(e: chem_domain::DomainError) -> Self {
        EngineError::InvalidRecord(e.to_string())
    }
}
