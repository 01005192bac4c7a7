use chem_oracles::OracleError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum MetricsError {
    #[error("la población está vacía")] EmptyPopulation,
    #[error("la población no contiene moléculas válidas")] NoValidMolecules,
    #[error("se necesitan al menos dos moléculas únicas (hay {found})")]
    InsufficientUnique {
        found: usize,
    },
    #[error("el adaptador no produjo fingerprint para '{encoding}'")]
    MissingFingerprint {
        encoding: String,
    },
    #[error(transparent)]
    Similarity(#[from] OracleError),
}
