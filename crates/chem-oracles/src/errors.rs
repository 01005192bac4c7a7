//! Errores del núcleo de scoring.
//!
//! Un `OracleError` nunca representa una molécula no interpretable (eso es
//! `Evaluation::Unparsable`); representa una precondición violada o un fallo
//! de un colaborador externo.
use chem_domain::{Descriptor, DomainError, FingerprintKind, FingerprintShape};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum OracleError {
    #[error("fingerprint kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: FingerprintKind,
        found: FingerprintKind,
    },
    #[error("fingerprint shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        expected: FingerprintShape,
        found: FingerprintShape,
    },
    #[error("el adaptador no produjo el fingerprint {kind} ({shape})")]
    MissingFingerprint {
        kind: FingerprintKind,
        shape: FingerprintShape,
    },
    #[error("el adaptador no produjo el descriptor {0}")] MissingDescriptor(Descriptor),
    #[error("modificador inválido: {0}")] InvalidModifier(String),
    #[error("no hay sub-scores para agregar")] EmptyAggregate,
    #[error("sub-score negativo en media geométrica: {0}")] NegativeSubScore(f64),
    #[error("sub-score no finito: {0}")] NonFiniteSubScore(f64),
    #[error("el agregador Single requiere exactamente un sub-score (recibió {0})")] SingleArity(usize),
    #[error("la referencia '{encoding}' no es interpretable por el adaptador")]
    InvalidReference {
        encoding: String,
    },
    #[error("el oráculo '{0}' requiere un modelo y no se proporcionó")] MissingModel(String),
    #[error("oráculo desconocido: {0}")] UnknownOracle(String),
    #[error("definición inválida: {0}")] InvalidDefinition(String),
    #[error("error del modelo: {0}")] Model(String),
}

impl From<DomainError> for OracleError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::KindMismatch { expected, found } => OracleError::KindMismatch { expected, found },
            other => OracleError::Model(other.to_string()),
        }
    }
}
