// error.rs
use crate::fingerprint::FingerprintKind;
use thiserror::Error;

/// Error personalizado del dominio químico
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    ValidationError(String),

    #[error("Error externo: {0}")]
    ExternalError(String),

    #[error("Error de serialización: {0}")]
    SerializationError(String),

    #[error("fingerprint kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: FingerprintKind, found: FingerprintKind },

    #[error("feature length mismatch: expected {expected}, found {found}")]
    FeatureLengthMismatch { expected: usize, found: usize },
}

// Implementación de conversión desde serde_json::Error a DomainError
impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_variant_format() {
        let err = DomainError::ValidationError("inválido".into());
        assert_eq!(err.to_string(), "Error de validación: inválido");
    }

    #[test]
    fn test_kind_mismatch_format() {
        let err = DomainError::KindMismatch { expected: FingerprintKind::Ecfp4,
                                              found: FingerprintKind::AtomPair };
        assert_eq!(err.to_string(), "fingerprint kind mismatch: expected ECFP4, found AtomPair");
    }

    #[test]
    fn test_from_serde_json() {
        let e = serde_json::from_str::<u32>("no-json").unwrap_err();
        let err: DomainError = e.into();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }
}
