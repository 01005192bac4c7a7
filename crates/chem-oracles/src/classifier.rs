use chem_domain::{FeatureRow, Features, Fingerprint, FingerprintShape};

use crate::OracleError;

/// Vector de ceros de la longitud del fingerprint con sus bits activos en
/// `1.0`, como una única fila para el modelo.
///
/// # Errores
/// `OracleError::ShapeMismatch` si el fingerprint no es un vector de bits.
pub fn feature_row(fingerprint: &Fingerprint) -> Result<FeatureRow, OracleError> {
    match fingerprint.features() {
        Features::Bits { n_bits, on_bits } => {
            let mut values = vec![0.0; *n_bits];
            for &bit in on_bits {
                if let Some(slot) = values.get_mut(bit as usize) {
                    *slot = 1.0;
                }
            }
            Ok(FeatureRow::new(values))
        }
        Features::Counts { .. } => Err(OracleError::ShapeMismatch { expected: FingerprintShape::bits(),
                                                                    found: FingerprintShape::Counts }),
    }
}
