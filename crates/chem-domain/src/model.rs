//! Contrato del clasificador binario pre-entrenado.
use std::fmt;

use crate::DomainError;

/// Una única fila de features (matriz `1 x n`) para el modelo.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn zeros(len: usize) -> Self {
        Self { values: vec![0.0; len] }
    }

    /// # Errores
    /// Retorna `DomainError::ValidationError` si `index` está fuera de rango.
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), DomainError> {
        let len = self.values.len();
        let slot = self.values
                       .get_mut(index)
                       .ok_or_else(|| DomainError::ValidationError(format!("índice {index} fuera de rango ({len})")))?;
        *slot = value;
        Ok(())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Forma `(filas, columnas)` tal como la recibe el modelo.
    pub fn shape(&self) -> (usize, usize) {
        (1, self.values.len())
    }
}

/// Clasificador binario: devuelve la probabilidad de la clase positiva.
///
/// Se carga una vez por proceso y se comparte entre hilos, por lo que la
/// predicción no puede mutar estado.
pub trait ClassifierModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Longitud de features esperada, si el modelo la conoce.
    fn n_features(&self) -> Option<usize>;

    fn predict_probability(&self, row: &FeatureRow) -> Result<f64, DomainError>;
}

/// Verifica que la salida de un modelo sea una probabilidad.
pub fn check_probability(p: f64) -> Result<f64, DomainError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(DomainError::ExternalError(format!("el modelo devolvió una probabilidad inválida: {p}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_row_set_and_shape() {
        let mut row = FeatureRow::zeros(4);
        row.set(2, 1.0).unwrap();
        assert_eq!(row.values(), &[0.0, 0.0, 1.0, 0.0]);
        assert_eq!(row.shape(), (1, 4));
        assert!(row.set(4, 1.0).is_err());
    }

    #[test]
    fn test_check_probability() {
        assert_eq!(check_probability(0.25).unwrap(), 0.25);
        assert!(check_probability(1.5).is_err());
        assert!(check_probability(f64::NAN).is_err());
    }
}
