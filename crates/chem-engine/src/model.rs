//! Clasificador logístico serializado como JSON.
//!
//! Formato del artefacto:
//! `{ "name": "gsk3", "weights": [w0, w1, ...], "intercept": b }`.
//! La probabilidad positiva es `sigmoid(w · x + b)`.
use serde::{Deserialize, Serialize};
use std::path::Path;

use chem_domain::{check_probability, ClassifierModel, DomainError, FeatureRow};

use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    #[serde(default)]
    name: String,
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    /// # Errores
    /// Retorna `EngineError::InvalidModel` si no hay pesos o algún parámetro
    /// no es finito.
    pub fn new(name: impl Into<String>, weights: Vec<f64>, intercept: f64) -> Result<Self, EngineError> {
        let model = Self { name: name.into(),
                           weights,
                           intercept };
        model.validate()?;
        Ok(model)
    }

    /// Carga y valida un artefacto JSON. Un archivo ausente o corrupto es un
    /// error: el oráculo que lo necesita no puede puntuar sin él.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut model: LogisticModel = serde_json::from_str(&raw)?;
        if model.name.is_empty() {
            model.name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        }
        model.validate()?;
        log::info!("modelo logístico '{}' cargado desde {} ({} features)",
                   model.name,
                   path.display(),
                   model.weights.len());
        Ok(model)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.weights.is_empty() {
            return Err(EngineError::InvalidModel("el modelo no tiene pesos".to_string()));
        }
        if !self.intercept.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(EngineError::InvalidModel("parámetros no finitos".to_string()));
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl ClassifierModel for LogisticModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.weights.len())
    }

    fn predict_probability(&self, row: &FeatureRow) -> Result<f64, DomainError> {
        if row.len() != self.weights.len() {
            return Err(DomainError::FeatureLengthMismatch { expected: self.weights.len(),
                                                            found: row.len() });
        }
        let z = self.weights.iter().zip(row.values()).map(|(w, x)| w * x).sum::<f64>() + self.intercept;
        check_probability(sigmoid(z))
    }
}
