//! Resumen de las métricas de una población.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chem_domain::{ChemistryAdapter, FingerprintKind};

use crate::population::{diversity, novelty, unique_rate, validity_ratio, UniqueRateBasis};
use crate::{MetricsError, ReferenceSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationReport {
    pub id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub adapter: String,
    pub population_size: usize,
    pub validity: Option<f64>,
    pub unique_rate: Option<f64>,
    pub unique_rate_valid: Option<f64>,
    /// Fracción ya conocida por la referencia; `None` sin referencia.
    pub novelty: Option<f64>,
    pub diversity: Option<f64>,
}

/// Una métrica cuya precondición falla queda en `None` y se registra.
fn metric(name: &str, result: Result<f64, MetricsError>) -> Option<f64> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("métrica '{name}' omitida: {e}");
            None
        }
    }
}

impl PopulationReport {
    /// Calcula todas las métricas; la diversidad usa ECFP4 de `n_bits` bits.
    pub fn compute<A, S>(adapter: &A, population: &[S], reference: Option<&ReferenceSet>, n_bits: usize) -> Self
        where A: ChemistryAdapter,
              S: AsRef<str>
    {
        let report = Self { id: Uuid::new_v4(),
                            computed_at: Utc::now(),
                            adapter: adapter.name().to_string(),
                            population_size: population.len(),
                            validity: metric("validity", validity_ratio(adapter, population)),
                            unique_rate: metric("unique_rate", unique_rate(adapter, population, UniqueRateBasis::AllInputs)),
                            unique_rate_valid: metric("unique_rate_valid",
                                                      unique_rate(adapter, population, UniqueRateBasis::ValidInputs)),
                            novelty: reference.and_then(|r| metric("novelty", novelty(adapter, population, r))),
                            diversity: metric("diversity", diversity(adapter, population, FingerprintKind::Ecfp4, n_bits)) };
        log::info!("reporte {} sobre {} moléculas ({})", report.id, report.population_size, report.adapter);
        report
    }
}
