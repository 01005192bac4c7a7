//! Métricas de población.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use chem_domain::{ChemistryAdapter, FingerprintKind, FingerprintShape};
use chem_oracles::tanimoto;

use crate::{MetricsError, ReferenceSet};

/// Denominador de `unique_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueRateBasis {
    /// Todas las entradas, incluidas las inválidas.
    #[default]
    AllInputs,
    /// Sólo las entradas válidas.
    ValidInputs,
}

/// Texto no vacío, interpretable y con al menos un átomo.
pub fn is_valid<A: ChemistryAdapter>(adapter: &A, encoding: &str) -> bool {
    valid_structure(adapter, encoding).is_some()
}

fn valid_structure<A: ChemistryAdapter>(adapter: &A, encoding: &str) -> Option<A::Structure> {
    if encoding.trim().is_empty() {
        return None;
    }
    adapter.parse(encoding).ok().filter(|s| adapter.atom_count(s) > 0)
}

/// Fracción de la población que es válida, en `[0, 1]`.
pub fn validity_ratio<A, S>(adapter: &A, population: &[S]) -> Result<f64, MetricsError>
    where A: ChemistryAdapter,
          S: AsRef<str>
{
    if population.is_empty() {
        return Err(MetricsError::EmptyPopulation);
    }
    let valid = population.iter().filter(|e| is_valid(adapter, e.as_ref())).count();
    Ok(valid as f64 / population.len() as f64)
}

pub fn canonicalize<A: ChemistryAdapter>(adapter: &A, encoding: &str) -> Option<String> {
    adapter.canonicalize(encoding)
}

/// Formas canónicas distintas de las entradas válidas (ordenadas). Las
/// entradas no interpretables, sin átomos o sin forma canónica se descartan,
/// así ninguna métrica cuenta como molécula algo que `is_valid` rechaza.
pub fn unique_canonical<A, S>(adapter: &A, population: &[S]) -> BTreeSet<String>
    where A: ChemistryAdapter,
          S: AsRef<str>
{
    population.iter()
              .filter_map(|e| valid_structure(adapter, e.as_ref()))
              .filter_map(|s| adapter.canonical_form(&s))
              .filter(|c| !c.is_empty())
              .collect()
}

pub fn unique_rate<A, S>(adapter: &A, population: &[S], basis: UniqueRateBasis) -> Result<f64, MetricsError>
    where A: ChemistryAdapter,
          S: AsRef<str>
{
    if population.is_empty() {
        return Err(MetricsError::EmptyPopulation);
    }
    let unique = unique_canonical(adapter, population).len();
    let denominator = match basis {
        UniqueRateBasis::AllInputs => population.len(),
        UniqueRateBasis::ValidInputs => population.iter().filter(|e| is_valid(adapter, e.as_ref())).count(),
    };
    if denominator == 0 {
        return Err(MetricsError::NoValidMolecules);
    }
    Ok(unique as f64 / denominator as f64)
}

/// Fracción de las moléculas únicas del lote que YA están en la referencia
/// (1.0 = nada nuevo). Para la fracción de moléculas nuevas ver
/// `novel_fraction`.
pub fn novelty<A, S>(adapter: &A, batch: &[S], reference: &ReferenceSet) -> Result<f64, MetricsError>
    where A: ChemistryAdapter,
          S: AsRef<str>
{
    if batch.is_empty() {
        return Err(MetricsError::EmptyPopulation);
    }
    let unique = unique_canonical(adapter, batch);
    if unique.is_empty() {
        return Err(MetricsError::NoValidMolecules);
    }
    let known = unique.iter().filter(|c| reference.contains(c)).count();
    Ok(known as f64 / unique.len() as f64)
}

/// `1 - novelty`: fracción de moléculas únicas ausentes de la referencia.
pub fn novel_fraction<A, S>(adapter: &A, batch: &[S], reference: &ReferenceSet) -> Result<f64, MetricsError>
    where A: ChemistryAdapter,
          S: AsRef<str>
{
    novelty(adapter, batch, reference).map(|known| 1.0 - known)
}

/// Similitud de Tanimoto media sobre los pares no ordenados de moléculas
/// únicas y válidas, con fingerprints de bits del tipo indicado.
///
/// # Errores
/// `MetricsError::InsufficientUnique` con menos de dos moléculas únicas.
pub fn diversity<A, S>(adapter: &A, population: &[S], kind: FingerprintKind, n_bits: usize) -> Result<f64, MetricsError>
    where A: ChemistryAdapter,
          S: AsRef<str>
{
    let unique: Vec<String> = unique_canonical(adapter, population).into_iter().collect();
    if unique.len() < 2 {
        return Err(MetricsError::InsufficientUnique { found: unique.len() });
    }
    let shape = FingerprintShape::Bits { n_bits };
    let fingerprints = unique.iter()
                             .map(|c| {
                                 adapter.fingerprint_of(c, kind, shape)
                                        .ok_or_else(|| MetricsError::MissingFingerprint { encoding: c.clone() })
                             })
                             .collect::<Result<Vec<_>, _>>()?;
    let n = fingerprints.len();
    let row_sums = (0..n).into_par_iter()
                         .map(|i| {
                             fingerprints[i + 1..].iter()
                                                  .map(|other| tanimoto(&fingerprints[i], other))
                                                  .sum::<Result<f64, _>>()
                         })
                         .collect::<Result<Vec<f64>, _>>()?;
    let pairs = n * (n - 1) / 2;
    Ok(row_sums.iter().sum::<f64>() / pairs as f64)
}
