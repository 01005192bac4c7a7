//! Similitud de Tanimoto entre fingerprints del mismo tipo.
use std::cmp::Ordering;
use std::collections::BTreeMap;

use chem_domain::{ChemistryAdapter, Features, Fingerprint, FingerprintKind, FingerprintShape};

use crate::{OracleError, ScoringContext};

/// Tanimoto entre dos fingerprints.
///
/// - bits: `|A ∩ B| / |A ∪ B|`
/// - conteos: `Σ min / (Σ a + Σ b - Σ min)`
///
/// Dos fingerprints vacíos tienen similitud `0.0`.
///
/// # Errores
/// `OracleError::KindMismatch` si los tipos difieren y
/// `OracleError::ShapeMismatch` si difiere la forma (o la longitud en bits).
pub fn tanimoto(a: &Fingerprint, b: &Fingerprint) -> Result<f64, OracleError> {
    if a.kind() != b.kind() {
        return Err(OracleError::KindMismatch { expected: a.kind(),
                                               found: b.kind() });
    }
    if a.shape() != b.shape() {
        return Err(OracleError::ShapeMismatch { expected: a.shape(),
                                                found: b.shape() });
    }
    let (shared, total) = match (a.features(), b.features()) {
        (Features::Bits { on_bits: x, .. }, Features::Bits { on_bits: y, .. }) => {
            let shared = sorted_intersection(x, y) as u64;
            (shared, x.len() as u64 + y.len() as u64 - shared)
        }
        (Features::Counts { counts: x }, Features::Counts { counts: y }) => {
            let shared = min_overlap(x, y);
            let sum = |m: &BTreeMap<u64, u32>| m.values().map(|&c| c as u64).sum::<u64>();
            (shared, sum(x) + sum(y) - shared)
        }
        _ => {
            return Err(OracleError::ShapeMismatch { expected: a.shape(),
                                                    found: b.shape() })
        }
    };
    if total == 0 {
        return Ok(0.0);
    }
    Ok(shared as f64 / total as f64)
}

fn sorted_intersection(x: &[u32], y: &[u32]) -> usize {
    let (mut i, mut j, mut n) = (0, 0, 0);
    while i < x.len() && j < y.len() {
        match x[i].cmp(&y[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                n += 1;
                i += 1;
                j += 1;
            }
        }
    }
    n
}

fn min_overlap(x: &BTreeMap<u64, u32>, y: &BTreeMap<u64, u32>) -> u64 {
    let (small, large) = if x.len() <= y.len() { (x, y) } else { (y, x) };
    small.iter()
         .filter_map(|(k, &c)| large.get(k).map(|&d| c.min(d) as u64))
         .sum()
}

/// Similitud con ausencia explícita: `Ok(None)` si falta alguno de los lados
/// (molécula no interpretable).
pub fn similarity(a: Option<&Fingerprint>, b: Option<&Fingerprint>) -> Result<Option<f64>, OracleError> {
    match (a, b) {
        (Some(a), Some(b)) => tanimoto(a, b).map(Some),
        _ => Ok(None),
    }
}

/// Contrato heredado: `0.0` significa "sin estructura utilizable" (falta un
/// lado o los fingerprints no son comparables).
pub fn similarity_score(a: Option<&Fingerprint>, b: Option<&Fingerprint>) -> f64 {
    similarity(a, b).ok().flatten().unwrap_or(0.0)
}

/// Tanimoto ECFP4 (vector de bits de la longitud del contexto) entre dos
/// codificaciones; `0.0` si alguna no es interpretable.
pub fn pairwise_similarity<A>(ctx: &ScoringContext<'_, A>, a: &str, b: &str) -> f64
    where A: ChemistryAdapter
{
    let shape = FingerprintShape::Bits { n_bits: ctx.n_bits() };
    let fa = ctx.fingerprint_of(a, FingerprintKind::Ecfp4, shape);
    let fb = ctx.fingerprint_of(b, FingerprintKind::Ecfp4, shape);
    similarity_score(fa.as_ref(), fb.as_ref())
}
