//! Registros sintéticos para pruebas de oráculos y métricas.
//!
//! Cada registro lleva la misma lista de features, desplazada por tipo para
//! que los tipos no se crucen, como conteos unitarios y como bits, en los
//! cuatro tipos de fingerprint. Así el Tanimoto entre dos registros es
//! `|A ∩ B| / |A ∪ B|` sobre sus listas de features.
use chem_domain::{Fingerprint, FingerprintKind, DEFAULT_FINGERPRINT_BITS};

use crate::{EngineError, MoleculeRecord};

pub const FIXTURE_BITS: usize = DEFAULT_FINGERPRINT_BITS;

const KIND_STRIDE: u64 = 10_000;

pub fn record(canonical: &str, atoms: usize, features: &[u64]) -> Result<MoleculeRecord, EngineError> {
    record_with_bits(canonical, atoms, features, FIXTURE_BITS)
}

pub fn record_with_bits(canonical: &str,
                        atoms: usize,
                        features: &[u64],
                        n_bits: usize)
                        -> Result<MoleculeRecord, EngineError> {
    if n_bits == 0 {
        return Err(EngineError::InvalidRecord(format!("{canonical}: n_bits debe ser positivo")));
    }
    let mut record = MoleculeRecord::new(canonical, atoms);
    for kind in FingerprintKind::ALL {
        let offset = kind as u64 * KIND_STRIDE;
        let ids: Vec<u64> = features.iter().map(|f| f + offset).collect();
        let bits = Fingerprint::from_bits(kind, n_bits, ids.iter().map(|id| (id % n_bits as u64) as u32))?;
        record = record.with_fingerprint(Fingerprint::from_counts(kind, ids.iter().map(|&id| (id, 1))))
                       .with_fingerprint(bits);
    }
    Ok(record)
}
