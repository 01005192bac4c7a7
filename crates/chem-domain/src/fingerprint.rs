//! Fingerprints moleculares.
//!
//! Un `Fingerprint` siempre lleva su `FingerprintKind`; dos fingerprints de
//! tipos distintos nunca se comparan. Se soportan dos formas de
//! almacenamiento:
//! - `Bits`: vector de bits de longitud fija (posiciones activas ordenadas).
//! - `Counts`: conteo disperso `feature -> ocurrencias`.
//!
//! Los fingerprints son inmutables una vez construidos y se pueden cachear por
//! `(codificación, tipo, forma)` porque son función pura de la molécula.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Longitud por defecto de los fingerprints de bits.
pub const DEFAULT_FINGERPRINT_BITS: usize = 2048;

/// Tipos de fingerprint soportados (conjunto cerrado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FingerprintKind {
    #[serde(rename = "ECFP4")]
    Ecfp4,
    #[serde(rename = "ECFP6")]
    Ecfp6,
    #[serde(rename = "FCFP4")]
    Fcfp4,
    #[serde(rename = "AtomPair")]
    AtomPair,
}

impl FingerprintKind {
    pub const ALL: [FingerprintKind; 4] = [Self::Ecfp4, Self::Ecfp6, Self::Fcfp4, Self::AtomPair];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ecfp4 => "ECFP4",
            Self::Ecfp6 => "ECFP6",
            Self::Fcfp4 => "FCFP4",
            Self::AtomPair => "AtomPair",
        }
    }

    /// Radio Morgan del tipo circular; `None` para AtomPair.
    pub fn morgan_radius(&self) -> Option<u32> {
        match self {
            Self::Ecfp4 | Self::Fcfp4 => Some(2),
            Self::Ecfp6 => Some(3),
            Self::AtomPair => None,
        }
    }

    /// Los FCFP usan invariantes de features farmacofóricas.
    pub fn uses_features(&self) -> bool {
        matches!(self, Self::Fcfp4)
    }
}

impl fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FingerprintKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
                 .copied()
                 .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
                 .ok_or_else(|| DomainError::ValidationError(format!("Tipo de fingerprint desconocido: {s}")))
    }
}

/// Forma pedida al adaptador al generar un fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FingerprintShape {
    Bits { n_bits: usize },
    Counts,
}

impl FingerprintShape {
    /// Vector de bits con la longitud por defecto (2048).
    pub fn bits() -> Self {
        Self::Bits { n_bits: DEFAULT_FINGERPRINT_BITS }
    }
}

impl fmt::Display for FingerprintShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits { n_bits } => write!(f, "bits[{n_bits}]"),
            Self::Counts => f.write_str("counts"),
        }
    }
}

/// Features activas de un fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Features {
    /// `on_bits` ordenado, sin duplicados y con cada posición `< n_bits`.
    Bits { n_bits: usize, on_bits: Vec<u32> },
    /// Sólo conteos positivos.
    Counts { counts: BTreeMap<u64, u32> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    kind: FingerprintKind,
    features: Features,
}

impl Fingerprint {
    /// Construye un fingerprint de bits a partir de las posiciones activas.
    ///
    /// # Errores
    /// Retorna `DomainError::ValidationError` si `n_bits` es cero o alguna
    /// posición queda fuera de rango.
    pub fn from_bits<I>(kind: FingerprintKind, n_bits: usize, positions: I) -> Result<Self, DomainError>
        where I: IntoIterator<Item = u32>
    {
        if n_bits == 0 {
            return Err(DomainError::ValidationError("n_bits debe ser mayor que cero".to_string()));
        }
        let mut on_bits: Vec<u32> = positions.into_iter().collect();
        if let Some(bad) = on_bits.iter().find(|&&p| p as usize >= n_bits) {
            return Err(DomainError::ValidationError(format!("bit {bad} fuera de rango para n_bits={n_bits}")));
        }
        on_bits.sort_unstable();
        on_bits.dedup();
        Ok(Self { kind,
                  features: Features::Bits { n_bits, on_bits } })
    }

    /// Construye un fingerprint de conteos; los duplicados se suman y los
    /// conteos nulos se descartan.
    pub fn from_counts<I>(kind: FingerprintKind, entries: I) -> Self
        where I: IntoIterator<Item = (u64, u32)>
    {
        let mut counts = BTreeMap::new();
        for (feature, count) in entries.into_iter().filter(|(_, c)| *c > 0) {
            *counts.entry(feature).or_insert(0u32) += count;
        }
        Self { kind,
               features: Features::Counts { counts } }
    }

    pub fn kind(&self) -> FingerprintKind {
        self.kind
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn shape(&self) -> FingerprintShape {
        match &self.features {
            Features::Bits { n_bits, .. } => FingerprintShape::Bits { n_bits: *n_bits },
            Features::Counts { .. } => FingerprintShape::Counts,
        }
    }

    /// Número de features activas (bits encendidos o claves con conteo).
    pub fn active_count(&self) -> usize {
        match &self.features {
            Features::Bits { on_bits, .. } => on_bits.len(),
            Features::Counts { counts } => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Valida las invariantes tras deserializar desde una fuente externa.
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.features {
            Features::Bits { n_bits, on_bits } => {
                if *n_bits == 0 {
                    return Err(DomainError::ValidationError("n_bits debe ser mayor que cero".to_string()));
                }
                if on_bits.windows(2).any(|w| w[0] >= w[1]) {
                    return Err(DomainError::ValidationError("on_bits debe estar ordenado y sin duplicados".to_string()));
                }
                if on_bits.last().is_some_and(|&p| p as usize >= *n_bits) {
                    return Err(DomainError::ValidationError(format!("bit fuera de rango para n_bits={n_bits}")));
                }
                Ok(())
            }
            Features::Counts { counts } => {
                if counts.values().any(|&c| c == 0) {
                    return Err(DomainError::ValidationError("los conteos deben ser positivos".to_string()));
                }
                Ok(())
            }
        }
    }
}
