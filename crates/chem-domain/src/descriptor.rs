use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptores fisicoquímicos que los oráculos piden al adaptador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Descriptor {
    /// Coeficiente de partición octanol/agua (Crippen logP).
    LogP,
    /// Área superficial polar topológica.
    Tpsa,
    /// Número de átomos pesados de la estructura.
    AtomCount,
    /// Quantitative Estimate of Drug-likeness.
    Qed,
    /// Synthetic accessibility (1 = fácil, 10 = difícil).
    SyntheticAccessibility,
}

impl Descriptor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogP => "log_p",
            Self::Tpsa => "tpsa",
            Self::AtomCount => "atom_count",
            Self::Qed => "qed",
            Self::SyntheticAccessibility => "synthetic_accessibility",
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_display() {
        for d in [Descriptor::LogP,
                  Descriptor::Tpsa,
                  Descriptor::AtomCount,
                  Descriptor::Qed,
                  Descriptor::SyntheticAccessibility]
        {
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(json, format!("\"{}\"", d));
        }
    }
}
