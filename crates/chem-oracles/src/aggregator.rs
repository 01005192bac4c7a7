use serde::{Deserialize, Serialize};

use crate::OracleError;

/// Regla para combinar los sub-scores de un oráculo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregator {
    /// Raíz n-ésima del producto. Un sub-score exactamente 0 anula el total.
    #[default]
    GeometricMean,
    ArithmeticMean,
    /// Identidad sobre un único sub-score.
    Single,
}

impl Aggregator {
    pub fn aggregate(&self, scores: &[f64]) -> Result<f64, OracleError> {
        if scores.is_empty() {
            return Err(OracleError::EmptyAggregate);
        }
        if let Some(&bad) = scores.iter().find(|s| !s.is_finite()) {
            return Err(OracleError::NonFiniteSubScore(bad));
        }
        match self {
            Self::GeometricMean => {
                if let Some(&neg) = scores.iter().find(|&&s| s < 0.0) {
                    return Err(OracleError::NegativeSubScore(neg));
                }
                if scores.contains(&0.0) {
                    return Ok(0.0);
                }
                let mean_ln = scores.iter().map(|s| s.ln()).sum::<f64>() / scores.len() as f64;
                Ok(mean_ln.exp())
            }
            Self::ArithmeticMean => Ok(scores.iter().sum::<f64>() / scores.len() as f64),
            Self::Single => match scores {
                [only] => Ok(*only),
                _ => Err(OracleError::SingleArity(scores.len())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_mean_zero_is_exact() {
        assert_eq!(Aggregator::GeometricMean.aggregate(&[0.9, 0.0, 0.7]).unwrap(), 0.0);
    }

    #[test]
    fn test_geometric_mean_value() {
        let g = Aggregator::GeometricMean.aggregate(&[0.25, 1.0]).unwrap();
        assert!((g - 0.5).abs() < 1e-12);
        let same = Aggregator::GeometricMean.aggregate(&[0.3, 0.3, 0.3]).unwrap();
        assert!((same - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_geometric_mean_rejects_negative() {
        assert_eq!(Aggregator::GeometricMean.aggregate(&[0.5, -0.1]),
                   Err(OracleError::NegativeSubScore(-0.1)));
    }

    #[test]
    fn test_empty_and_arity() {
        assert_eq!(Aggregator::ArithmeticMean.aggregate(&[]), Err(OracleError::EmptyAggregate));
        assert_eq!(Aggregator::Single.aggregate(&[0.4]).unwrap(), 0.4);
        assert_eq!(Aggregator::Single.aggregate(&[0.4, 0.5]), Err(OracleError::SingleArity(2)));
        assert!((Aggregator::ArithmeticMean.aggregate(&[0.2, 0.4]).unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(matches!(Aggregator::ArithmeticMean.aggregate(&[f64::NAN]),
                         Err(OracleError::NonFiniteSubScore(_))));
    }
}
