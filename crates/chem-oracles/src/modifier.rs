//! Modificadores de score: transforman una medición cruda en una
//! deseabilidad normalizada (típicamente en `[0, 1]`).
//!
//! Son funciones puras y deterministas; para entrada finita no fallan. Los
//! parámetros se validan una vez, al construir el oráculo
//! (`ScoreModifier::validate`).
use serde::{Deserialize, Serialize};

use crate::OracleError;

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreModifier {
    Identity,
    /// `low_y` hasta `low_x`, `high_y` desde `high_x`, lineal entre ambos.
    Clipped {
        #[serde(default)]
        low_x: f64,
        high_x: f64,
        #[serde(default)]
        low_y: f64,
        #[serde(default = "one")]
        high_y: f64,
    },
    /// 1 para `x >= mu`; decaimiento gaussiano por debajo.
    MinGaussian { mu: f64, sigma: f64 },
    /// 1 para `x <= mu`; decaimiento gaussiano por encima.
    MaxGaussian { mu: f64, sigma: f64 },
    /// 1 dentro de `[mu_low, mu_high]`; cada lado decae con su propia sigma.
    MinMaxGaussian {
        mu_low: f64,
        sigma_low: f64,
        mu_high: f64,
        sigma_high: f64,
    },
    Gaussian { mu: f64, sigma: f64 },
    /// Rampa logística centrada entre `low_x` y `high_x`.
    SmoothClipped { low_x: f64, high_x: f64 },
    /// `min(x, threshold) / threshold`.
    ThresholdedLinear { threshold: f64 },
    /// Aplica los modificadores de izquierda a derecha.
    Chained { modifiers: Vec<ScoreModifier> },
}

fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

impl ScoreModifier {
    /// `Clipped` con `low_x = 0` y salida en `[0, 1]`: satura en `upper_x`.
    pub fn clipped_upper(upper_x: f64) -> Self {
        Self::Clipped { low_x: 0.0,
                        high_x: upper_x,
                        low_y: 0.0,
                        high_y: 1.0 }
    }

    pub fn min_gaussian(mu: f64, sigma: f64) -> Self {
        Self::MinGaussian { mu, sigma }
    }

    pub fn max_gaussian(mu: f64, sigma: f64) -> Self {
        Self::MaxGaussian { mu, sigma }
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Clipped { low_x,
                            high_x,
                            low_y,
                            high_y, } => {
                if x <= *low_x {
                    *low_y
                } else if x >= *high_x {
                    *high_y
                } else {
                    low_y + (x - low_x) * (high_y - low_y) / (high_x - low_x)
                }
            }
            Self::MinGaussian { mu, sigma } => {
                if x >= *mu {
                    1.0
                } else {
                    gaussian(x, *mu, *sigma)
                }
            }
            Self::MaxGaussian { mu, sigma } => {
                if x <= *mu {
                    1.0
                } else {
                    gaussian(x, *mu, *sigma)
                }
            }
            Self::MinMaxGaussian { mu_low,
                                   sigma_low,
                                   mu_high,
                                   sigma_high, } => {
                if x < *mu_low {
                    gaussian(x, *mu_low, *sigma_low)
                } else if x > *mu_high {
                    gaussian(x, *mu_high, *sigma_high)
                } else {
                    1.0
                }
            }
            Self::Gaussian { mu, sigma } => gaussian(x, *mu, *sigma),
            Self::SmoothClipped { low_x, high_x } => {
                let center = (low_x + high_x) / 2.0;
                let steepness = 10.0 / (high_x - low_x);
                1.0 / (1.0 + (-steepness * (x - center)).exp())
            }
            Self::ThresholdedLinear { threshold } => x.min(*threshold) / threshold,
            Self::Chained { modifiers } => modifiers.iter().fold(x, |acc, m| m.apply(acc)),
        }
    }

    /// # Errores
    /// `OracleError::InvalidModifier` para sigma no positiva, rangos vacíos o
    /// invertidos, umbrales no positivos o parámetros no finitos.
    pub fn validate(&self) -> Result<(), OracleError> {
        let invalid = |msg: String| Err(OracleError::InvalidModifier(msg));
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(OracleError::InvalidModifier(format!("{name} debe ser positivo (recibió {v})")))
            }
        };
        match self {
            Self::Identity => Ok(()),
            Self::Clipped { low_x,
                            high_x,
                            low_y,
                            high_y, } => {
                if [low_x, high_x, low_y, high_y].iter().any(|v| !v.is_finite()) {
                    return invalid("parámetros de Clipped no finitos".to_string());
                }
                if high_x <= low_x {
                    return invalid(format!("Clipped requiere high_x > low_x ({high_x} <= {low_x})"));
                }
                Ok(())
            }
            Self::MinGaussian { mu, sigma } | Self::MaxGaussian { mu, sigma } | Self::Gaussian { mu, sigma } => {
                if !mu.is_finite() {
                    return invalid(format!("mu no finito ({mu})"));
                }
                positive("sigma", *sigma)
            }
            Self::MinMaxGaussian { mu_low,
                                   sigma_low,
                                   mu_high,
                                   sigma_high, } => {
                if !mu_low.is_finite() || !mu_high.is_finite() || mu_high < mu_low {
                    return invalid(format!("MinMaxGaussian requiere mu_low <= mu_high ({mu_low}, {mu_high})"));
                }
                positive("sigma_low", *sigma_low)?;
                positive("sigma_high", *sigma_high)
            }
            Self::SmoothClipped { low_x, high_x } => {
                if !low_x.is_finite() || !high_x.is_finite() || high_x <= low_x {
                    return invalid(format!("SmoothClipped requiere high_x > low_x ({high_x} <= {low_x})"));
                }
                Ok(())
            }
            Self::ThresholdedLinear { threshold } => positive("threshold", *threshold),
            Self::Chained { modifiers } => modifiers.iter().try_for_each(ScoreModifier::validate),
        }
    }
}

impl Default for ScoreModifier {
    fn default() -> Self {
        Self::Identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_clipped_is_monotone_and_bounded() {
        let m = ScoreModifier::Clipped { low_x: 0.2,
                                         high_x: 0.8,
                                         low_y: 0.1,
                                         high_y: 0.9 };
        let mut prev = f64::NEG_INFINITY;
        for i in -20..=120 {
            let y = m.apply(i as f64 / 100.0);
            assert!(y >= prev - EPS, "no monótono en {i}");
            assert!((0.1..=0.9).contains(&y));
            prev = y;
        }
        assert!((m.apply(0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_clipped_upper() {
        let m = ScoreModifier::clipped_upper(0.75);
        assert_eq!(m.apply(0.0), 0.0);
        assert!((m.apply(0.375) - 0.5).abs() < EPS);
        assert_eq!(m.apply(0.75), 1.0);
        assert_eq!(m.apply(0.99), 1.0);
    }

    #[test]
    fn test_min_gaussian_peak_and_decay() {
        let m = ScoreModifier::min_gaussian(0.85, 0.1);
        assert_eq!(m.apply(0.85), 1.0);
        assert_eq!(m.apply(0.95), 1.0);
        assert!(m.apply(0.80) < 1.0);
        assert!(m.apply(0.70) < m.apply(0.80));
        assert!((m.apply(0.75) - (-0.5f64).exp()).abs() < EPS);
    }

    #[test]
    fn test_max_gaussian_mirror() {
        let m = ScoreModifier::max_gaussian(100.0, 10.0);
        assert_eq!(m.apply(100.0), 1.0);
        assert_eq!(m.apply(40.0), 1.0);
        assert!(m.apply(110.0) < 1.0);
        assert!(m.apply(130.0) < m.apply(110.0));
    }

    #[test]
    fn test_min_max_gaussian_plateau() {
        let m = ScoreModifier::MinMaxGaussian { mu_low: 1.0,
                                                sigma_low: 0.5,
                                                mu_high: 3.0,
                                                sigma_high: 2.0 };
        assert_eq!(m.apply(2.0), 1.0);
        assert!((m.apply(0.5) - (-0.5f64).exp()).abs() < EPS);
        assert!((m.apply(5.0) - (-0.5f64).exp()).abs() < EPS);
    }

    #[test]
    fn test_smooth_clipped_midpoint() {
        let m = ScoreModifier::SmoothClipped { low_x: 0.0, high_x: 2.0 };
        assert!((m.apply(1.0) - 0.5).abs() < EPS);
        assert!(m.apply(2.0) > 0.99);
        assert!(m.apply(0.0) < 0.01);
    }

    #[test]
    fn test_thresholded_and_chained() {
        let t = ScoreModifier::ThresholdedLinear { threshold: 4.0 };
        assert_eq!(t.apply(2.0), 0.5);
        assert_eq!(t.apply(8.0), 1.0);
        let chain = ScoreModifier::Chained { modifiers: vec![t, ScoreModifier::clipped_upper(0.25)] };
        assert_eq!(chain.apply(1.0), 1.0);
        assert!((chain.apply(0.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(ScoreModifier::min_gaussian(1.0, 0.0).validate().is_err());
        assert!(ScoreModifier::clipped_upper(0.0).validate().is_err());
        assert!(ScoreModifier::ThresholdedLinear { threshold: -1.0 }.validate().is_err());
        let nested = ScoreModifier::Chained { modifiers: vec![ScoreModifier::Identity,
                                                              ScoreModifier::max_gaussian(1.0, -2.0)] };
        assert!(matches!(nested.validate(), Err(OracleError::InvalidModifier(_))));
        assert!(ScoreModifier::clipped_upper(0.8).validate().is_ok());
    }

    #[test]
    fn test_serde_tagged_form() {
        let json = serde_json::json!({"type": "clipped", "high_x": 0.8});
        let m: ScoreModifier = serde_json::from_value(json).unwrap();
        assert_eq!(m, ScoreModifier::clipped_upper(0.8));
        let v = serde_json::to_value(ScoreModifier::min_gaussian(1.0, 1.0)).unwrap();
        assert_eq!(v, serde_json::json!({"type": "min_gaussian", "mu": 1.0, "sigma": 1.0}));
    }
}
