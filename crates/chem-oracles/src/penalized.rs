//! logP penalizado: `logP - SA - exceso de anillo`, cada término normalizado
//! con la media y la desviación publicadas para ZINC250k.

pub const LOGP_MEAN: f64 = 2.4570953396190123;
pub const LOGP_STD: f64 = 1.434324401111988;
pub const SA_MEAN: f64 = -3.0525811293166134;
pub const SA_STD: f64 = 0.8335207024513095;
pub const CYCLE_MEAN: f64 = -0.0485696876403053;
pub const CYCLE_STD: f64 = 0.2860212110245455;

/// Valor para moléculas no interpretables.
pub const PENALIZED_LOGP_FAILURE: f64 = -100.0;

/// `-max(0, anillo_más_largo - 6)`; 0 sin anillos.
pub fn cycle_score(ring_sizes: &[usize]) -> f64 {
    let longest = ring_sizes.iter().copied().max().unwrap_or(0);
    -(longest.saturating_sub(6) as f64)
}

/// Términos normalizados `[logP, -SA, ciclo]`.
pub fn normalized_terms(log_p: f64, sa: f64, ring_sizes: &[usize]) -> [f64; 3] {
    [(log_p - LOGP_MEAN) / LOGP_STD,
     (-sa - SA_MEAN) / SA_STD,
     (cycle_score(ring_sizes) - CYCLE_MEAN) / CYCLE_STD]
}

/// Suma (no media) de los tres términos; puede ser negativa.
pub fn penalized_logp(log_p: f64, sa: f64, ring_sizes: &[usize]) -> f64 {
    normalized_terms(log_p, sa, ring_sizes).iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_score() {
        assert_eq!(cycle_score(&[]), 0.0);
        assert_eq!(cycle_score(&[5, 6]), 0.0);
        assert_eq!(cycle_score(&[6, 8]), -2.0);
    }

    #[test]
    fn test_mean_molecule_scores_near_zero() {
        // logP y SA en sus medias, sin anillos: sólo queda el término de ciclo.
        let v = penalized_logp(LOGP_MEAN, -SA_MEAN, &[]);
        assert!((v - (-CYCLE_MEAN / CYCLE_STD)).abs() < 1e-12);
    }

    #[test]
    fn test_large_ring_is_penalized() {
        let plain = penalized_logp(2.0, 3.0, &[6]);
        let macro_ring = penalized_logp(2.0, 3.0, &[12]);
        assert!((plain - macro_ring - 6.0 / CYCLE_STD).abs() < 1e-9);
    }
}
