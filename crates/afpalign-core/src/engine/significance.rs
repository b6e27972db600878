//! Statistical significance of an optimized alignment.
//!
//! CE-style results carry a Z-score that grows with the number of aligned residues and
//! shrinks with their RMSD, relative to a length-dependent distance scale. FatCat-style
//! results carry the probability that a random pair of chains scores at least as well,
//! under a Gumbel (extreme value) model whose parameters grow with `ln L`.

use super::config::SignificanceConfig;
use crate::core::models::algorithm::SignificanceKind;

/// Length below which the CE distance scale stops shrinking.
const CE_LENGTH_OFFSET: f64 = 15.0;
const CE_MIN_DISTANCE_SCALE: f64 = 0.5;

/// Z-score of `aligned` residues superposed at `rmsd`, relative to the shorter chain
/// length `min_len`.
pub fn ce_z_score(aligned: usize, rmsd: f64, min_len: usize) -> f64 {
    let n = aligned as f64;
    if min_len == 0 {
        return n;
    }
    let lmin = min_len as f64;
    let d0 = (1.24 * (lmin - CE_LENGTH_OFFSET).max(1.0).cbrt() - 1.8).max(CE_MIN_DISTANCE_SCALE);
    n * (n / lmin) / (1.0 + rmsd / d0)
}

/// Probability that a random alignment between chains of shorter length `min_len` reaches
/// `score`.
pub fn gumbel_p_value(score: f64, min_len: usize, params: &SignificanceConfig) -> f64 {
    if min_len == 0 {
        return 1.0;
    }
    let ln_len = (min_len as f64).ln();
    let mu = params.location_slope * ln_len + params.location_offset;
    let beta = params.scale_slope * ln_len + params.scale_offset;
    if beta <= 0.0 {
        return 1.0;
    }
    let reduced = -(score - mu) / beta;
    // 1 - exp(-exp(x)), computed without cancellation for large scores.
    (-(-reduced.exp()).exp_m1()).clamp(0.0, 1.0)
}

/// Significance value of the kind the algorithm reports.
pub fn evaluate(
    kind: SignificanceKind,
    score: f64,
    aligned: usize,
    rmsd: f64,
    min_len: usize,
    params: &SignificanceConfig,
) -> f64 {
    match kind {
        SignificanceKind::ZScore => ce_z_score(aligned, rmsd, min_len),
        SignificanceKind::PValue => gumbel_p_value(score, min_len, params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_score_of_exact_full_length_match_is_aligned_length() {
        assert_eq!(ce_z_score(43, 0.0, 43), 43.0);
        assert_eq!(ce_z_score(10, 0.0, 100), 1.0);
        assert_eq!(ce_z_score(10, 2.0, 0), 10.0);
    }

    #[test]
    fn z_score_is_continuous_at_zero_rmsd() {
        let exact = ce_z_score(10, 0.0, 100);
        let nearly = ce_z_score(10, 1e-5, 100);
        assert!((exact - nearly).abs() < 1e-4);
        assert!(!SignificanceKind::ZScore.is_significant(exact));
    }

    #[test]
    fn z_score_uses_distance_scale_of_shorter_chain() {
        let lmin: f64 = 100.0;
        let d0 = 1.24 * (lmin - 15.0).cbrt() - 1.8;
        let expected = 80.0 * (80.0 / 100.0) / (1.0 + 2.0 / d0);
        assert!((ce_z_score(80, 2.0, 100) - expected).abs() < 1e-12);
    }

    #[test]
    fn z_score_floors_distance_scale_for_short_chains() {
        let expected = 10.0 * (10.0 / 12.0) / (1.0 + 1.0 / 0.5);
        assert!((ce_z_score(10, 1.0, 12) - expected).abs() < 1e-12);
    }

    #[test]
    fn p_value_decreases_with_score() {
        let params = SignificanceConfig::default();
        let low = gumbel_p_value(10.0, 100, &params);
        let high = gumbel_p_value(60.0, 100, &params);
        assert!(high < low);
        assert!((0.0..=1.0).contains(&low));
        assert!(high > 0.0);
    }

    #[test]
    fn p_value_at_location_matches_gumbel_cdf() {
        let params = SignificanceConfig::default();
        let mu = 5.0 * (50.0f64).ln() + 2.0;
        let expected = 1.0 - (-1.0f64).exp();
        assert!((gumbel_p_value(mu, 50, &params) - expected).abs() < 1e-12);
    }

    #[test]
    fn p_value_of_empty_chain_is_one() {
        assert_eq!(gumbel_p_value(100.0, 0, &SignificanceConfig::default()), 1.0);
    }

    #[test]
    fn evaluate_dispatches_on_metric() {
        let params = SignificanceConfig::default();
        assert_eq!(evaluate(SignificanceKind::ZScore, 0.0, 20, 0.0, 40, &params), 10.0);
        assert_eq!(
            evaluate(SignificanceKind::PValue, 30.0, 20, 0.0, 40, &params),
            gumbel_p_value(30.0, 40, &params)
        );
    }
}
