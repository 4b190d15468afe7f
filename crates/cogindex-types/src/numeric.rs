// ─────────────────────────────────────────────────────────────────────
// Cognitive Index Engine — Numeric Utilities
// ─────────────────────────────────────────────────────────────────────
//! Clamping and rounding helpers shared by every scoring module.
//!
//! All engine scores live on a 0–100 scale. Non-finite intermediates are
//! never propagated: NaN maps to the lower bound and ±Inf to the nearest
//! bound, so every public formula stays total over its input domain.

/// Lower bound of every percentage-scale score.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of every percentage-scale score.
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
///
/// `lo > hi` is tolerated by returning `lo`, which keeps callers that
/// derive bounds from caller-supplied plan caps total.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return lo;
    }
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Clamp to the 0–100 score scale.
#[inline]
pub fn clamp_percent(value: f64) -> f64 {
    clamp_score(value, SCORE_MIN, SCORE_MAX)
}

/// Clamp to [0, 1]. Used for ratios and blend weights.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    clamp_score(value, 0.0, 1.0)
}

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round to one decimal place, the precision persisted for REC, SCI and
/// cognitive age.
#[inline]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// `numerator / denominator · 100`, or 0 when the denominator is not
/// strictly positive.
#[inline]
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    numerator / denominator * 100.0
}

/// Arithmetic mean, 0.0 for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Linear min-max normalisation onto 0–100, clamped.
#[inline]
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    clamp_percent((value - lo) / (hi - lo) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_score(f64::NAN, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_pos_inf() {
        assert_eq!(clamp_score(f64::INFINITY, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_clamp_neg_inf() {
        assert_eq!(clamp_score(f64::NEG_INFINITY, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_clamp_inverted_bounds() {
        assert_eq!(clamp_score(50.0, 20.0, 10.0), 20.0);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(130.0), 100.0);
        assert_eq!(clamp_percent(-4.0), 0.0);
        assert_eq!(clamp_percent(42.5), 42.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round1(36.725), 36.7);
        assert_eq!(round1(53.675), 53.7);
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(7.0, 0), 7.0);
    }

    #[test]
    fn test_percent_of_zero_denominator() {
        assert_eq!(percent_of(45.0, 0.0), 0.0);
        assert_eq!(percent_of(45.0, -10.0), 0.0);
        assert!((percent_of(30.0, 60.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[10.0, 20.0, 30.0]) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize(10.0, 20.0, 120.0), 0.0);
        assert_eq!(normalize(200.0, 20.0, 120.0), 100.0);
        assert!((normalize(70.0, 20.0, 120.0) - 50.0).abs() < 1e-9);
        assert_eq!(normalize(5.0, 3.0, 3.0), 0.0);
    }
}
