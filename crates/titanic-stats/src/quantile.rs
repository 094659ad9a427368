//! Linear-interpolated quantiles.
//!
//! For `n` ordered values the quantile `q` sits at fractional rank
//! `q * (n - 1)`; values between two ranks are interpolated linearly.

/// Value at quantile `q` (clamped to `[0, 1]`) of ascending `sorted_values`.
///
/// Returns `f64::NAN` for an empty slice.
///
/// ```
/// use titanic_stats::quantile::compute_quantile;
///
/// let fares = [7.25, 15.0, 100.0];
/// assert_eq!(compute_quantile(&fares, 0.5), 15.0);
/// assert_eq!(compute_quantile(&fares, 0.25), 11.125);
/// assert_eq!(compute_quantile(&fares, 1.0), 100.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_quantile(sorted_values: &[f64], q: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let rank = q.clamp(0.0, 1.0) * last as f64;
    let below = rank.floor();
    let low = sorted_values[below as usize];
    let high = sorted_values[rank.ceil() as usize];
    low + (high - low) * (rank - below)
}

/// Evenly spaced quantiles `0, 1/k, ..., 1` of ascending `sorted_values`.
///
/// Returns `k + 1` cut points; the first and last are the minimum and maximum.
///
/// ```
/// use titanic_stats::quantile::equal_frequency_cuts;
///
/// let ages = [2.0, 14.0, 22.0, 26.0, 35.0];
/// assert_eq!(equal_frequency_cuts(&ages, 4), vec![2.0, 14.0, 22.0, 26.0, 35.0]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn equal_frequency_cuts(sorted_values: &[f64], k: usize) -> Vec<f64> {
    (0..=k)
        .map(|i| compute_quantile(sorted_values, i as f64 / k as f64))
        .collect()
}
