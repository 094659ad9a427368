//! Box-plot summaries.
//!
//! Quartiles use linear interpolation. Whiskers follow Tukey's rule: each
//! whisker reaches the most extreme observation within 1.5 IQR of its quartile,
//! and observations beyond the whiskers are reported as outliers.

use crate::quantile::compute_quantile;

/// Multiplier applied to the interquartile range to place the whisker fences.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Summary statistics needed to draw one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation at or above `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest observation at or below `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Observations outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarizes unsorted values. Returns `None` for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use titanic_stats::boxplot::BoxSummary;
    ///
    /// let summary = BoxSummary::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// assert_eq!(summary.median, 3.5);
    /// assert_eq!(summary.upper_whisker, 5.0);
    /// assert_eq!(summary.outliers, vec![100.0]);
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Summarizes pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let q1 = compute_quantile(sorted_values, 0.25);
        let median = compute_quantile(sorted_values, 0.5);
        let q3 = compute_quantile(sorted_values, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let inside = sorted_values
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside.clone().next().unwrap_or(q1);
        let upper_whisker = inside.last().unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}
