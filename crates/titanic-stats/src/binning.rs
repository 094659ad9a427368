//! Interval binning for data analysis
//!
//! This module maps continuous values onto a small number of ordered,
//! right-closed intervals `(e[i], e[i + 1]]`. Bins are either given by fixed
//! edges (e.g. age brackets) or derived from the data itself by placing the
//! edges at evenly spaced quantiles, which yields equal-frequency bins.
//!
//! # Examples
//!
//! ```
//! use titanic_stats::binning::IntervalBins;
//!
//! // (0, 12], (12, 18], (18, 30]
//! let bins = IntervalBins::new(vec![0.0, 12.0, 18.0, 30.0]).unwrap();
//! assert_eq!(bins.assign(12.0), Some(0));
//! assert_eq!(bins.assign(12.5), Some(1));
//! assert_eq!(bins.assign(0.0), None); // lower edge is open
//! assert_eq!(bins.assign(31.0), None);
//! ```

use crate::quantile;

/// Errors produced while constructing interval bins.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinningError {
    #[display("at least two bin edges are required, got {count}")]
    TooFewEdges { count: usize },
    #[display("bin edges must be strictly increasing, edge {index} ({value}) is not")]
    NonIncreasingEdges { index: usize, value: f64 },
    #[display("cannot derive quantile edges from an empty dataset")]
    NoData,
}

/// Ordered right-closed intervals defined by their edges.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalBins {
    edges: Vec<f64>,
    include_lowest: bool,
}

impl IntervalBins {
    /// Creates bins from strictly increasing edges.
    ///
    /// `n` edges define `n - 1` intervals. The lowest edge itself is excluded.
    pub fn new(edges: Vec<f64>) -> Result<Self, BinningError> {
        if edges.len() < 2 {
            return Err(BinningError::TooFewEdges { count: edges.len() });
        }
        if let Some(index) = edges.windows(2).position(|w| w[0].total_cmp(&w[1]).is_ge()) {
            return Err(BinningError::NonIncreasingEdges {
                index: index + 1,
                value: edges[index + 1],
            });
        }
        Ok(Self {
            edges,
            include_lowest: false,
        })
    }

    /// Creates `num_bins` equal-frequency bins from the distribution of `values`.
    ///
    /// Edges are placed at quantiles `0, 1/num_bins, ..., 1` (linear
    /// interpolation). The first interval includes its lower edge so that the
    /// minimum value is assigned. Fails if two edges coincide, which happens
    /// when many values are tied at a quantile boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use titanic_stats::binning::{BinningError, IntervalBins};
    ///
    /// let bins = IntervalBins::from_quantiles(&[1.0, 2.0, 3.0, 4.0, 5.0], 4).unwrap();
    /// assert_eq!(bins.edges(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    ///
    /// let tied = IntervalBins::from_quantiles(&[1.0, 1.0, 1.0, 1.0, 2.0], 4);
    /// assert!(matches!(tied, Err(BinningError::NonIncreasingEdges { .. })));
    /// ```
    pub fn from_quantiles(values: &[f64], num_bins: usize) -> Result<Self, BinningError> {
        if values.is_empty() {
            return Err(BinningError::NoData);
        }
        if num_bins == 0 {
            return Err(BinningError::TooFewEdges { count: 1 });
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let edges = quantile::equal_frequency_cuts(&sorted, num_bins);

        let mut bins = Self::new(edges)?;
        bins.include_lowest = true;
        Ok(bins)
    }

    /// Returns the bin edges.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Returns the number of intervals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// Always false: construction requires at least one interval.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the index of the interval containing `value`.
    ///
    /// Returns `None` for values outside all intervals and for NaN.
    #[must_use]
    pub fn assign(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let first = self.edges[0];
        if self.include_lowest && value == first {
            return Some(0);
        }
        if value <= first || value > self.edges[self.edges.len() - 1] {
            return None;
        }
        // First edge that is >= value closes the containing interval.
        let upper = self.edges.partition_point(|&edge| edge < value);
        Some(upper - 1)
    }
}
