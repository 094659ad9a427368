//! Gaussian kernel density estimation.
//!
//! Bandwidth follows Scott's rule, `sigma * n^(-1/5)` with `sigma` the sample
//! standard deviation. The density integrates to one over the real line.

use std::f64::consts::PI;

use crate::descriptive::Moments;

/// Gaussian kernel density estimate of a univariate sample.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fits a KDE using Scott's bandwidth.
    ///
    /// Returns `None` if there are fewer than two samples or the sample has no
    /// spread, since the bandwidth would be zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use titanic_stats::kde::GaussianKde;
    ///
    /// let kde = GaussianKde::new(&[7.25, 7.9, 8.05, 13.0, 26.0]).unwrap();
    /// assert!(kde.bandwidth() > 0.0);
    /// assert!(kde.density(8.0) > kde.density(60.0));
    /// assert!(GaussianKde::new(&[5.0, 5.0]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(samples: &[f64]) -> Option<Self> {
        let sigma = samples.iter().copied().collect::<Moments>().sample_std_dev()?;
        let bandwidth = sigma * (samples.len() as f64).powf(-0.2);
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return None;
        }
        Some(Self {
            samples: samples.to_vec(),
            bandwidth,
        })
    }

    /// Returns the kernel bandwidth.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Evaluates the density at `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / ((2.0 * PI).sqrt() * self.bandwidth * self.samples.len() as f64);
        self.samples
            .iter()
            .map(|s| {
                let z = (x - s) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            * norm
    }

    /// Evaluates the density on `grid_size` evenly spaced points spanning the
    /// sample range extended by `cut` bandwidths on each side.
    ///
    /// Returns `(x, density)` pairs in ascending `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate_grid(&self, grid_size: usize, cut: f64) -> Vec<(f64, f64)> {
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let start = min - cut * self.bandwidth;
        let end = max + cut * self.bandwidth;
        match grid_size {
            0 => vec![],
            1 => vec![(start, self.density(start))],
            _ => {
                let step = (end - start) / (grid_size - 1) as f64;
                (0..grid_size)
                    .map(|i| {
                        let x = start + step * i as f64;
                        (x, self.density(x))
                    })
                    .collect()
            }
        }
    }
}
