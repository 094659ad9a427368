//! Central tendency and spread.

use std::collections::BTreeMap;

/// Streaming count, mean, and variance of a sample (Welford's update).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    count: usize,
    mean: f64,
    /// Sum of squared deviations from the running mean.
    m2: f64,
}

impl Moments {
    /// Adds one observation.
    #[expect(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, `None` before the first observation.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Standard deviation with an `n - 1` denominator; needs two observations.
    ///
    /// ```
    /// use titanic_stats::descriptive::Moments;
    ///
    /// let moments = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
    ///     .into_iter()
    ///     .collect::<Moments>();
    /// assert!((moments.mean().unwrap() - 5.0).abs() < 1e-12);
    /// assert!((moments.sample_std_dev().unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample_std_dev(&self) -> Option<f64> {
        (self.count > 1).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

impl FromIterator<f64> for Moments {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut moments = Self::default();
        iter.into_iter().for_each(|value| moments.push(value));
        moments
    }
}

impl Extend<f64> for Moments {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = f64>,
    {
        iter.into_iter().for_each(|value| self.push(value));
    }
}

/// Middle value of `values`, averaging the two central values when the count
/// is even. `None` for no values.
///
/// ```
/// use titanic_stats::descriptive::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut ordered = values.to_vec();
    ordered.sort_by(f64::total_cmp);
    let upper = ordered.len() / 2;
    Some(if ordered.len() % 2 == 0 {
        f64::midpoint(ordered[upper - 1], ordered[upper])
    } else {
        ordered[upper]
    })
}

/// Most frequent value; ties go to the smallest value in `Ord` order.
///
/// ```
/// use titanic_stats::descriptive::mode;
///
/// assert_eq!(mode(["S", "C", "S", "Q"]), Some("S"));
/// assert_eq!(mode(["Q", "C", "Q", "C"]), Some("C"));
/// ```
#[must_use]
pub fn mode<I, T>(values: I) -> Option<T>
where
    I: IntoIterator<Item = T>,
    T: Ord,
{
    let mut tally = BTreeMap::<T, usize>::new();
    for value in values {
        *tally.entry(value).or_default() += 1;
    }
    let top = tally.values().copied().max()?;
    // Keys iterate in ascending order.
    tally
        .into_iter()
        .find_map(|(value, count)| (count == top).then_some(value))
}
