//! Pearson correlation over pairwise-complete observations.

/// Computes the Pearson correlation coefficient of two columns.
///
/// Only positions where both values are present are used. Returns `None` when
/// fewer than two complete pairs remain or when either column is constant over
/// those pairs.
///
/// # Examples
///
/// ```
/// use titanic_stats::correlation::pearson;
///
/// let xs = [Some(1.0), Some(2.0), Some(3.0), None];
/// let ys = [Some(2.0), Some(4.0), Some(6.0), Some(1.0)];
/// assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect::<Vec<_>>();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

/// Symmetric matrix of pairwise correlations between named columns.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    /// Column labels, in row/column order.
    pub labels: Vec<String>,
    /// `values[i][j]` is the correlation of column `i` with column `j`.
    /// `None` where the coefficient is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Computes the correlation matrix of the given columns.
    ///
    /// Diagonal entries are `1.0` for columns with any variance.
    #[must_use]
    pub fn from_columns<S>(columns: &[(S, Vec<Option<f64>>)]) -> Self
    where
        S: AsRef<str>,
    {
        let labels = columns
            .iter()
            .map(|(label, _)| label.as_ref().to_owned())
            .collect();
        let values = columns
            .iter()
            .map(|(_, xs)| columns.iter().map(|(_, ys)| pearson(xs, ys)).collect())
            .collect();
        Self { labels, values }
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the matrix has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the coefficient between the columns labelled `a` and `b`.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        self.values[i][j]
    }
}
