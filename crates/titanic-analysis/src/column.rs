//! Typed column storage for the passenger table.

use std::fmt;

/// The kind of values a [`Column`] stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Float,
    Text,
    Category,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnKind::Int => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
            ColumnKind::Category => "category",
        };
        fmt::Display::fmt(s, f)
    }
}

/// A single column of the passenger table. Every entry may be missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Category(CategoricalColumn),
}

impl Column {
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Int(_) => ColumnKind::Int,
            Column::Float(_) => ColumnKind::Float,
            Column::Text(_) => ColumnKind::Text,
            Column::Category(_) => ColumnKind::Category,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Int(values) => values.len(),
            Column::Float(values) => values.len(),
            Column::Text(values) => values.len(),
            Column::Category(column) => column.codes.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every entry is missing, including an empty column.
    #[must_use]
    pub fn is_all_missing(&self) -> bool {
        self.missing_count() == self.len()
    }

    /// Number of missing entries.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Int(values) => values.iter().filter(|v| v.is_none()).count(),
            Column::Float(values) => values.iter().filter(|v| v.is_none()).count(),
            Column::Text(values) => values.iter().filter(|v| v.is_none()).count(),
            Column::Category(column) => column.codes.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Returns the values as floats, if this is a numeric column.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn to_f64(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Column::Int(values) => Some(values.iter().map(|v| v.map(|v| v as f64)).collect()),
            Column::Float(values) => Some(values.clone()),
            Column::Text(_) | Column::Category(_) => None,
        }
    }
}

/// An ordered categorical column: a fixed label set plus per-row label codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalColumn {
    labels: Vec<String>,
    codes: Vec<Option<usize>>,
}

impl CategoricalColumn {
    /// Creates a categorical column.
    ///
    /// # Panics
    ///
    /// Panics if a code is out of range for `labels`.
    #[must_use]
    pub fn new(labels: Vec<String>, codes: Vec<Option<usize>>) -> Self {
        assert!(
            codes.iter().flatten().all(|&code| code < labels.len()),
            "category code out of range"
        );
        Self { labels, codes }
    }

    /// Returns the label of row `index`, or `None` if missing or out of bounds.
    #[must_use]
    pub fn label_at(&self, index: usize) -> Option<&str> {
        let code = (*self.codes.get(index)?)?;
        Some(&self.labels[code])
    }

    /// Iterates over the per-row labels.
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.codes
            .iter()
            .map(|code| code.map(|c| self.labels[c].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_labels() {
        let column = CategoricalColumn::new(
            vec!["Low".into(), "High".into()],
            vec![Some(1), None, Some(0), Some(1)],
        );
        assert_eq!(column.label_at(0), Some("High"));
        assert_eq!(column.label_at(1), None);
        assert_eq!(column.label_at(9), None);
        assert_eq!(
            column.iter().collect::<Vec<_>>(),
            vec![Some("High"), None, Some("Low"), Some("High")]
        );
    }

    #[test]
    #[should_panic(expected = "category code out of range")]
    fn test_categorical_rejects_bad_code() {
        let _ = CategoricalColumn::new(vec!["Only".into()], vec![Some(1)]);
    }

    #[test]
    fn test_numeric_conversion() {
        let ints = Column::Int(vec![Some(1), None, Some(3)]);
        assert_eq!(ints.to_f64(), Some(vec![Some(1.0), None, Some(3.0)]));
        assert_eq!(ints.missing_count(), 1);
        assert!(!ints.is_all_missing());
        assert!(Column::Float(vec![None, None]).is_all_missing());
        assert!(Column::Text(vec![]).to_f64().is_none());
    }
}
