//! Columnar in-memory passenger table.
//!
//! The table is a list of named, typed columns of equal length. It is created
//! by the loader, enriched in place by the feature deriver, and read by the
//! charts.

use std::borrow::Cow;

use crate::column::{CategoricalColumn, Column, ColumnKind};

/// Well-known column names of the passenger dataset.
pub mod names {
    pub const PASSENGER_CLASS: &str = "Pclass";
    pub const SURVIVED: &str = "Survived";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const SIBLINGS_SPOUSES: &str = "SibSp";
    pub const PARENTS_CHILDREN: &str = "Parch";
    pub const FARE: &str = "Fare";
    pub const EMBARKED: &str = "Embarked";
    pub const NAME: &str = "Name";

    pub const FAMILY_SIZE: &str = "FamilySize";
    pub const IS_ALONE: &str = "IsAlone";
    pub const AGE_GROUP: &str = "AgeGroup";
    pub const TITLE: &str = "Title";
    pub const FARE_BIN: &str = "FareBin";
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("column '{name}' is missing from the passenger table")]
    MissingColumn { name: String },
    #[display("column '{name}' has type {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: ColumnKind,
        actual: ColumnKind,
    },
    #[display("column '{name}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[display("column '{name}' appears more than once")]
    DuplicateColumn { name: String },
}

/// An ordered collection of passenger records stored column by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassengerTable {
    len: usize,
    columns: Vec<(String, Column)>,
}

impl PassengerTable {
    /// Builds a table from named columns.
    ///
    /// All columns must have the same length and distinct names.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (index, (name, column)) in columns.into_iter().enumerate() {
            let name = name.into();
            if index == 0 {
                table.len = column.len();
            }
            if table.contains(&name) {
                return Err(TableError::DuplicateColumn { name });
            }
            table.check_len(&name, &column)?;
            table.columns.push((name, column));
        }
        Ok(table)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find_map(|(n, column)| (n == name).then_some(column))
            .ok_or_else(|| TableError::MissingColumn {
                name: name.to_owned(),
            })
    }

    fn column_mut(&mut self, name: &str) -> Result<&mut Column, TableError> {
        self.columns
            .iter_mut()
            .find_map(|(n, column)| (n == name).then_some(column))
            .ok_or_else(|| TableError::MissingColumn {
                name: name.to_owned(),
            })
    }

    pub fn int_column(&self, name: &str) -> Result<&[Option<i64>], TableError> {
        match self.column(name)? {
            Column::Int(values) => Ok(values),
            other => Err(type_mismatch(name, ColumnKind::Int, other)),
        }
    }

    pub fn float_column(&self, name: &str) -> Result<&[Option<f64>], TableError> {
        match self.column(name)? {
            Column::Float(values) => Ok(values),
            other => Err(type_mismatch(name, ColumnKind::Float, other)),
        }
    }

    pub fn text_column(&self, name: &str) -> Result<&[Option<String>], TableError> {
        match self.column(name)? {
            Column::Text(values) => Ok(values),
            other => Err(type_mismatch(name, ColumnKind::Text, other)),
        }
    }

    /// Like [`text_column`](Self::text_column), but a column with no values
    /// at all is read as text whatever type it was loaded as.
    pub fn text_values(&self, name: &str) -> Result<Cow<'_, [Option<String>]>, TableError> {
        match self.column(name)? {
            Column::Text(values) => Ok(Cow::Borrowed(values)),
            column if column.is_all_missing() => Ok(Cow::Owned(vec![None; column.len()])),
            other => Err(type_mismatch(name, ColumnKind::Text, other)),
        }
    }

    pub fn category_column(&self, name: &str) -> Result<&CategoricalColumn, TableError> {
        match self.column(name)? {
            Column::Category(column) => Ok(column),
            other => Err(type_mismatch(name, ColumnKind::Category, other)),
        }
    }

    /// Returns an integer or float column as floats.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, TableError> {
        let column = self.column(name)?;
        column
            .to_f64()
            .ok_or_else(|| type_mismatch(name, ColumnKind::Float, column))
    }

    /// Mutable access to a float column, converting an integer column to
    /// floats first.
    pub fn float_column_mut(&mut self, name: &str) -> Result<&mut Vec<Option<f64>>, TableError> {
        let column = self.column_mut(name)?;
        if let Column::Int(_) = column {
            // to_f64 cannot fail on an integer column
            if let Some(values) = column.to_f64() {
                *column = Column::Float(values);
            }
        }
        match column {
            Column::Float(values) => Ok(values),
            other => Err(type_mismatch(name, ColumnKind::Float, other)),
        }
    }

    /// Mutable access to a text column. A column with no values at all is
    /// converted to an empty text column first.
    pub fn text_column_mut(&mut self, name: &str) -> Result<&mut Vec<Option<String>>, TableError> {
        let column = self.column_mut(name)?;
        if column.kind() != ColumnKind::Text && column.is_all_missing() {
            *column = Column::Text(vec![None; column.len()]);
        }
        match column {
            Column::Text(values) => Ok(values),
            other => Err(type_mismatch(name, ColumnKind::Text, other)),
        }
    }

    /// Adds a column, replacing an existing column with the same name in place.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.columns.is_empty() {
            self.len = column.len();
        }
        self.check_len(&name, &column)?;
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name, column)),
        }
        Ok(())
    }

    fn check_len(&self, name: &str, column: &Column) -> Result<(), TableError> {
        if column.len() == self.len {
            Ok(())
        } else {
            Err(TableError::LengthMismatch {
                name: name.to_owned(),
                expected: self.len,
                actual: column.len(),
            })
        }
    }
}

fn type_mismatch(name: &str, expected: ColumnKind, actual: &Column) -> TableError {
    TableError::TypeMismatch {
        name: name.to_owned(),
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PassengerTable {
        PassengerTable::from_columns([
            ("Pclass", Column::Int(vec![Some(1), Some(3)])),
            ("Fare", Column::Float(vec![Some(100.0), None])),
            (
                "Sex",
                Column::Text(vec![Some("female".into()), Some("male".into())]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_typed_access() {
        let table = sample_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.int_column("Pclass").unwrap(), &[Some(1), Some(3)]);
        assert_eq!(
            table.numeric_column("Pclass").unwrap(),
            vec![Some(1.0), Some(3.0)]
        );
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["Pclass", "Fare", "Sex"]
        );
    }

    #[test]
    fn test_missing_and_mismatched_columns() {
        let table = sample_table();
        assert_eq!(
            table.column("Age"),
            Err(TableError::MissingColumn { name: "Age".into() })
        );
        assert_eq!(
            table.int_column("Sex"),
            Err(TableError::TypeMismatch {
                name: "Sex".into(),
                expected: ColumnKind::Int,
                actual: ColumnKind::Text,
            })
        );
        assert!(table.numeric_column("Sex").is_err());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut table = sample_table();
        table
            .insert_column("Pclass", Column::Int(vec![Some(2), Some(2)]))
            .unwrap();
        assert_eq!(table.int_column("Pclass").unwrap(), &[Some(2), Some(2)]);
        assert_eq!(table.column_names().next(), Some("Pclass"));

        let err = table
            .insert_column("Short", Column::Int(vec![Some(1)]))
            .unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { .. }));
    }

    #[test]
    fn test_float_column_mut_promotes_integers() {
        let mut table = sample_table();
        table.float_column_mut("Pclass").unwrap()[0] = Some(1.5);
        assert_eq!(table.float_column("Pclass").unwrap(), &[Some(1.5), Some(3.0)]);
    }

    #[test]
    fn test_all_missing_column_reads_as_text() {
        let mut table = PassengerTable::from_columns([
            ("Embarked", Column::Float(vec![None, None])),
            ("Fare", Column::Float(vec![Some(7.25), None])),
        ])
        .unwrap();
        assert_eq!(table.text_values("Embarked").unwrap().as_ref(), &[None, None]);
        assert!(matches!(
            table.text_values("Fare"),
            Err(TableError::TypeMismatch { .. })
        ));
        assert!(table.text_column("Embarked").is_err());

        assert_eq!(table.text_column_mut("Embarked").unwrap(), &vec![None, None]);
        assert_eq!(table.column("Embarked").unwrap().kind(), ColumnKind::Text);
        assert!(table.text_column_mut("Fare").is_err());
        assert_eq!(table.column("Fare").unwrap().kind(), ColumnKind::Float);
    }

    #[test]
    fn test_from_columns_rejects_duplicates_and_ragged() {
        let dup = PassengerTable::from_columns([
            ("A", Column::Int(vec![Some(1)])),
            ("A", Column::Int(vec![Some(2)])),
        ]);
        assert!(matches!(dup, Err(TableError::DuplicateColumn { .. })));

        let ragged = PassengerTable::from_columns([
            ("A", Column::Int(vec![Some(1)])),
            ("B", Column::Int(vec![Some(2), None])),
        ]);
        assert!(matches!(ragged, Err(TableError::LengthMismatch { .. })));
    }
}
