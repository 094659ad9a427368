//! Delimited-file loader for the passenger table.
//!
//! Reads a header row followed by data rows and infers each column's type:
//! integer if every present value parses as `i64`, otherwise float if every
//! present value parses as `f64`, otherwise text.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use crate::{
    column::Column,
    table::{PassengerTable, TableError},
};

/// Field values treated as missing.
pub const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null", "None"];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("could not find {}", path.display())]
    FileNotFound { path: PathBuf },
    #[display("empty dataset: {}", path.display())]
    EmptyData { path: PathBuf },
    #[display("failed to read {}", path.display())]
    Read { path: PathBuf, source: csv::Error },
    #[display("inconsistent table in {}", path.display())]
    Table { path: PathBuf, source: TableError },
}

/// Loads the passenger table from a CSV file.
///
/// # Errors
///
/// - [`LoadError::FileNotFound`] if the path does not resolve to a file
/// - [`LoadError::EmptyData`] if the file has no header or no data rows
/// - [`LoadError::Read`] for other I/O or CSV syntax errors
pub fn load_csv<P>(path: P) -> Result<PassengerTable, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_owned(),
            }
        } else {
            LoadError::Read {
                path: path.to_owned(),
                source: e.into(),
            }
        }
    })?;

    let table = read_with_origin(file, path)?;
    log::info!("Loaded {} passenger records", table.len());
    Ok(table)
}

/// Reads the passenger table from any reader.
///
/// Errors name the origin as `<memory>`.
pub fn read_csv<R>(reader: R) -> Result<PassengerTable, LoadError>
where
    R: io::Read,
{
    read_with_origin(reader, Path::new("<memory>"))
}

fn read_with_origin<R>(reader: R, origin: &Path) -> Result<PassengerTable, LoadError>
where
    R: io::Read,
{
    let read_error = |source| LoadError::Read {
        path: origin.to_owned(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();
    if headers.iter().all(String::is_empty) {
        return Err(LoadError::EmptyData {
            path: origin.to_owned(),
        });
    }

    let mut raw_columns = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        for (index, values) in raw_columns.iter_mut().enumerate() {
            let field = record.get(index).map(str::trim).unwrap_or_default();
            let value = (!MISSING_MARKERS.contains(&field)).then(|| field.to_owned());
            values.push(value);
        }
    }
    if raw_columns.first().is_none_or(Vec::is_empty) {
        return Err(LoadError::EmptyData {
            path: origin.to_owned(),
        });
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, values)| (name, infer_column(values)));
    PassengerTable::from_columns(columns).map_err(|source| LoadError::Table {
        path: origin.to_owned(),
        source,
    })
}

/// Picks the narrowest column type that every present value parses as.
fn infer_column(values: Vec<Option<String>>) -> Column {
    let present = || values.iter().flatten();

    if present().next().is_none() {
        return Column::Float(vec![None; values.len()]);
    }
    if present().all(|v| v.parse::<i64>().is_ok()) {
        return Column::Int(
            values
                .iter()
                .map(|v| v.as_deref().and_then(|v| v.parse().ok()))
                .collect(),
        );
    }
    if present().all(|v| v.parse::<f64>().is_ok()) {
        return Column::Float(
            values
                .iter()
                .map(|v| v.as_deref().and_then(|v| v.parse().ok()))
                .collect(),
        );
    }
    Column::Text(values)
}
