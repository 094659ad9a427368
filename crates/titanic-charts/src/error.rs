use std::{fmt, io, path::PathBuf};

use titanic_analysis::table::TableError;

/// Errors that can occur while extracting, drawing, or saving a chart
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ChartError {
    #[display("chart input unavailable: {_0}")]
    #[from]
    Table(TableError),

    #[display("failed to draw chart: {message}")]
    Drawing { message: String },

    #[display("failed to create output directory {}", path.display())]
    OutputDir { path: PathBuf, source: io::Error },
}

/// Converts a plotters error into [`ChartError::Drawing`].
pub(crate) fn drawing_error<E>(error: E) -> ChartError
where
    E: fmt::Display,
{
    ChartError::Drawing {
        message: error.to_string(),
    }
}
