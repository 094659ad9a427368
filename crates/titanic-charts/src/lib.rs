//! Survival charts rendered to PNG files.
//!
//! Each chart type implements [`Chart`]: it pulls its grouped statistic out
//! of a prepared [`PassengerTable`](titanic_analysis::table::PassengerTable)
//! and draws it with plotters. [`ChartWriter`] owns the output directory and
//! numbers the saved files in render order.
//!
//! ```no_run
//! use titanic_charts::{ChartWriter, Palettes, chart::{self, ClassSurvival}};
//! # fn demo(table: &titanic_analysis::table::PassengerTable) -> Result<(), titanic_charts::ChartError> {
//! let mut writer = ChartWriter::new("outputs");
//! writer.ensure_output_dir()?;
//! let path = chart::render::<ClassSurvival>(table, &Palettes::default(), &mut writer)?;
//! assert!(path.ends_with("class_survival_1.png"));
//! # Ok(())
//! # }
//! ```

pub use self::{
    chart::{Chart, render},
    error::ChartError,
    palette::Palettes,
    writer::ChartWriter,
};

pub mod chart;
mod error;
pub mod figure;
pub mod palette;
pub mod writer;
