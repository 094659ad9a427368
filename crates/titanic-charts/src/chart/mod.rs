//! The six survival charts.
//!
//! Every chart is split in two phases: [`Chart::from_table`] extracts the
//! grouped statistic from the passenger table, and [`Chart::draw`] renders it.
//! All column lookups happen in the first phase, so a table missing a
//! required column fails before any file is created.

use std::path::PathBuf;

use titanic_analysis::table::PassengerTable;

pub use self::{
    age_distribution::AgeDistribution, class_survival::ClassSurvival,
    correlation_heatmap::CorrelationHeatmap, embarkation_survival::EmbarkationSurvival,
    fare_distribution::FareDistribution, gender_pie::GenderSurvival,
};
use crate::{
    ChartError,
    figure::{Canvas, Figure, Scale},
    palette::Palettes,
    writer::ChartWriter,
};

mod age_distribution;
mod class_survival;
mod correlation_heatmap;
mod embarkation_survival;
mod fare_distribution;
mod gender_pie;

pub trait Chart: Sized {
    /// File name prefix of the saved image.
    const PREFIX: &'static str;
    /// Canvas size.
    const FIGURE: Figure;

    fn from_table(table: &PassengerTable, palettes: &Palettes) -> Result<Self, ChartError>;

    fn draw(&self, canvas: &Canvas<'_>, scale: Scale) -> Result<(), ChartError>;
}

/// Extracts chart `C` from `table` and saves it through `writer`.
///
/// Returns the path of the written image.
pub fn render<C>(
    table: &PassengerTable,
    palettes: &Palettes,
    writer: &mut ChartWriter,
) -> Result<PathBuf, ChartError>
where
    C: Chart,
{
    let chart = C::from_table(table, palettes)?;
    writer.save(C::PREFIX, C::FIGURE, |canvas, scale| chart.draw(canvas, scale))
}

/// Tick labels for the two outcomes, in `Survived` value order.
pub const OUTCOME_LABELS: [&str; 2] = ["Perished", "Survived"];

/// Maps a `Survived` value to its outcome index (0 perished, 1 survived).
#[expect(clippy::float_cmp)]
#[must_use]
pub fn outcome_index(survived: f64) -> Option<usize> {
    if survived == 0.0 {
        Some(0)
    } else if survived == 1.0 {
        Some(1)
    } else {
        None
    }
}

/// Passenger counts split by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub perished: usize,
    pub survived: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: usize) {
        match outcome {
            0 => self.perished += 1,
            _ => self.survived += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.perished + self.survived
    }

    /// `[perished, survived]`
    #[must_use]
    pub fn as_array(&self) -> [usize; 2] {
        [self.perished, self.survived]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use titanic_analysis::{features, loader};

    use super::*;

    /// A small prepared table covering every column the charts read.
    pub(crate) fn prepared_table() -> PassengerTable {
        let csv = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Fare,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,7.25,S
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,71.2833,C
3,1,3,\"Heikkinen, Miss. Laina\",female,26,0,0,7.925,S
4,1,1,\"Futrelle, Mrs. Jacques Heath\",female,35,1,0,53.1,S
5,0,3,\"Allen, Mr. William Henry\",male,35,0,0,8.05,S
6,0,3,\"Moran, Mr. James\",male,,0,0,8.4583,Q
7,0,1,\"McCarthy, Mr. Timothy J\",male,54,0,0,51.8625,S
8,0,3,\"Palsson, Master. Gosta Leonard\",male,2,3,1,21.075,S
9,1,3,\"Johnson, Mrs. Oscar W\",female,27,0,2,11.1333,S
10,1,2,\"Nasser, Mrs. Nicholas\",female,14,1,0,30.0708,C
11,1,3,\"Sandstrom, Miss. Marguerite Rut\",female,4,1,1,16.7,
12,0,2,\"Fynney, Mr. Joseph J\",male,35,0,0,26,S
";
        let mut table = loader::read_csv(csv.as_bytes()).unwrap();
        features::derive_features(&mut table).unwrap();
        table
    }

    pub(crate) fn without_column(table: &PassengerTable, dropped: &str) -> PassengerTable {
        let columns = table
            .column_names()
            .filter(|name| *name != dropped)
            .map(|name| (name.to_owned(), table.column(name).unwrap().clone()))
            .collect::<Vec<_>>();
        PassengerTable::from_columns(columns).unwrap()
    }

    #[test]
    fn test_outcome_index() {
        assert_eq!(outcome_index(0.0), Some(0));
        assert_eq!(outcome_index(1.0), Some(1));
        assert_eq!(outcome_index(0.5), None);
    }

    #[test]
    fn test_outcome_counts() {
        let mut counts = OutcomeCounts::default();
        counts.record(0);
        counts.record(1);
        counts.record(1);
        assert_eq!(counts.as_array(), [1, 2]);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_missing_column_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = without_column(&prepared_table(), "Pclass");
        let mut writer = ChartWriter::new(dir.path());

        let result = render::<ClassSurvival>(&table, &Palettes::default(), &mut writer);
        assert!(matches!(result, Err(ChartError::Table(_))));
        assert_eq!(writer.counter(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_render_all_charts() {
        let dir = tempfile::tempdir().unwrap();
        let table = prepared_table();
        let palettes = Palettes::default();
        let mut writer = ChartWriter::with_dpi(dir.path(), 50);

        let paths = [
            render::<ClassSurvival>(&table, &palettes, &mut writer).unwrap(),
            render::<GenderSurvival>(&table, &palettes, &mut writer).unwrap(),
            render::<AgeDistribution>(&table, &palettes, &mut writer).unwrap(),
            render::<CorrelationHeatmap>(&table, &palettes, &mut writer).unwrap(),
            render::<FareDistribution>(&table, &palettes, &mut writer).unwrap(),
            render::<EmbarkationSurvival>(&table, &palettes, &mut writer).unwrap(),
        ];
        let names = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "class_survival_1.png",
                "gender_survival_pie_2.png",
                "age_distribution_3.png",
                "correlation_heatmap_4.png",
                "fare_distribution_5.png",
                "embarkation_survival_6.png",
            ]
        );
        assert!(paths.iter().all(|p| p.is_file()));
    }
}
