use std::{error::Error, path::PathBuf};

use anyhow::Context as _;
use titanic_analysis::{features, loader, table::PassengerTable};
use titanic_charts::{
    ChartError, ChartWriter, Palettes,
    chart::{
        self, AgeDistribution, ClassSurvival, CorrelationHeatmap, EmbarkationSurvival,
        FareDistribution, GenderSurvival,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub dpi: u32,
}

/// Runs the load, prepare, and render stages over one dataset.
#[derive(Debug)]
pub struct Visualizer {
    data_path: PathBuf,
    table: Option<PassengerTable>,
    palettes: Palettes,
    writer: ChartWriter,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        let VisualizerConfig {
            data_path,
            output_dir,
            dpi,
        } = config;
        Self {
            data_path,
            table: None,
            palettes: Palettes::default(),
            writer: ChartWriter::with_dpi(output_dir, dpi),
        }
    }

    #[cfg(test)]
    pub fn table(&self) -> Option<&PassengerTable> {
        self.table.as_ref()
    }

    /// Loads the passenger table. Failures are logged and reported as `false`.
    pub fn load_data(&mut self) -> bool {
        match loader::load_csv(&self.data_path) {
            Ok(table) => {
                self.table = Some(table);
                true
            }
            Err(e) => {
                log::error!("{}", error_chain(&e));
                false
            }
        }
    }

    /// Adds the derived columns. Fails when no table has been loaded.
    pub fn prepare_data(&mut self) -> bool {
        let Some(table) = self.table.as_mut() else {
            log::error!("No passenger data loaded; nothing to prepare");
            return false;
        };
        match features::derive_features(table) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Data preparation failed: {}", error_chain(&e));
                false
            }
        }
    }

    /// Renders the six charts in order, stopping at the first failure.
    pub fn create_visualizations(&mut self) -> Result<(), ChartError> {
        let Some(table) = &self.table else {
            return Ok(());
        };
        let palettes = &self.palettes;
        let writer = &mut self.writer;
        log::debug!("Rendering charts at {} dpi", writer.dpi());
        chart::render::<ClassSurvival>(table, palettes, writer)?;
        chart::render::<GenderSurvival>(table, palettes, writer)?;
        chart::render::<AgeDistribution>(table, palettes, writer)?;
        chart::render::<CorrelationHeatmap>(table, palettes, writer)?;
        chart::render::<FareDistribution>(table, palettes, writer)?;
        chart::render::<EmbarkationSurvival>(table, palettes, writer)?;
        Ok(())
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.writer.ensure_output_dir()?;
        if !self.load_data() {
            return Ok(());
        }
        if !self.prepare_data() {
            return Ok(());
        }
        self.create_visualizations().with_context(|| {
            format!(
                "failed to save charts to {}",
                self.writer.output_dir().display()
            )
        })?;
        log::info!("Visualization done");
        Ok(())
    }
}

/// Formats an error followed by its sources, separated by `: `.
///
/// Sources already spelled out by the outer message are not repeated.
fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.ends_with(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}
