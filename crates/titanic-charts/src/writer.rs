use std::{
    fs,
    path::{Path, PathBuf},
};

use plotters::prelude::*;

use crate::{
    ChartError,
    error::drawing_error,
    figure::{Canvas, DEFAULT_DPI, Figure, Scale},
};

/// Writes chart images into one output directory, numbering each file with a
/// running counter.
#[derive(Debug)]
pub struct ChartWriter {
    output_dir: PathBuf,
    dpi: u32,
    counter: usize,
}

impl ChartWriter {
    #[must_use]
    pub fn new<P>(output_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::with_dpi(output_dir, DEFAULT_DPI)
    }

    #[must_use]
    pub fn with_dpi<P>(output_dir: P, dpi: u32) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            output_dir: output_dir.into(),
            dpi: dpi.max(1),
            counter: 0,
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Number of paths handed out so far.
    #[must_use]
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Creates the output directory and any missing parents.
    pub fn ensure_output_dir(&self) -> Result<(), ChartError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ChartError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;
        log::debug!("Output directory ready: {}", self.output_dir.display());
        Ok(())
    }

    /// Advances the counter and returns `<output_dir>/<prefix>_<counter>.png`.
    pub fn next_path(&mut self, prefix: &str) -> PathBuf {
        self.counter += 1;
        self.output_dir
            .join(format!("{prefix}_{counter}.png", counter = self.counter))
    }

    /// Renders one chart to the next numbered file.
    ///
    /// The canvas is filled white before `draw` runs. If drawing or encoding
    /// fails, the partially written file is removed.
    pub fn save<F>(&mut self, prefix: &str, figure: Figure, draw: F) -> Result<PathBuf, ChartError>
    where
        F: FnOnce(&Canvas<'_>, Scale) -> Result<(), ChartError>,
    {
        let path = self.next_path(prefix);
        let size = figure.pixel_size(self.dpi);
        let scale = Scale::new(self.dpi);

        if let Err(e) = render_bitmap(&path, size, scale, draw) {
            if path.exists() {
                let _ = fs::remove_file(&path);
            }
            return Err(e);
        }

        let file_name = path.file_name().unwrap_or(path.as_os_str());
        log::info!("Saved visualization: {}", file_name.to_string_lossy());
        Ok(path)
    }
}

fn render_bitmap<F>(path: &Path, size: (u32, u32), scale: Scale, draw: F) -> Result<(), ChartError>
where
    F: FnOnce(&Canvas<'_>, Scale) -> Result<(), ChartError>,
{
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;
    draw(&root, scale)?;
    root.present().map_err(drawing_error)
}
