use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use titanic_analysis::table::{PassengerTable, names};
use titanic_stats::correlation::CorrelationMatrix;

use super::Chart;
use crate::{
    ChartError,
    error::drawing_error,
    figure::{Canvas, Figure, Scale, sizes},
    palette::{self, Palettes},
};

/// Columns included in the matrix, in display order.
pub const CORRELATION_COLUMNS: [&str; 6] = [
    names::AGE,
    names::SIBLINGS_SPOUSES,
    names::PARENTS_CHILDREN,
    names::FARE,
    names::FAMILY_SIZE,
    names::SURVIVED,
];

const COLORBAR_STEPS: usize = 200;

/// Annotated heatmap of pairwise correlations among the numeric columns.
#[derive(Debug, Clone)]
pub struct CorrelationHeatmap {
    pub matrix: CorrelationMatrix,
}

/// Maps a correlation in `[-1, 1]` onto the colormap.
#[must_use]
pub fn cell_color(r: f64) -> RGBColor {
    palette::coolwarm((r.clamp(-1.0, 1.0) + 1.0) / 2.0)
}

impl Chart for CorrelationHeatmap {
    const PREFIX: &'static str = "correlation_heatmap";
    const FIGURE: Figure = Figure::new(10.0, 8.0);

    fn from_table(table: &PassengerTable, _palettes: &Palettes) -> Result<Self, ChartError> {
        let columns = CORRELATION_COLUMNS
            .iter()
            .map(|name| Ok((*name, table.numeric_column(name)?)))
            .collect::<Result<Vec<_>, ChartError>>()?;
        Ok(Self {
            matrix: CorrelationMatrix::from_columns(&columns),
        })
    }

    #[expect(clippy::cast_precision_loss)]
    fn draw(&self, canvas: &Canvas<'_>, scale: Scale) -> Result<(), ChartError> {
        let body = canvas
            .titled(
                "Correlation Heatmap of Numerical Features",
                scale.font(sizes::TITLE),
            )
            .map_err(drawing_error)?;
        let (width, _) = body.dim_in_pixel();
        let (cells, bar) = body.split_horizontally(width * 86 / 100);

        let margin = scale.px_u32(10.0);
        let bottom = scale.px_u32(30.0);
        let n = self.matrix.len();
        let size = n as f64;
        let mut chart = ChartBuilder::on(&cells)
            .margin(margin)
            .x_label_area_size(bottom)
            .y_label_area_size(scale.px_u32(72.0))
            .build_cartesian_2d(0.0..size, 0.0..size)
            .map_err(drawing_error)?;

        for (i, row) in self.matrix.values.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let Some(r) = *value else { continue };
                let (x, y) = (j as f64, size - i as f64);
                let color = cell_color(r);
                chart
                    .draw_series([Rectangle::new([(x, y), (x + 1.0, y - 1.0)], color.filled())])
                    .map_err(drawing_error)?;
                chart
                    .draw_series([Text::new(
                        format!("{r:.2}"),
                        (x + 0.5, y - 0.5),
                        scale
                            .centered_text(sizes::TICK)
                            .color(&palette::contrasting_text(color)),
                    )])
                    .map_err(drawing_error)?;
            }
        }

        let (base_x, base_y) = canvas.get_base_pixel();
        let gap = scale.px_i32(4.0);
        for (k, label) in self.matrix.labels.iter().enumerate() {
            let center = k as f64 + 0.5;
            let (x, y) = chart.backend_coord(&(center, 0.0));
            canvas
                .draw(&Text::new(
                    label.clone(),
                    (x - base_x, y - base_y + gap),
                    scale.text(sizes::TICK).pos(Pos::new(HPos::Center, VPos::Top)),
                ))
                .map_err(drawing_error)?;
            let (x, y) = chart.backend_coord(&(0.0, size - center));
            canvas
                .draw(&Text::new(
                    label.clone(),
                    (x - base_x - gap, y - base_y),
                    scale.text(sizes::TICK).pos(Pos::new(HPos::Right, VPos::Center)),
                ))
                .map_err(drawing_error)?;
        }

        draw_colorbar(&bar, scale, margin, bottom)
    }
}

#[expect(clippy::cast_precision_loss)]
fn draw_colorbar(area: &Canvas<'_>, scale: Scale, margin: u32, bottom: u32) -> Result<(), ChartError> {
    let mut bar = ChartBuilder::on(area)
        .margin(margin)
        .margin_right(scale.px_u32(24.0))
        .x_label_area_size(bottom)
        .set_label_area_size(LabelAreaPosition::Right, scale.px_u32(30.0))
        .build_cartesian_2d(0.0..1.0, -1.0..1.0)
        .map_err(drawing_error)?;

    let step = 2.0 / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let low = -1.0 + step * k as f64;
        let color = cell_color(low + step / 2.0);
        Rectangle::new([(0.0, low), (1.0, low + step)], color.filled())
    }))
    .map_err(drawing_error)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|v| format!("{v:.1}"))
        .label_style(scale.text(sizes::TICK))
        .draw()
        .map_err(drawing_error)
}
