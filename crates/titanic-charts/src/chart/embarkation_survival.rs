use std::collections::BTreeMap;

use plotters::prelude::*;
use titanic_analysis::table::{PassengerTable, names};

use super::{Chart, OUTCOME_LABELS, OutcomeCounts, outcome_index};
use crate::{
    ChartError,
    error::drawing_error,
    figure::{self, Canvas, Figure, Scale, sizes},
    palette::{GRID, Palettes},
};

/// Known ports in display order.
pub const PORT_ORDER: [&str; 3] = ["S", "C", "Q"];

const BAR_WIDTH: f64 = 0.5;

/// Full name of an embarkation port code; unknown codes are shown as is.
#[must_use]
pub fn port_name(code: &str) -> &str {
    match code {
        "S" => "Southampton",
        "C" => "Cherbourg",
        "Q" => "Queenstown",
        other => other,
    }
}

/// Outcome counts for one embarkation port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortCounts {
    pub code: String,
    pub counts: OutcomeCounts,
}

/// Stacked bars of passenger outcomes per embarkation port.
#[derive(Debug, Clone)]
pub struct EmbarkationSurvival {
    /// `S`, `C`, `Q` first, then any other code alphabetically.
    pub ports: Vec<PortCounts>,
    colors: [RGBColor; 2],
}

impl Chart for EmbarkationSurvival {
    const PREFIX: &'static str = "embarkation_survival";
    const FIGURE: Figure = Figure::new(10.0, 6.0);

    fn from_table(table: &PassengerTable, palettes: &Palettes) -> Result<Self, ChartError> {
        let ports = table.text_column(names::EMBARKED)?;
        let survived = table.numeric_column(names::SURVIVED)?;

        let mut groups = BTreeMap::<&str, OutcomeCounts>::new();
        for (port, survived) in ports.iter().zip(&survived) {
            if let (Some(port), Some(outcome)) = (port, survived.and_then(outcome_index)) {
                groups.entry(port.as_str()).or_default().record(outcome);
            }
        }

        let mut ports = groups
            .into_iter()
            .map(|(code, counts)| PortCounts {
                code: code.to_owned(),
                counts,
            })
            .collect::<Vec<_>>();
        // Stable, so unknown codes keep their alphabetical order.
        ports.sort_by_key(|port| {
            PORT_ORDER
                .iter()
                .position(|known| *known == port.code)
                .unwrap_or(PORT_ORDER.len())
        });
        Ok(Self {
            ports,
            colors: palettes.survival,
        })
    }

    #[expect(clippy::cast_precision_loss)]
    fn draw(&self, canvas: &Canvas<'_>, scale: Scale) -> Result<(), ChartError> {
        let labels = self
            .ports
            .iter()
            .map(|port| port_name(&port.code).to_owned())
            .collect::<Vec<_>>();
        let tallest = self
            .ports
            .iter()
            .map(|port| port.counts.total())
            .max()
            .unwrap_or(0);
        let n = self.ports.len().max(1) as f64;

        let mut chart = figure::float_chart(
            canvas,
            scale,
            "Survival by Embarkation Port",
            -0.5..n - 0.5,
            0.0..figure::headroom(tallest as f64),
        )?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(GRID)
            .light_line_style(WHITE)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|x| figure::category_tick(&labels, *x))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .x_desc("Embarkation Port")
            .y_desc("Passenger Count")
            .label_style(scale.text(sizes::TICK))
            .axis_desc_style(scale.text(sizes::AXIS_LABEL))
            .draw()
            .map_err(drawing_error)?;

        for (i, port) in self.ports.iter().enumerate() {
            let x = i as f64;
            let mut bottom = 0.0;
            for (outcome, count) in port.counts.as_array().into_iter().enumerate() {
                let top = bottom + count as f64;
                chart
                    .draw_series([Rectangle::new(
                        [(x - BAR_WIDTH / 2.0, bottom), (x + BAR_WIDTH / 2.0, top)],
                        self.colors[outcome].filled(),
                    )])
                    .map_err(drawing_error)?;
                bottom = top;
            }
        }

        let entries = [
            (OUTCOME_LABELS[0], self.colors[0]),
            (OUTCOME_LABELS[1], self.colors[1]),
        ];
        figure::draw_legend(
            canvas,
            scale,
            figure::legend_anchor(&chart, scale, 6.0),
            Some("Outcome"),
            &entries,
        )
    }
}
