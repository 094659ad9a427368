use std::collections::BTreeMap;

use plotters::prelude::*;
use titanic_analysis::table::{PassengerTable, names};

use super::Chart;
use crate::{
    ChartError,
    error::drawing_error,
    figure::{self, Canvas, Figure, Scale, sizes},
    palette::{GRID, Palettes},
};

/// Mean survival of one passenger class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRate {
    pub class: i64,
    pub survival_rate: f64,
    pub passengers: usize,
}

/// Bar chart of the survival rate per passenger class.
#[derive(Debug, Clone)]
pub struct ClassSurvival {
    /// Ascending by class.
    pub rates: Vec<ClassRate>,
    colors: Vec<RGBColor>,
}

impl Chart for ClassSurvival {
    const PREFIX: &'static str = "class_survival";
    const FIGURE: Figure = Figure::new(10.0, 6.0);

    #[expect(clippy::cast_precision_loss)]
    fn from_table(table: &PassengerTable, palettes: &Palettes) -> Result<Self, ChartError> {
        let classes = table.int_column(names::PASSENGER_CLASS)?;
        let survived = table.numeric_column(names::SURVIVED)?;

        let mut groups = BTreeMap::<i64, (f64, usize)>::new();
        for (class, survived) in classes.iter().zip(&survived) {
            if let (Some(class), Some(survived)) = (class, survived) {
                let (sum, count) = groups.entry(*class).or_default();
                *sum += survived;
                *count += 1;
            }
        }

        let rates = groups
            .into_iter()
            .map(|(class, (sum, count))| ClassRate {
                class,
                survival_rate: sum / count as f64,
                passengers: count,
            })
            .collect::<Vec<_>>();
        let colors = (0..rates.len()).map(|i| palettes.class_color(i)).collect();
        Ok(Self { rates, colors })
    }

    #[expect(clippy::cast_precision_loss)]
    fn draw(&self, canvas: &Canvas<'_>, scale: Scale) -> Result<(), ChartError> {
        let labels = self
            .rates
            .iter()
            .map(|rate| figure::class_label(rate.class))
            .collect::<Vec<_>>();
        let max_rate = self
            .rates
            .iter()
            .map(|rate| rate.survival_rate)
            .fold(0.0, f64::max);
        let n = self.rates.len().max(1) as f64;

        let mut chart = figure::float_chart(
            canvas,
            scale,
            "Survival Rate by Passenger Class",
            -0.5..n - 0.5,
            0.0..figure::headroom(max_rate),
        )?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(GRID)
            .light_line_style(WHITE)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|x| figure::category_tick(&labels, *x))
            .y_label_formatter(&|y| format!("{y:.1}"))
            .x_desc("Passenger Class")
            .y_desc("Survival Rate")
            .label_style(scale.text(sizes::TICK))
            .axis_desc_style(scale.text(sizes::AXIS_LABEL))
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(self.rates.iter().zip(&self.colors).enumerate().map(
                |(i, (rate, color))| {
                    let x = i as f64;
                    Rectangle::new([(x - 0.4, 0.0), (x + 0.4, rate.survival_rate)], color.filled())
                },
            ))
            .map_err(drawing_error)?;
        Ok(())
    }
}
