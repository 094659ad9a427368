use std::collections::BTreeMap;

use plotters::prelude::*;
use titanic_analysis::table::{PassengerTable, names};
use titanic_stats::{boxplot::BoxSummary, kde::GaussianKde};

use super::{Chart, outcome_index};
use crate::{
    ChartError,
    error::drawing_error,
    figure::{self, Canvas, Figure, Scale, sizes},
    palette::{GRID, Palettes},
};

/// Points at which each density curve is evaluated.
pub const KDE_GRID_SIZE: usize = 100;
/// Bandwidths the curve extends past the extreme observations.
pub const KDE_CUT: f64 = 2.0;

/// Maximum half-width of a violin, in category units.
const HALF_WIDTH: f64 = 0.4;

/// Estimated shape of one side of a violin.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolinShape {
    /// `(fare, density)` pairs in ascending fare.
    Density(Vec<(f64, f64)>),
    /// All observations share one value, so no density can be estimated.
    Constant(f64),
}

/// One side of a split violin.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolinHalf {
    pub shape: ViolinShape,
    pub summary: BoxSummary,
}

impl ViolinHalf {
    /// Estimates the distribution of `fares`. Returns `None` when empty.
    #[must_use]
    pub fn new(fares: &[f64]) -> Option<Self> {
        let summary = BoxSummary::new(fares)?;
        let shape = match GaussianKde::new(fares) {
            Some(kde) => ViolinShape::Density(kde.evaluate_grid(KDE_GRID_SIZE, KDE_CUT)),
            None => ViolinShape::Constant(summary.median),
        };
        Some(Self { shape, summary })
    }

    fn peak_density(&self) -> f64 {
        match &self.shape {
            ViolinShape::Density(curve) => curve.iter().map(|(_, d)| *d).fold(0.0, f64::max),
            ViolinShape::Constant(_) => 0.0,
        }
    }

    fn fare_range(&self) -> (f64, f64) {
        match &self.shape {
            ViolinShape::Density(curve) => (
                curve.first().map_or(self.summary.q1, |(x, _)| *x),
                curve.last().map_or(self.summary.q3, |(x, _)| *x),
            ),
            ViolinShape::Constant(value) => (*value, *value),
        }
    }
}

/// Fare violins for one passenger class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassViolin {
    pub class: i64,
    /// `[perished, survived]`
    pub halves: [Option<ViolinHalf>; 2],
}

/// Split violins of fare per class, perished on the left and survived on the
/// right.
#[derive(Debug, Clone)]
pub struct FareDistribution {
    /// Ascending by class.
    pub classes: Vec<ClassViolin>,
    colors: [RGBColor; 2],
}

impl Chart for FareDistribution {
    const PREFIX: &'static str = "fare_distribution";
    const FIGURE: Figure = Figure::new(10.0, 6.0);

    fn from_table(table: &PassengerTable, palettes: &Palettes) -> Result<Self, ChartError> {
        let classes = table.int_column(names::PASSENGER_CLASS)?;
        let fares = table.numeric_column(names::FARE)?;
        let survived = table.numeric_column(names::SURVIVED)?;

        let mut groups = BTreeMap::<i64, [Vec<f64>; 2]>::new();
        for ((class, fare), survived) in classes.iter().zip(&fares).zip(&survived) {
            if let (Some(class), Some(fare), Some(outcome)) =
                (class, fare, survived.and_then(outcome_index))
            {
                groups.entry(*class).or_default()[outcome].push(*fare);
            }
        }

        let classes = groups
            .into_iter()
            .map(|(class, by_outcome)| ClassViolin {
                class,
                halves: by_outcome.map(|fares| ViolinHalf::new(&fares)),
            })
            .collect();
        Ok(Self {
            classes,
            colors: palettes.survival,
        })
    }

    #[expect(clippy::cast_precision_loss)]
    fn draw(&self, canvas: &Canvas<'_>, scale: Scale) -> Result<(), ChartError> {
        let halves = || self.classes.iter().flat_map(|c| c.halves.iter().flatten());
        let peak = halves().map(ViolinHalf::peak_density).fold(0.0, f64::max);
        let (low, high) = halves()
            .map(ViolinHalf::fare_range)
            .fold((0.0_f64, 1.0_f64), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
        let pad = (high - low) * 0.05;

        let labels = self
            .classes
            .iter()
            .map(|c| figure::class_label(c.class))
            .collect::<Vec<_>>();
        let n = self.classes.len().max(1) as f64;

        let mut chart = figure::float_chart(
            canvas,
            scale,
            "Fare Distribution by Class and Survival",
            -0.5..n - 0.5,
            (low - pad)..(high + pad),
        )?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(GRID)
            .light_line_style(WHITE)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|x| figure::category_tick(&labels, *x))
            .x_desc("Passenger Class")
            .y_desc("Fare")
            .label_style(scale.text(sizes::TICK))
            .axis_desc_style(scale.text(sizes::AXIS_LABEL))
            .draw()
            .map_err(drawing_error)?;

        let edge = RGBColor(0x3f, 0x3f, 0x3f).stroke_width(scale.px_u32(0.8).max(1));
        let inner = RGBColor(0x3f, 0x3f, 0x3f).stroke_width(scale.px_u32(2.0).max(1));
        for (i, violin) in self.classes.iter().enumerate() {
            let center = i as f64;
            for (outcome, half) in violin.halves.iter().enumerate() {
                let Some(half) = half else { continue };
                // Perished extends to the left of the class center.
                let side = if outcome == 0 { -1.0 } else { 1.0 };
                let color = self.colors[outcome];

                match &half.shape {
                    ViolinShape::Density(curve) => {
                        let outline = curve
                            .iter()
                            .map(|&(fare, density)| {
                                (center + side * HALF_WIDTH * density / peak, fare)
                            })
                            .collect::<Vec<_>>();
                        let mut polygon = outline.clone();
                        if let (Some(&(_, first)), Some(&(_, last))) = (curve.first(), curve.last())
                        {
                            polygon.push((center, last));
                            polygon.push((center, first));
                        }
                        chart
                            .draw_series([Polygon::new(polygon, color.filled())])
                            .map_err(drawing_error)?;
                        chart
                            .draw_series([PathElement::new(outline, edge)])
                            .map_err(drawing_error)?;
                    }
                    ViolinShape::Constant(fare) => {
                        chart
                            .draw_series([PathElement::new(
                                vec![(center, *fare), (center + side * HALF_WIDTH, *fare)],
                                color.stroke_width(scale.px_u32(1.5).max(1)),
                            )])
                            .map_err(drawing_error)?;
                    }
                }

                let tick = side * HALF_WIDTH * 0.15;
                let summary = &half.summary;
                chart
                    .draw_series([
                        PathElement::new(
                            vec![(center + tick / 2.0, summary.q1), (center + tick / 2.0, summary.q3)],
                            inner,
                        ),
                        PathElement::new(
                            vec![(center, summary.median), (center + tick, summary.median)],
                            edge,
                        ),
                    ])
                    .map_err(drawing_error)?;
            }
        }

        let entries = [("0", self.colors[0]), ("1", self.colors[1])];
        figure::draw_legend(
            canvas,
            scale,
            figure::legend_anchor(&chart, scale, 6.0),
            Some("Survived"),
            &entries,
        )
    }
}

#[cfg(test)]
mod tests {
    use titanic_analysis::column::Column;

    use super::*;
    use crate::chart::tests::{prepared_table, without_column};

    #[test]
    fn test_groups_by_class_and_outcome() {
        let chart = FareDistribution::from_table(&prepared_table(), &Palettes::default()).unwrap();
        let classes = chart.classes.iter().map(|c| c.class).collect::<Vec<_>>();
        assert_eq!(classes, [1, 2, 3]);
        let first = &chart.classes[0];
        assert!(first.halves.iter().all(Option::is_some));
    }

    #[test]
    fn test_density_curve_extends_past_data() {
        let half = ViolinHalf::new(&[10.0, 12.0, 15.0, 30.0]).unwrap();
        let ViolinShape::Density(curve) = &half.shape else {
            panic!("expected a density curve");
        };
        assert_eq!(curve.len(), KDE_GRID_SIZE);
        assert!(curve[0].0 < 10.0);
        assert!(curve[KDE_GRID_SIZE - 1].0 > 30.0);
        assert!(curve.iter().all(|(_, d)| *d >= 0.0));
    }

    #[test]
    fn test_single_fare_is_constant() {
        let half = ViolinHalf::new(&[26.0]).unwrap();
        assert_eq!(half.shape, ViolinShape::Constant(26.0));
        assert!(ViolinHalf::new(&[]).is_none());
    }

    #[test]
    fn test_empty_side_is_none() {
        let table = PassengerTable::from_columns([
            ("Pclass", Column::Int(vec![Some(2), Some(2)])),
            ("Fare", Column::Float(vec![Some(13.0), Some(26.0)])),
            ("Survived", Column::Int(vec![Some(1), Some(1)])),
        ])
        .unwrap();
        let chart = FareDistribution::from_table(&table, &Palettes::default()).unwrap();
        assert_eq!(chart.classes.len(), 1);
        assert!(chart.classes[0].halves[0].is_none());
        assert!(chart.classes[0].halves[1].is_some());
    }

    #[test]
    fn test_requires_fare_column() {
        let table = without_column(&prepared_table(), "Fare");
        assert!(FareDistribution::from_table(&table, &Palettes::default()).is_err());
    }
}
