use plotters::prelude::*;
use titanic_analysis::table::{PassengerTable, names};
use titanic_stats::boxplot::BoxSummary;

use super::{Chart, OUTCOME_LABELS, outcome_index};
use crate::{
    ChartError,
    error::drawing_error,
    figure::{self, Canvas, Figure, Scale, sizes},
    palette::{self, ANNOTATION, GRID, Palettes, REFERENCE_LINE},
};

/// Age separating children from adults on the chart.
pub const ADULT_AGE: f64 = 18.0;

const ANNOTATION_TEXT: &str = "\"Women and Children First\"";
const ANNOTATION_AT: (f64, f64) = (0.5, 16.0);

/// Total width of all boxes sharing one outcome slot.
const GROUP_WIDTH: f64 = 0.8;

/// Box plots of age for each outcome, one box per sex.
#[derive(Debug, Clone)]
pub struct AgeDistribution {
    /// Sexes in order of first appearance.
    pub sexes: Vec<String>,
    /// `boxes[outcome][sex]`, `None` when the group is empty.
    pub boxes: [Vec<Option<BoxSummary>>; 2],
    hue_colors: Vec<RGBColor>,
}

impl Chart for AgeDistribution {
    const PREFIX: &'static str = "age_distribution";
    const FIGURE: Figure = Figure::new(10.0, 6.0);

    fn from_table(table: &PassengerTable, _palettes: &Palettes) -> Result<Self, ChartError> {
        let ages = table.numeric_column(names::AGE)?;
        let sexes = table.text_column(names::SEX)?;
        let survived = table.numeric_column(names::SURVIVED)?;

        let mut levels = Vec::<String>::new();
        let mut groups = [Vec::<Vec<f64>>::new(), Vec::new()];
        for ((age, sex), survived) in ages.iter().zip(sexes).zip(&survived) {
            let (Some(age), Some(sex), Some(outcome)) =
                (age, sex, survived.and_then(outcome_index))
            else {
                continue;
            };
            let level = match levels.iter().position(|l| l == sex) {
                Some(level) => level,
                None => {
                    levels.push(sex.clone());
                    groups.iter_mut().for_each(|g| g.push(Vec::new()));
                    levels.len() - 1
                }
            };
            groups[outcome][level].push(*age);
        }

        let boxes = groups.map(|by_sex| by_sex.iter().map(|ages| BoxSummary::new(ages)).collect());
        let hue_colors = palette::coolwarm_levels(levels.len());
        Ok(Self {
            sexes: levels,
            boxes,
            hue_colors,
        })
    }

    #[expect(clippy::cast_precision_loss)]
    fn draw(&self, canvas: &Canvas<'_>, scale: Scale) -> Result<(), ChartError> {
        let max_age = self
            .boxes
            .iter()
            .flatten()
            .flatten()
            .map(|summary| {
                summary
                    .outliers
                    .last()
                    .copied()
                    .unwrap_or(summary.upper_whisker)
                    .max(summary.upper_whisker)
            })
            .fold(ADULT_AGE, f64::max);

        let mut chart = figure::float_chart(
            canvas,
            scale,
            "Age Distribution by Survival and Gender",
            -0.5..1.5,
            0.0..figure::headroom(max_age),
        )?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(GRID)
            .light_line_style(WHITE)
            .x_labels(2)
            .x_label_formatter(&|x| figure::category_tick(&OUTCOME_LABELS, *x))
            .x_desc("Survival Status")
            .y_desc("Age")
            .label_style(scale.text(sizes::TICK))
            .axis_desc_style(scale.text(sizes::AXIS_LABEL))
            .draw()
            .map_err(drawing_error)?;

        let hues = self.sexes.len().max(1);
        let box_width = GROUP_WIDTH / hues as f64;
        for (outcome, by_sex) in self.boxes.iter().enumerate() {
            for (level, summary) in by_sex.iter().enumerate() {
                let Some(summary) = summary else { continue };
                let center = outcome as f64 - GROUP_WIDTH / 2.0 + box_width * (level as f64 + 0.5);
                draw_box(
                    &mut chart,
                    summary,
                    center,
                    box_width * 0.9,
                    self.hue_colors[level],
                    scale,
                )?;
            }
        }

        let line_style = REFERENCE_LINE.mix(0.5).stroke_width(scale.px_u32(1.2).max(1));
        chart
            .draw_series(
                figure::dashed_hline(ADULT_AGE, -0.5, 1.5, 40)
                    .into_iter()
                    .map(|segment| PathElement::new(segment, line_style)),
            )
            .map_err(drawing_error)?;
        chart
            .draw_series(std::iter::once(Text::new(
                ANNOTATION_TEXT.to_owned(),
                ANNOTATION_AT,
                scale.centered_text(sizes::ANNOTATION).color(&ANNOTATION),
            )))
            .map_err(drawing_error)?;

        let entries = self
            .sexes
            .iter()
            .zip(&self.hue_colors)
            .map(|(sex, color)| (sex.as_str(), *color))
            .collect::<Vec<_>>();
        figure::draw_legend(
            canvas,
            scale,
            figure::legend_anchor(&chart, scale, 6.0),
            Some("Sex"),
            &entries,
        )
    }
}

fn draw_box(
    chart: &mut figure::FloatChart<'_, '_>,
    summary: &BoxSummary,
    center: f64,
    width: f64,
    color: RGBColor,
    scale: Scale,
) -> Result<(), ChartError> {
    let edge = RGBColor(0x3f, 0x3f, 0x3f).stroke_width(scale.px_u32(1.0).max(1));
    let left = center - width / 2.0;
    let right = center + width / 2.0;
    let cap = width / 4.0;

    chart
        .draw_series([
            Rectangle::new([(left, summary.q1), (right, summary.q3)], color.filled()),
            Rectangle::new([(left, summary.q1), (right, summary.q3)], edge),
        ])
        .map_err(drawing_error)?;
    chart
        .draw_series([
            PathElement::new(vec![(left, summary.median), (right, summary.median)], edge),
            PathElement::new(
                vec![(center, summary.q3), (center, summary.upper_whisker)],
                edge,
            ),
            PathElement::new(
                vec![(center, summary.q1), (center, summary.lower_whisker)],
                edge,
            ),
            PathElement::new(
                vec![
                    (center - cap, summary.upper_whisker),
                    (center + cap, summary.upper_whisker),
                ],
                edge,
            ),
            PathElement::new(
                vec![
                    (center - cap, summary.lower_whisker),
                    (center + cap, summary.lower_whisker),
                ],
                edge,
            ),
        ])
        .map_err(drawing_error)?;

    let marker = scale.px_u32(2.5).max(1);
    chart
        .draw_series(
            summary
                .outliers
                .iter()
                .map(|&age| Circle::new((center, age), marker, edge)),
        )
        .map_err(drawing_error)?;
    Ok(())
}
