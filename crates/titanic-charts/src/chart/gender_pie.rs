use plotters::{
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use titanic_analysis::table::{PassengerTable, names};

use super::{Chart, OUTCOME_LABELS, OutcomeCounts, outcome_index};
use crate::{
    ChartError,
    error::drawing_error,
    figure::{Canvas, Figure, Scale, sizes},
    palette::Palettes,
};

/// First wedge starts at twelve o'clock; wedges advance counter-clockwise.
const START_ANGLE_DEG: f64 = 90.0;

/// Pair of pie charts comparing outcomes for male and female passengers.
#[derive(Debug, Clone)]
pub struct GenderSurvival {
    pub male: OutcomeCounts,
    pub female: OutcomeCounts,
    colors: [RGBColor; 2],
}

impl Chart for GenderSurvival {
    const PREFIX: &'static str = "gender_survival_pie";
    const FIGURE: Figure = Figure::new(12.0, 6.0);

    fn from_table(table: &PassengerTable, palettes: &Palettes) -> Result<Self, ChartError> {
        let sexes = table.text_column(names::SEX)?;
        let survived = table.numeric_column(names::SURVIVED)?;

        let mut male = OutcomeCounts::default();
        let mut female = OutcomeCounts::default();
        for (sex, survived) in sexes.iter().zip(&survived) {
            let Some(outcome) = survived.and_then(outcome_index) else {
                continue;
            };
            match sex.as_deref() {
                Some("male") => male.record(outcome),
                Some("female") => female.record(outcome),
                _ => {}
            }
        }
        Ok(Self {
            male,
            female,
            colors: palettes.survival,
        })
    }

    fn draw(&self, canvas: &Canvas<'_>, scale: Scale) -> Result<(), ChartError> {
        let body = canvas
            .titled("Survival Distribution by Gender", scale.font(sizes::TITLE))
            .map_err(drawing_error)?;
        let panels = body.split_evenly((1, 2));
        let pies = [
            ("Male Survival Distribution", &self.male),
            ("Female Survival Distribution", &self.female),
        ];
        for (panel, (title, counts)) in panels.iter().zip(pies) {
            let area = panel
                .titled(title, scale.font(sizes::SUBTITLE))
                .map_err(drawing_error)?;
            self.draw_pie(&area, counts, scale)?;
        }
        Ok(())
    }
}

impl GenderSurvival {
    #[expect(clippy::cast_precision_loss)]
    fn draw_pie(
        &self,
        area: &Canvas<'_>,
        counts: &OutcomeCounts,
        scale: Scale,
    ) -> Result<(), ChartError> {
        let (width, height) = area.dim_in_pixel();
        let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let radius = 0.38 * f64::from(width.min(height));

        let total = counts.total();
        if total == 0 {
            return area
                .draw(&Text::new(
                    "No passengers".to_owned(),
                    pixel(center, 0.0, 0.0),
                    scale.centered_text(sizes::ANNOTATION),
                ))
                .map_err(drawing_error);
        }

        let mut start = START_ANGLE_DEG;
        for (outcome, count) in counts.as_array().into_iter().enumerate() {
            if count == 0 {
                continue;
            }
            let fraction = count as f64 / total as f64;
            let sweep = 360.0 * fraction;
            let end = start + sweep;

            area.draw(&Polygon::new(
                wedge(center, radius, start, end),
                self.colors[outcome].filled(),
            ))
            .map_err(drawing_error)?;

            let middle = (start + end) / 2.0;
            let align = if middle.to_radians().cos() >= 0.0 {
                HPos::Left
            } else {
                HPos::Right
            };
            area.draw(&Text::new(
                OUTCOME_LABELS[outcome].to_owned(),
                pixel(center, radius * 1.1, middle),
                scale
                    .text(sizes::AXIS_LABEL)
                    .pos(Pos::new(align, VPos::Center)),
            ))
            .map_err(drawing_error)?;
            area.draw(&Text::new(
                format!("{:.1}%", fraction * 100.0),
                pixel(center, radius * 0.6, middle),
                scale.centered_text(sizes::AXIS_LABEL),
            ))
            .map_err(drawing_error)?;

            start = end;
        }
        Ok(())
    }
}

/// Outline of a wedge from `start_deg` to `end_deg`, counter-clockwise.
fn wedge(center: (f64, f64), radius: f64, start_deg: f64, end_deg: f64) -> Vec<(i32, i32)> {
    let steps = (end_deg - start_deg).abs().ceil().max(2.0);
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(pixel(center, 0.0, start_deg));
    #[expect(clippy::cast_precision_loss)]
    points.extend((0..=steps).map(|i| {
        let angle = start_deg + (end_deg - start_deg) * i as f64 / steps as f64;
        pixel(center, radius, angle)
    }));
    points
}

/// Pixel at polar offset (`radius`, `angle_deg`) from `center`; pixel rows
/// grow downwards, so positive angles go up.
#[expect(clippy::cast_possible_truncation)]
fn pixel(center: (f64, f64), radius: f64, angle_deg: f64) -> (i32, i32) {
    let angle = angle_deg.to_radians();
    (
        (center.0 + radius * angle.cos()).round() as i32,
        (center.1 - radius * angle.sin()).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use titanic_analysis::column::Column;

    use super::*;
    use crate::chart::tests::{prepared_table, without_column};

    #[test]
    fn test_counts_by_sex() {
        let chart = GenderSurvival::from_table(&prepared_table(), &Palettes::default()).unwrap();
        assert_eq!(
            chart.male,
            OutcomeCounts {
                perished: 6,
                survived: 0
            }
        );
        assert_eq!(
            chart.female,
            OutcomeCounts {
                perished: 0,
                survived: 6
            }
        );
    }

    #[test]
    fn test_unknown_sex_and_missing_outcome_are_skipped() {
        let table = PassengerTable::from_columns([
            (
                "Sex",
                Column::Text(vec![
                    Some("male".into()),
                    Some("unknown".into()),
                    None,
                    Some("female".into()),
                ]),
            ),
            ("Survived", Column::Int(vec![Some(1), Some(1), Some(0), None])),
        ])
        .unwrap();
        let chart = GenderSurvival::from_table(&table, &Palettes::default()).unwrap();
        assert_eq!(chart.male.as_array(), [0, 1]);
        assert_eq!(chart.female.total(), 0);
    }

    #[test]
    fn test_requires_sex_column() {
        let table = without_column(&prepared_table(), "Sex");
        assert!(GenderSurvival::from_table(&table, &Palettes::default()).is_err());
    }

    #[test]
    fn test_wedge_starts_at_top() {
        let points = wedge((100.0, 100.0), 50.0, 90.0, 180.0);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (100, 50));
        assert_eq!(*points.last().unwrap(), (50, 100));
    }
}
