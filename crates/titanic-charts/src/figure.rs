//! Canvas geometry and shared drawing helpers.
//!
//! Figures are sized in inches and fonts in points, so layouts stay the same
//! shape at any output resolution.

use plotters::{
    coord::{Shift, types::RangedCoordf64},
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::{ChartError, error::drawing_error};

/// Output resolution used when none is configured.
pub const DEFAULT_DPI: u32 = 300;

/// The bitmap drawing area every chart renders onto.
pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// A chart context with continuous axes on both dimensions.
pub type FloatChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
}

impl Figure {
    #[must_use]
    pub const fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Pixel dimensions of the figure at `dpi`.
    ///
    /// ```
    /// use titanic_charts::figure::Figure;
    ///
    /// assert_eq!(Figure::new(10.0, 6.0).pixel_size(300), (3000, 1800));
    /// ```
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn pixel_size(self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }
}

/// Converts typographic sizes to pixels for one output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    dpi: u32,
}

impl Scale {
    #[must_use]
    pub const fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    /// Pixels spanned by `points` (1pt = 1/72in).
    #[must_use]
    pub fn px(self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn px_i32(self, points: f64) -> i32 {
        self.px(points).round() as i32
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn px_u32(self, points: f64) -> u32 {
        self.px(points).round().max(0.0) as u32
    }

    #[must_use]
    pub fn font(self, points: f64) -> FontDesc<'static> {
        (FontFamily::SansSerif, self.px(points)).into_font()
    }

    /// Black text of the given point size.
    #[must_use]
    pub fn text(self, points: f64) -> TextStyle<'static> {
        TextStyle::from(self.font(points)).color(&BLACK)
    }

    /// Text centered on its anchor point.
    #[must_use]
    pub fn centered_text(self, points: f64) -> TextStyle<'static> {
        self.text(points).pos(Pos::new(HPos::Center, VPos::Center))
    }
}

/// Font sizes shared by the charts, in points.
pub mod sizes {
    pub const TITLE: f64 = 16.0;
    pub const SUBTITLE: f64 = 13.0;
    pub const AXIS_LABEL: f64 = 12.0;
    pub const TICK: f64 = 10.0;
    pub const ANNOTATION: f64 = 10.0;
    pub const LEGEND: f64 = 10.0;
}

/// Builds a two-axis chart with the standard caption, margins and label areas.
pub fn float_chart<'a, 'b>(
    area: &'a Canvas<'b>,
    scale: Scale,
    caption: &str,
    x_range: std::ops::Range<f64>,
    y_range: std::ops::Range<f64>,
) -> Result<FloatChart<'a, 'b>, ChartError> {
    ChartBuilder::on(area)
        .caption(caption, scale.font(sizes::TITLE))
        .margin(scale.px_u32(12.0))
        .x_label_area_size(scale.px_u32(36.0))
        .y_label_area_size(scale.px_u32(48.0))
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing_error)
}

/// Axis range covering `0..max` with headroom above the tallest value.
#[must_use]
pub fn headroom(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Label for a category axis tick at `x`.
///
/// Only positions within rounding distance of an integer index get a label;
/// every other tick is left blank.
#[must_use]
pub fn category_tick<S>(labels: &[S], x: f64) -> String
where
    S: AsRef<str>,
{
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = index as usize;
    labels
        .get(index)
        .map(|label| label.as_ref().to_owned())
        .unwrap_or_default()
}

/// Tick label for a passenger class number.
#[must_use]
pub fn class_label(class: i64) -> String {
    match class {
        1 => "1st Class".to_owned(),
        2 => "2nd Class".to_owned(),
        3 => "3rd Class".to_owned(),
        other => format!("Class {other}"),
    }
}

/// Segments of a dashed horizontal line at `y` from `x_start` to `x_end`.
///
/// Produces `dashes` evenly spaced dashes, each filling half of its period.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn dashed_hline(y: f64, x_start: f64, x_end: f64, dashes: usize) -> Vec<[(f64, f64); 2]> {
    if dashes == 0 || x_end <= x_start {
        return vec![];
    }
    let period = (x_end - x_start) / dashes as f64;
    (0..dashes)
        .map(|i| {
            let start = x_start + period * i as f64;
            [(start, y), (start + period / 2.0, y)]
        })
        .collect()
}

/// Draws a legend box whose upper-right corner sits at `anchor`
/// (backend pixel coordinates).
pub fn draw_legend(
    canvas: &Canvas<'_>,
    scale: Scale,
    anchor: (i32, i32),
    title: Option<&str>,
    entries: &[(&str, RGBColor)],
) -> Result<(), ChartError> {
    let (base_x, base_y) = canvas.get_base_pixel();
    let style = scale.text(sizes::LEGEND);
    let pad = scale.px_i32(4.0);
    let swatch = scale.px_i32(8.0);
    let line = scale.px_i32(sizes::LEGEND * 1.5);

    let mut text_width = 0;
    for label in title.into_iter().chain(entries.iter().map(|(label, _)| *label)) {
        let (width, _) = canvas.estimate_text_size(label, &style).map_err(drawing_error)?;
        text_width = text_width.max(i32::try_from(width).unwrap_or(i32::MAX));
    }
    let rows = i32::try_from(entries.len() + usize::from(title.is_some())).unwrap_or(i32::MAX);
    let width = pad * 3 + swatch + text_width;
    let height = pad * 2 + line * rows;

    let right = anchor.0 - base_x;
    let top = anchor.1 - base_y;
    let left = right - width;
    canvas
        .draw(&Rectangle::new(
            [(left, top), (right, top + height)],
            WHITE.mix(0.85).filled(),
        ))
        .map_err(drawing_error)?;
    canvas
        .draw(&Rectangle::new(
            [(left, top), (right, top + height)],
            BLACK.mix(0.3).stroke_width(1),
        ))
        .map_err(drawing_error)?;

    let mut y = top + pad;
    if let Some(title) = title {
        let style = style.pos(Pos::new(HPos::Center, VPos::Top));
        canvas
            .draw(&Text::new(title.to_owned(), (left + width / 2, y), style))
            .map_err(drawing_error)?;
        y += line;
    }
    for (label, color) in entries {
        let center = y + line / 2;
        canvas
            .draw(&Rectangle::new(
                [
                    (left + pad, center - swatch / 2),
                    (left + pad + swatch, center + swatch / 2),
                ],
                color.filled(),
            ))
            .map_err(drawing_error)?;
        let style = style.pos(Pos::new(HPos::Left, VPos::Center));
        canvas
            .draw(&Text::new(
                (*label).to_owned(),
                (left + pad * 2 + swatch, center),
                style,
            ))
            .map_err(drawing_error)?;
        y += line;
    }
    Ok(())
}

/// Upper-right corner of a chart's plotting area, inset by `inset_pt`.
#[must_use]
pub fn legend_anchor(chart: &FloatChart<'_, '_>, scale: Scale, inset_pt: f64) -> (i32, i32) {
    let (x_range, y_range) = chart.plotting_area().get_pixel_range();
    let inset = scale.px_i32(inset_pt);
    (x_range.end - inset, y_range.start + inset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_scales_with_dpi() {
        let figure = Figure::new(12.0, 6.0);
        assert_eq!(figure.pixel_size(300), (3600, 1800));
        assert_eq!(figure.pixel_size(100), (1200, 600));
    }

    #[test]
    fn test_points_to_pixels() {
        let scale = Scale::new(144);
        assert!((scale.px(72.0) - 144.0).abs() < f64::EPSILON);
        assert_eq!(scale.px_u32(10.0), 20);
        assert_eq!(scale.px_i32(1.0), 2);
    }

    #[test]
    fn test_category_tick() {
        let labels = ["Perished", "Survived"];
        assert_eq!(category_tick(&labels, 0.0), "Perished");
        assert_eq!(category_tick(&labels, 1.000_000_1), "Survived");
        assert_eq!(category_tick(&labels, 0.5), "");
        assert_eq!(category_tick(&labels, -1.0), "");
        assert_eq!(category_tick(&labels, 2.0), "");
    }

    #[test]
    fn test_class_label() {
        assert_eq!(class_label(1), "1st Class");
        assert_eq!(class_label(3), "3rd Class");
        assert_eq!(class_label(4), "Class 4");
    }

    #[test]
    fn test_dashed_hline() {
        let dashes = dashed_hline(18.0, 0.0, 4.0, 4);
        assert_eq!(dashes.len(), 4);
        assert_eq!(dashes[0], [(0.0, 18.0), (0.5, 18.0)]);
        assert_eq!(dashes[3], [(3.0, 18.0), (3.5, 18.0)]);
        assert!(dashed_hline(0.0, 1.0, 1.0, 4).is_empty());
    }

    #[test]
    fn test_headroom() {
        assert!((headroom(1.0) - 1.1).abs() < 1e-12);
        assert!((headroom(0.0) - 1.0).abs() < f64::EPSILON);
    }
}
