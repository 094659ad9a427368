//! Fixed chart colors.

use plotters::style::RGBColor;

/// The two palettes every chart draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palettes {
    /// `[perished, survived]`
    pub survival: [RGBColor; 2],
    /// One color per passenger class, in class order.
    pub class: [RGBColor; 3],
}

impl Default for Palettes {
    fn default() -> Self {
        Self {
            survival: [RGBColor(0xe7, 0x4c, 0x3c), RGBColor(0x2e, 0xcc, 0x71)],
            class: [
                RGBColor(0x1a, 0xbc, 0x9c),
                RGBColor(0x34, 0x98, 0xdb),
                RGBColor(0x9b, 0x59, 0xb6),
            ],
        }
    }
}

impl Palettes {
    /// Color for the `index`-th class, cycling when there are more classes
    /// than colors.
    #[must_use]
    pub fn class_color(&self, index: usize) -> RGBColor {
        self.class[index % self.class.len()]
    }
}

/// Annotation text color.
pub const ANNOTATION: RGBColor = RGBColor(0x2c, 0x3e, 0x50);

/// Reference-line gray.
pub const REFERENCE_LINE: RGBColor = RGBColor(0x80, 0x80, 0x80);

/// Grid line color.
pub const GRID: RGBColor = RGBColor(0xe5, 0xe5, 0xe5);

const COOLWARM_ANCHORS: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (59, 76, 192)),
    (0.25, (130, 165, 251)),
    (0.5, (221, 221, 221)),
    (0.75, (244, 152, 122)),
    (1.0, (180, 4, 38)),
];

/// Diverging blue-to-red colormap; `t` is clamped to `[0, 1]` and `0.5` is
/// the neutral midpoint.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let upper = COOLWARM_ANCHORS
        .iter()
        .position(|(at, _)| t <= *at)
        .unwrap_or(COOLWARM_ANCHORS.len() - 1)
        .max(1);
    let (t0, (r0, g0, b0)) = COOLWARM_ANCHORS[upper - 1];
    let (t1, (r1, g1, b1)) = COOLWARM_ANCHORS[upper];
    let f = (t - t0) / (t1 - t0);
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8;
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Colors for `n` hue levels sampled evenly from the interior of [`coolwarm`].
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn coolwarm_levels(n: usize) -> Vec<RGBColor> {
    (1..=n)
        .map(|i| coolwarm(i as f64 / (n + 1) as f64))
        .collect()
}

/// Black or white, whichever reads better on `background`.
#[must_use]
pub fn contrasting_text(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luminance = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b);
    if luminance > 104.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolwarm_endpoints_and_midpoint() {
        assert_eq!(coolwarm(0.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.5), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
        assert_eq!(coolwarm(-3.0), coolwarm(0.0));
        assert_eq!(coolwarm(7.0), coolwarm(1.0));
    }

    #[test]
    fn test_coolwarm_levels_avoid_extremes() {
        let levels = coolwarm_levels(2);
        assert_eq!(levels.len(), 2);
        assert_ne!(levels[0], coolwarm(0.0));
        assert_ne!(levels[1], coolwarm(1.0));
    }

    #[test]
    fn test_contrasting_text() {
        assert_eq!(contrasting_text(RGBColor(255, 255, 255)), RGBColor(0, 0, 0));
        assert_eq!(contrasting_text(RGBColor(59, 76, 192)), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_class_color_cycles() {
        let palettes = Palettes::default();
        assert_eq!(palettes.class_color(3), palettes.class[0]);
    }
}
