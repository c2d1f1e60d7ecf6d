//! Named colours shared by the chart tools.

pub use plotters::style::RGBColor;

pub const LIGHT_GRAY: RGBColor = RGBColor(211, 211, 211);
pub const DARK_GRAY: RGBColor = RGBColor(105, 105, 105);
pub const ORANGE_RED: RGBColor = RGBColor(255, 69, 0);
pub const DODGER_BLUE: RGBColor = RGBColor(30, 144, 255);
pub const LIME_GREEN: RGBColor = RGBColor(50, 205, 50);
pub const FOREST_GREEN: RGBColor = RGBColor(34, 139, 34);
pub const CRIMSON: RGBColor = RGBColor(220, 20, 60);
pub const GOLDENROD: RGBColor = RGBColor(218, 165, 32);
pub const MEDIUM_PURPLE: RGBColor = RGBColor(147, 112, 219);

// Washed out candle colours so overlays stay readable.
pub const PALE_GREEN: RGBColor = RGBColor(152, 251, 152);
pub const PALE_RED: RGBColor = RGBColor(255, 160, 160);

/// Colours cycled through when a tool draws a variable number of lines.
pub const SERIES_CYCLE: [RGBColor; 5] = [DODGER_BLUE, ORANGE_RED, LIME_GREEN, GOLDENROD, MEDIUM_PURPLE];

/// Colour for the `i`-th of a variable number of series.
pub fn cycle_color(i: usize) -> RGBColor {
    SERIES_CYCLE[i % SERIES_CYCLE.len()]
}
