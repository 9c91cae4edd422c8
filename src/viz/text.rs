//! Text measurement heuristics.

/// Estimate the pixel width of `text` (no backend exposes font metrics to the
/// scene builder).
pub fn estimate_text_width_px(text: &str, font_px: f64) -> f64 {
    (text.chars().count() as f64 * font_px * 0.60).ceil()
}

/// Width of the widest of several lines.
pub fn widest_line_px<'a>(lines: impl IntoIterator<Item = &'a str>, font_px: f64) -> f64 {
    lines
        .into_iter()
        .map(|l| estimate_text_width_px(l, font_px))
        .fold(0.0, f64::max)
}
