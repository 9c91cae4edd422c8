//! Fixed-position legend: one swatch and label per series, stacked downwards.

use super::scene::{Anchor, Layer, Primitive, Rgb, Scene, label};
use crate::config::ChartConfig;
use crate::models::Series;

const SWATCH: f64 = 19.0;
const ROW_PITCH: f64 = 20.0;
const LABEL_GAP: f64 = 24.0;
const FONT: f64 = 12.0;

/// Draw the legend with its top-left corner `inset` pixels left of the plot's
/// right edge, aligned with the plot's top.
pub fn draw_legend(scene: &mut Scene, config: &ChartConfig, inset: f64, items: &[(Series, Rgb)]) {
    let x0 = config.margin.left + config.plot_width() - inset;
    let y0 = config.margin.top;
    for (i, (series, color)) in items.iter().enumerate() {
        let y = y0 + i as f64 * ROW_PITCH;
        scene.push(
            Layer::Decoration,
            Primitive::Rect {
                x: x0,
                y,
                w: SWATCH,
                h: SWATCH,
                fill: *color,
                stroke: None,
                opacity: 1.0,
            },
        );
        scene.push(
            Layer::Decoration,
            label(x0 + LABEL_GAP, y + SWATCH / 2.0, series.label(), FONT, Anchor::Start),
        );
    }
}
