//! Axis, title and axis-label elements shared by both charts.

use super::scale::{LinearScale, TimeScale, format_month};
use super::scene::{Anchor, BLACK, Layer, Primitive, Scene, label};
use crate::config::ChartConfig;

const TICK_SIZE: f64 = 6.0;
const TICK_FONT: f64 = 10.0;
const Y_TICK_COUNT: usize = 10;
/// Time axis shows every second month.
const MONTH_TICK_STEP: u32 = 2;

/// Top-left corner of the plotting area on the canvas.
pub fn plot_origin(config: &ChartConfig) -> (f64, f64) {
    (config.margin.left, config.margin.top)
}

fn line(points: Vec<(f64, f64)>) -> Primitive {
    Primitive::Path {
        points,
        color: BLACK,
        width: 1.0,
    }
}

/// Time axis along the bottom edge; labels rotated 45° counter-clockwise and
/// anchored at their end so they hang below their tick.
pub fn bottom_time_axis(scene: &mut Scene, config: &ChartConfig, x: &TimeScale) {
    let (ox, oy) = plot_origin(config);
    let base = oy + config.plot_height();
    let (r0, r1) = x.range();
    scene.push(
        Layer::Axis,
        line(vec![
            (ox + r0, base + TICK_SIZE),
            (ox + r0, base),
            (ox + r1, base),
            (ox + r1, base + TICK_SIZE),
        ]),
    );
    for tick in x.month_ticks(MONTH_TICK_STEP) {
        let tx = ox + x.map_date(tick);
        scene.push(Layer::Axis, line(vec![(tx, base), (tx, base + TICK_SIZE)]));
        scene.push(
            Layer::Axis,
            Primitive::Text {
                x: tx - 0.8 * TICK_FONT,
                y: base + TICK_SIZE + 3.0 + 0.15 * TICK_FONT,
                text: format_month(tick),
                size: TICK_FONT,
                anchor: Anchor::End,
                rotation: -45.0,
                bold: false,
                color: BLACK,
            },
        );
    }
}

/// Value axis along the left edge.
pub fn left_value_axis(scene: &mut Scene, config: &ChartConfig, y: &LinearScale) {
    let (ox, oy) = plot_origin(config);
    let (r0, r1) = y.range;
    scene.push(
        Layer::Axis,
        line(vec![
            (ox - TICK_SIZE, oy + r0),
            (ox, oy + r0),
            (ox, oy + r1),
            (ox - TICK_SIZE, oy + r1),
        ]),
    );
    for (value, text) in y.tick_labels(Y_TICK_COUNT) {
        let ty = oy + y.map(value);
        scene.push(Layer::Axis, line(vec![(ox - TICK_SIZE, ty), (ox, ty)]));
        scene.push(
            Layer::Axis,
            label(ox - TICK_SIZE - 3.0, ty, text, TICK_FONT, Anchor::End),
        );
    }
}

/// Bold title centred above the plot and a rotated label left of the value axis.
pub fn titles(scene: &mut Scene, config: &ChartConfig, title: &str, y_label: &str) {
    let (ox, oy) = plot_origin(config);
    scene.push(
        Layer::Decoration,
        Primitive::Text {
            x: ox + config.plot_width() / 2.0,
            y: oy - config.margin.top / 2.0,
            text: title.to_string(),
            size: 16.0,
            anchor: Anchor::Middle,
            rotation: 0.0,
            bold: true,
            color: BLACK,
        },
    );
    let size = 12.0;
    scene.push(
        Layer::Decoration,
        Primitive::Text {
            x: ox - config.margin.left + 15.0 + size / 2.0,
            y: oy + config.plot_height() / 2.0,
            text: y_label.to_string(),
            size,
            anchor: Anchor::Middle,
            rotation: -90.0,
            bold: false,
            color: BLACK,
        },
    );
}
