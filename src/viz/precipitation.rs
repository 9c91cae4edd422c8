//! Chart 2: paired monthly precipitation bars with per-bar tooltips.

use super::axis::{bottom_time_axis, left_value_axis, plot_origin, titles};
use super::interaction::{BarRef, BarTooltip};
use super::legend::draw_legend;
use super::scale::{LinearScale, TimeScale, format_month, paired_extent, shift_months};
use super::scene::{Anchor, Layer, Primitive, RED, Rgb, STEELBLUE, Scene, WHITE, label};
use super::text::widest_line_px;
use crate::config::ChartConfig;
use crate::models::{MonthlyAggregate, Series, Visibility};

pub const TITLE: &str = "Precipitation Trends (Monthly Averages)";
pub const Y_LABEL: &str = "Precipitation (inches)";
/// Headroom above the tallest bar.
const Y_HEADROOM: f64 = 1.1;
/// Share of a month's slot taken by one bar.
const BAR_FRACTION: f64 = 0.4;
/// Gap between a bar and its month tick.
const BAR_GAP: f64 = 2.0;
const LEGEND_INSET: f64 = 275.0;

const TOOLTIP_FONT: f64 = 12.0;
const TOOLTIP_PAD: f64 = 8.0;
const TOOLTIP_LINE: f64 = 16.0;
const TOOLTIP_BORDER: Rgb = Rgb(204, 204, 204);

const BAR_SERIES: [(Series, Rgb); 2] = [(Series::ActualPrecip, RED), (Series::HistoricalPrecip, STEELBLUE)];

/// Plot-local rectangle `(x, y, width, height)`.
pub type BarRect = (f64, f64, f64, f64);

#[derive(Debug, Clone)]
pub struct PrecipitationChart {
    config: ChartConfig,
    months: Vec<MonthlyAggregate>,
    x: TimeScale,
    y: LinearScale,
    bar_width: f64,
}

impl PrecipitationChart {
    /// Build scales from month-sorted aggregates. `None` without aggregates.
    pub fn new(config: ChartConfig, months: Vec<MonthlyAggregate>) -> Option<Self> {
        let first = months.iter().map(|m| m.month).min()?;
        let last = months.iter().map(|m| m.month).max()?;
        // One month of padding each side keeps the edge bars inside the plot.
        let x = TimeScale::new(
            shift_months(first, -1),
            shift_months(last, 1),
            (0.0, config.plot_width()),
        );

        let max = paired_extent(months.iter().map(|m| (m.actual_avg, m.average_avg)))
            .map(|(_, hi)| hi)
            .filter(|hi| *hi > 0.0)
            .unwrap_or(1.0);
        let y = LinearScale::new((0.0, max * Y_HEADROOM), (config.plot_height(), 0.0));
        let bar_width = config.plot_width() / months.len() as f64 * BAR_FRACTION;
        Some(Self {
            config,
            months,
            x,
            y,
            bar_width,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn months(&self) -> &[MonthlyAggregate] {
        &self.months
    }

    pub fn x_scale(&self) -> &TimeScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    fn value(&self, bar: BarRef) -> Option<f64> {
        let m = self.months.get(bar.index)?;
        match bar.series {
            Series::ActualPrecip => Some(m.actual_avg),
            Series::HistoricalPrecip => Some(m.average_avg),
            Series::ActualTemp | Series::AverageMaxTemp => None,
        }
    }

    /// Plot-local rectangle of one bar: the actual bar sits left of the month
    /// tick, the historical bar right of it.
    pub fn bar_rect(&self, bar: BarRef) -> Option<BarRect> {
        let m = self.months.get(bar.index)?;
        let v = self.value(bar)?;
        let tick = self.x.map_date(m.month);
        let left = match bar.series {
            Series::ActualPrecip => tick - self.bar_width - BAR_GAP,
            _ => tick + BAR_GAP,
        };
        let top = self.y.map(v);
        Some((left, top, self.bar_width, self.config.plot_height() - top))
    }

    /// Topmost visible bar containing the plot-local point.
    pub fn bar_at(&self, px: f64, py: f64, visibility: &Visibility) -> Option<BarRef> {
        BAR_SERIES
            .iter()
            .rev()
            .filter(|(series, _)| visibility.is_visible(*series))
            .flat_map(|(series, _)| {
                (0..self.months.len()).map(move |index| BarRef {
                    index,
                    series: *series,
                })
            })
            .find(|bar| {
                self.bar_rect(*bar).is_some_and(|(x, y, w, h)| {
                    px >= x && px <= x + w && py >= y && py <= y + h
                })
            })
    }

    /// "Month" and value lines of a bar tooltip.
    pub fn tooltip_lines(&self, bar: BarRef) -> Option<[String; 2]> {
        let m = self.months.get(bar.index)?;
        let v = self.value(bar)?;
        let name = match bar.series {
            Series::ActualPrecip => "Actual Avg",
            _ => "Historical Avg",
        };
        Some([
            format!("Month: {}", format_month(m.month)),
            format!("{name}: {v:.2} in"),
        ])
    }

    fn tooltip_elements(&self, scene: &mut Scene, tooltip: &BarTooltip) {
        let Some(lines) = self.tooltip_lines(tooltip.bar) else {
            return;
        };
        let (ox, oy) = plot_origin(&self.config);
        let (x, y) = (ox + tooltip.x, oy + tooltip.y);
        let w = widest_line_px(lines.iter().map(String::as_str), TOOLTIP_FONT) + 2.0 * TOOLTIP_PAD;
        let h = lines.len() as f64 * TOOLTIP_LINE + 2.0 * TOOLTIP_PAD;
        scene.push(
            Layer::Overlay,
            Primitive::Rect {
                x,
                y,
                w,
                h,
                fill: WHITE,
                stroke: Some(TOOLTIP_BORDER),
                opacity: 0.9,
            },
        );
        for (i, line) in lines.into_iter().enumerate() {
            let ly = y + TOOLTIP_PAD + (i as f64 + 0.5) * TOOLTIP_LINE;
            scene.push(
                Layer::Overlay,
                label(x + TOOLTIP_PAD, ly, line, TOOLTIP_FONT, Anchor::Start),
            );
        }
    }

    /// Full drawing list; `tooltip` is the currently hovered bar, if any.
    pub fn scene(&self, tooltip: Option<&BarTooltip>) -> Scene {
        let mut scene = Scene::new(self.config.width, self.config.height);
        let (ox, oy) = plot_origin(&self.config);
        bottom_time_axis(&mut scene, &self.config, &self.x);
        left_value_axis(&mut scene, &self.config, &self.y);
        for (series, color) in BAR_SERIES {
            for index in 0..self.months.len() {
                if let Some((x, y, w, h)) = self.bar_rect(BarRef { index, series }) {
                    scene.push(
                        Layer::Series(series),
                        Primitive::Rect {
                            x: ox + x,
                            y: oy + y,
                            w,
                            h,
                            fill: color,
                            stroke: None,
                            opacity: 1.0,
                        },
                    );
                }
            }
        }
        titles(&mut scene, &self.config, TITLE, Y_LABEL);
        draw_legend(&mut scene, &self.config, LEGEND_INSET, &BAR_SERIES);
        if let Some(t) = tooltip {
            self.tooltip_elements(&mut scene, t);
        }
        scene
    }
}
