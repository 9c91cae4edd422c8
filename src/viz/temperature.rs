//! Chart 1: daily temperature lines with a nearest-point hover marker.

use super::axis::{bottom_time_axis, left_value_axis, plot_origin, titles};
use super::curve::flatten;
use super::interaction::HoverState;
use super::legend::draw_legend;
use super::scale::{LinearScale, TimeScale, day_number, paired_extent};
use super::scene::{Anchor, Layer, Primitive, RED, Rgb, STEELBLUE, Scene, TOOLTIP_BORDER, WHITE, label};
use crate::config::ChartConfig;
use crate::models::{DailyRecord, Series};

pub const TITLE: &str = "Temperature Trends Over Time";
pub const Y_LABEL: &str = "Temperature (°F)";
/// Degrees added above and below the temperature extent.
const Y_PADDING: f64 = 5.0;
const LEGEND_INSET: f64 = 230.0;
const CURVE_STEPS: usize = 8;
const STROKE: f64 = 1.5;

const MARKER_RADIUS: f64 = 5.0;
const TOOLTIP_BOX: (f64, f64, f64, f64) = (10.0, -22.0, 120.0, 50.0);

#[derive(Debug, Clone)]
pub struct TemperatureChart {
    config: ChartConfig,
    records: Vec<DailyRecord>,
    x: TimeScale,
    y: LinearScale,
}

impl TemperatureChart {
    /// Build scales from date-sorted records of one city. `None` without records.
    pub fn new(config: ChartConfig, records: Vec<DailyRecord>) -> Option<Self> {
        let first = records.iter().map(|r| r.date).min()?;
        let last = records.iter().map(|r| r.date).max()?;
        let x = TimeScale::new(first, last, (0.0, config.plot_width()));

        let (lo, hi) = paired_extent(
            records
                .iter()
                .map(|r| (r.actual_mean_temp, r.average_max_temp)),
        )
        .unwrap_or((0.0, 0.0));
        let y = LinearScale::new(
            (lo - Y_PADDING, hi + Y_PADDING),
            (config.plot_height(), 0.0),
        );
        Some(Self { config, records, x, y })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn x_scale(&self) -> &TimeScale {
        &self.x
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y
    }

    /// Plot-local position of a record's actual mean temperature.
    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        let r = self.records.get(index)?;
        Some((self.x.map_date(r.date), self.y.map(r.actual_mean_temp)))
    }

    /// Record closest in time to `day` (a fractional day number).
    ///
    /// Bisects for the first record at or after `day` (never index 0), then
    /// compares the two neighbours; ties go to the earlier record.
    pub fn nearest_index(&self, day: f64) -> Option<usize> {
        let n = self.records.len();
        match n {
            0 => None,
            1 => Some(0),
            _ => {
                let i = 1 + self.records[1..].partition_point(|r| day_number(r.date) < day);
                if i >= n {
                    return Some(n - 1);
                }
                let d0 = day_number(self.records[i - 1].date);
                let d1 = day_number(self.records[i].date);
                Some(if day - d0 > d1 - day { i } else { i - 1 })
            }
        }
    }

    /// Date and temperature lines of the hover tooltip.
    pub fn tooltip_text(&self, index: usize) -> Option<(String, String)> {
        let r = self.records.get(index)?;
        Some((
            r.date.format("%-m/%-d/%Y").to_string(),
            format!("{}°F", r.actual_mean_temp),
        ))
    }

    fn line_elements(&self, scene: &mut Scene, series: Series, color: Rgb, value: fn(&DailyRecord) -> f64) {
        let (ox, oy) = plot_origin(&self.config);
        // NaN readings break the line rather than poisoning it.
        let mut run: Vec<(f64, f64)> = Vec::new();
        let flush = |run: &mut Vec<(f64, f64)>, scene: &mut Scene| {
            if !run.is_empty() {
                scene.push(
                    Layer::Series(series),
                    Primitive::Path {
                        points: flatten(run, CURVE_STEPS),
                        color,
                        width: STROKE,
                    },
                );
                run.clear();
            }
        };
        for r in &self.records {
            let y = value(r);
            if y.is_finite() {
                run.push((ox + self.x.map_date(r.date), oy + self.y.map(y)));
            } else {
                flush(&mut run, &mut *scene);
            }
        }
        flush(&mut run, &mut *scene);
    }

    fn hover_elements(&self, scene: &mut Scene, index: usize) {
        let (Some((px, py)), Some((date, temp))) = (self.point(index), self.tooltip_text(index))
        else {
            return;
        };
        let (ox, oy) = plot_origin(&self.config);
        let (cx, cy) = (ox + px, oy + py);
        let (bx, by, bw, bh) = TOOLTIP_BOX;
        scene.push(
            Layer::Overlay,
            Primitive::Circle {
                cx,
                cy,
                r: MARKER_RADIUS,
                fill: STEELBLUE,
            },
        );
        scene.push(
            Layer::Overlay,
            Primitive::Rect {
                x: cx + bx,
                y: cy + by,
                w: bw,
                h: bh,
                fill: WHITE,
                stroke: Some(TOOLTIP_BORDER),
                opacity: 0.9,
            },
        );
        scene.push(Layer::Overlay, label(cx + 18.0, cy - 7.0, date, 12.0, Anchor::Start));
        scene.push(Layer::Overlay, label(cx + 18.0, cy + 13.0, "Temp:", 12.0, Anchor::Start));
        scene.push(Layer::Overlay, label(cx + 60.0, cy + 13.0, temp, 12.0, Anchor::Start));
    }

    /// Full drawing list for the current hover state.
    pub fn scene(&self, hover: &HoverState) -> Scene {
        let mut scene = Scene::new(self.config.width, self.config.height);
        bottom_time_axis(&mut scene, &self.config, &self.x);
        left_value_axis(&mut scene, &self.config, &self.y);
        self.line_elements(&mut scene, Series::ActualTemp, STEELBLUE, |r| r.actual_mean_temp);
        self.line_elements(&mut scene, Series::AverageMaxTemp, RED, |r| r.average_max_temp);
        titles(&mut scene, &self.config, TITLE, Y_LABEL);
        draw_legend(
            &mut scene,
            &self.config,
            LEGEND_INSET,
            &[(Series::ActualTemp, STEELBLUE), (Series::AverageMaxTemp, RED)],
        );
        if let Some(index) = hover.shown_index() {
            self.hover_elements(&mut scene, index);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(day: u32, temp: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
            city: "Indianapolis".into(),
            actual_mean_temp: temp,
            average_max_temp: temp + 10.0,
            actual_precipitation: 0.0,
            average_precipitation: 0.0,
        }
    }

    fn chart() -> TemperatureChart {
        TemperatureChart::new(ChartConfig::default(), vec![rec(1, 20.0), rec(5, 30.0), rec(9, 25.0)])
            .unwrap()
    }

    #[test]
    fn y_domain_is_padded_extent() {
        let c = chart();
        assert_eq!(c.y_scale().domain, (15.0, 45.0));
        assert_eq!(c.y_scale().range, (290.0, 0.0));
    }

    #[test]
    fn nearest_follows_midpoint_rule() {
        let c = chart();
        let d1 = day_number(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        // Between day 1 and day 5: closer to 1 below the midpoint, tie keeps 1.
        assert_eq!(c.nearest_index(d1 + 1.0), Some(0));
        assert_eq!(c.nearest_index(d1 + 2.0), Some(0));
        assert_eq!(c.nearest_index(d1 + 2.5), Some(1));
        // Before the first and after the last record.
        assert_eq!(c.nearest_index(d1 - 10.0), Some(0));
        assert_eq!(c.nearest_index(d1 + 100.0), Some(2));
    }

    #[test]
    fn tooltip_formats_like_a_us_date() {
        let c = chart();
        let (date, temp) = c.tooltip_text(1).unwrap();
        assert_eq!(date, "1/5/2021");
        assert_eq!(temp, "30°F");
    }

    #[test]
    fn nan_breaks_line() {
        let mut gap = rec(2, 21.0);
        gap.actual_mean_temp = f64::NAN;
        let c = TemperatureChart::new(
            ChartConfig::default(),
            vec![rec(1, 20.0), gap, rec(3, 25.0), rec(4, 26.0)],
        )
        .unwrap();
        let scene = c.scene(&HoverState::default());
        assert_eq!(scene.count(Layer::Series(Series::ActualTemp)), 2);
        assert_eq!(scene.count(Layer::Series(Series::AverageMaxTemp)), 1);
    }

    #[test]
    fn half_missing_record_is_left_out_of_y_domain() {
        let mut hot = rec(2, 90.0);
        hot.average_max_temp = f64::NAN;
        let c = TemperatureChart::new(
            ChartConfig::default(),
            vec![rec(1, 20.0), hot, rec(3, 25.0)],
        )
        .unwrap();
        assert_eq!(c.y_scale().domain, (15.0, 40.0));
    }

    #[test]
    fn empty_input_has_no_chart() {
        assert!(TemperatureChart::new(ChartConfig::default(), Vec::new()).is_none());
    }
}
