//! Chart construction, interaction, and rendering.
//!
//! - [`TemperatureChart`]: daily actual-mean and average-max temperature lines
//! - [`PrecipitationChart`]: paired monthly precipitation bars
//! - [`Dashboard`]: both charts built from one city's records, plus a single
//!   event entry point for hover and visibility changes
//!
//! Charts produce a backend-neutral [`Scene`]; [`render`] paints scenes to SVG.

pub mod axis;
pub mod curve;
pub mod interaction;
pub mod legend;
pub mod precipitation;
pub mod render;
pub mod scale;
pub mod scene;
pub mod temperature;
pub mod text;

pub use interaction::{BarRef, BarTooltip, DashboardState, Event, HoverState, PointerEvent};
pub use precipitation::PrecipitationChart;
pub use render::{render_svg_file, render_svg_string};
pub use scene::{Layer, Scene};
pub use temperature::TemperatureChart;

use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::models::DailyRecord;
use crate::transform::{filter_city, monthly_aggregates};
use chrono::NaiveDate;
use interaction::{hover_precipitation, hover_temperature, toggle};
use log::debug;
use std::path::Path;

/// File names written by [`Dashboard::render_to_dir`].
pub const TEMPERATURE_FILE: &str = "temperature.svg";
pub const PRECIPITATION_FILE: &str = "precipitation.svg";

/// Both charts for one city. Each chart owns its data and scales.
#[derive(Debug, Clone)]
pub struct Dashboard {
    city: String,
    temperature: TemperatureChart,
    precipitation: PrecipitationChart,
}

impl Dashboard {
    /// Filter `records` to `city`, aggregate by month, and build both charts.
    ///
    /// Fails with [`Error::EmptyDataset`] when no record matches the city.
    pub fn build(records: &[DailyRecord], city: &str, config: ChartConfig) -> Result<Self> {
        let daily = filter_city(records, city);
        let monthly = monthly_aggregates(&daily);
        debug!(
            "{city}: {} daily records, {} months",
            daily.len(),
            monthly.len()
        );
        let empty = || Error::EmptyDataset {
            city: city.to_string(),
        };
        let temperature = TemperatureChart::new(config, daily).ok_or_else(empty)?;
        let precipitation = PrecipitationChart::new(config, monthly).ok_or_else(empty)?;
        Ok(Self {
            city: city.to_string(),
            temperature,
            precipitation,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn temperature(&self) -> &TemperatureChart {
        &self.temperature
    }

    pub fn precipitation(&self) -> &PrecipitationChart {
        &self.precipitation
    }

    /// Apply one event and return the next state. Toggles never touch data or
    /// scales; hiding a bar series also drops a tooltip that points at it.
    pub fn handle(&self, state: &DashboardState, event: Event) -> DashboardState {
        let mut next = *state;
        match event {
            Event::Temperature(pointer) => {
                next.temperature_hover =
                    hover_temperature(&self.temperature, state.temperature_hover, pointer);
            }
            Event::Precipitation(pointer) => {
                next.precipitation_tooltip =
                    hover_precipitation(&self.precipitation, &state.visibility, pointer);
            }
            Event::Toggle(series, visible) => {
                next.visibility = toggle(state.visibility, series, visible);
                if let Some(t) = next.precipitation_tooltip
                    && !next.visibility.is_visible(t.bar.series)
                {
                    next.precipitation_tooltip = None;
                }
            }
        }
        next
    }

    /// Replay a pointer move over `date` on the temperature chart.
    pub fn hover_date(&self, state: &DashboardState, date: NaiveDate) -> DashboardState {
        let x = self.temperature.x_scale().map_date(date);
        let y = self.temperature.config().plot_height() / 2.0;
        self.handle(state, Event::Temperature(PointerEvent::Move { x, y }))
    }

    pub fn temperature_scene(&self, state: &DashboardState) -> Scene {
        self.temperature.scene(&state.temperature_hover)
    }

    pub fn precipitation_scene(&self, state: &DashboardState) -> Scene {
        self.precipitation.scene(state.precipitation_tooltip.as_ref())
    }

    /// Write both charts as SVG files into `dir`.
    pub fn render_to_dir<P: AsRef<Path>>(&self, state: &DashboardState, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        render_svg_file(
            &self.temperature_scene(state),
            &state.visibility,
            dir.join(TEMPERATURE_FILE),
        )?;
        render_svg_file(
            &self.precipitation_scene(state),
            &state.visibility,
            dir.join(PRECIPITATION_FILE),
        )?;
        Ok(())
    }
}
