//! Immutable layout and application settings.
//!
//! Every field has a default, so a JSON config file only needs to name what it
//! changes:
//!
//! ```json
//! { "city": "Chicago", "chart": { "width": 1200 } }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const DEFAULT_CITY: &str = "Indianapolis";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 30.0,
            bottom: 60.0,
            left: 70.0,
        }
    }
}

/// Canvas size (outer, margins included) shared by both charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 400.0,
            margin: Margin::default(),
        }
    }
}

impl ChartConfig {
    /// Width of the plotting area inside the margins.
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the plotting area inside the margins.
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Outer canvas size in whole pixels, as backends expect it.
    pub fn canvas_px(&self) -> (u32, u32) {
        (self.width.round().max(1.0) as u32, self.height.round().max(1.0) as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub city: String,
    pub chart: ChartConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            chart: ChartConfig::default(),
        }
    }
}

/// Read an [`AppConfig`] from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_layout() {
        let c = ChartConfig::default();
        assert_eq!(c.plot_width(), 800.0);
        assert_eq!(c.plot_height(), 290.0);
        assert_eq!(c.canvas_px(), (900, 400));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "chart": { "margin": { "left": 90 } } }"#).unwrap();
        assert_eq!(cfg.city, DEFAULT_CITY);
        assert_eq!(cfg.chart.margin.left, 90.0);
        assert_eq!(cfg.chart.margin.top, 50.0);
        assert_eq!(cfg.chart.width, 900.0);
    }
}
