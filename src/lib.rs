//! weather_viz
//!
//! A small Rust library for loading daily city weather data, deriving monthly
//! precipitation averages, and charting both. Pairs with the `wxviz` CLI and
//! the `wxviz-gui` viewer.
//!
//! ### Features
//! - Load a weather CSV into typed records (strict or lenient number parsing)
//! - Filter to one city and average precipitation per calendar month
//! - Temperature line chart and monthly precipitation bar chart as SVG
//! - Hover and series-visibility handling as plain state transitions
//! - Export monthly aggregates as CSV or JSON, summary statistics
//!
//! ### Example
//! ```no_run
//! use weather_viz::config::ChartConfig;
//! use weather_viz::storage::{self, NumericPolicy};
//! use weather_viz::viz::{Dashboard, DashboardState, Event};
//! use weather_viz::Series;
//!
//! let records = storage::load_csv("weather.csv", NumericPolicy::Strict)?;
//! let dashboard = Dashboard::build(&records, "Indianapolis", ChartConfig::default())?;
//! let state = dashboard.handle(
//!     &DashboardState::default(),
//!     Event::Toggle(Series::HistoricalPrecip, false),
//! );
//! dashboard.render_to_dir(&state, "charts")?;
//! # Ok::<(), weather_viz::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
pub mod transform;
pub mod viz;

pub use error::{Error, Result};
pub use models::{DailyRecord, MonthlyAggregate, Series, Visibility};
