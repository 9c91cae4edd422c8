use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the input table as it appears on disk (all fields still text).
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub city: String,
    pub actual_mean_temp: String,
    pub average_max_temp: String,
    pub actual_precipitation: String,
    pub average_precipitation: String,
}

/// One observed day for one city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub city: String,
    pub actual_mean_temp: f64,
    pub average_max_temp: f64,
    pub actual_precipitation: f64,
    pub average_precipitation: f64,
}

/// Mean precipitation over every record of one calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthlyAggregate {
    /// First day of the month.
    pub month: NaiveDate,
    pub actual_avg: f64,
    pub average_avg: f64,
}

/// A named, independently toggleable visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Series {
    ActualTemp,
    AverageMaxTemp,
    ActualPrecip,
    HistoricalPrecip,
}

impl Series {
    pub const ALL: [Series; 4] = [
        Series::ActualTemp,
        Series::AverageMaxTemp,
        Series::ActualPrecip,
        Series::HistoricalPrecip,
    ];

    /// Fixed name of the switch that controls this series.
    pub fn control_name(self) -> &'static str {
        match self {
            Series::ActualTemp => "actual-temp",
            Series::AverageMaxTemp => "average-temp",
            Series::ActualPrecip => "actual-precip",
            Series::HistoricalPrecip => "historical-precip",
        }
    }

    pub fn from_control_name(name: &str) -> Option<Self> {
        Series::ALL
            .into_iter()
            .find(|s| s.control_name().eq_ignore_ascii_case(name.trim()))
    }

    /// Legend text.
    pub fn label(self) -> &'static str {
        match self {
            Series::ActualTemp => "Actual Mean Temp",
            Series::AverageMaxTemp => "Average Max Temp",
            Series::ActualPrecip => "Actual Monthly Avg",
            Series::HistoricalPrecip => "Historical Monthly Avg",
        }
    }
}

/// Display state of the four series switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub actual_temp: bool,
    pub average_temp: bool,
    pub actual_precip: bool,
    pub historical_precip: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            actual_temp: true,
            average_temp: true,
            actual_precip: true,
            historical_precip: true,
        }
    }
}

impl Visibility {
    pub fn is_visible(&self, series: Series) -> bool {
        match series {
            Series::ActualTemp => self.actual_temp,
            Series::AverageMaxTemp => self.average_temp,
            Series::ActualPrecip => self.actual_precip,
            Series::HistoricalPrecip => self.historical_precip,
        }
    }

    pub fn set(&mut self, series: Series, visible: bool) {
        let slot = match series {
            Series::ActualTemp => &mut self.actual_temp,
            Series::AverageMaxTemp => &mut self.average_temp,
            Series::ActualPrecip => &mut self.actual_precip,
            Series::HistoricalPrecip => &mut self.historical_precip,
        };
        *slot = visible;
    }
}
