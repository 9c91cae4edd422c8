use crate::models::DailyRecord;
use serde::Serialize;

/// Summary statistics for one numeric field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub field: &'static str,
    pub count: usize,
    /// Values that are NaN (only possible with lenient loading).
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

type FieldAccessor = fn(&DailyRecord) -> f64;

const FIELDS: [(&str, FieldAccessor); 4] = [
    ("actual_mean_temp", |r| r.actual_mean_temp),
    ("average_max_temp", |r| r.average_max_temp),
    ("actual_precipitation", |r| r.actual_precipitation),
    ("average_precipitation", |r| r.average_precipitation),
];

/// Compute statistics for each of the four numeric columns.
pub fn field_summaries(records: &[DailyRecord]) -> Vec<Summary> {
    FIELDS
        .iter()
        .map(|&(field, get)| summarize(field, records.iter().map(get)))
        .collect()
}

fn summarize(field: &'static str, values: impl Iterator<Item = f64>) -> Summary {
    let mut missing = 0;
    let mut vals: Vec<f64> = Vec::new();
    for v in values {
        if v.is_nan() {
            missing += 1;
        } else {
            vals.push(v);
        }
    }
    vals.sort_by(f64::total_cmp);

    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    Summary { field, count, missing, min, max, mean, median }
}
