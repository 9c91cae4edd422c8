use chrono::NaiveDate;
use std::fs;
use weather_viz::config;
use weather_viz::models::MonthlyAggregate;
use weather_viz::storage::{self, NumericPolicy};

fn sample() -> Vec<MonthlyAggregate> {
    (1..=3)
        .map(|m| MonthlyAggregate {
            month: NaiveDate::from_ymd_opt(2021, m, 1).unwrap(),
            actual_avg: 0.1 * m as f64,
            average_avg: 0.05 * m as f64,
        })
        .collect()
}

#[test]
fn save_csv_and_json() {
    let rows = sample();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("monthly.csv");
    storage::save_monthly_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("month,actual_avg,average_avg"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert!(csv_txt.contains("2021-02-01,0.2,0.1"));

    let json_path = dir.path().join("monthly.json");
    storage::save_monthly_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), rows.len());
    assert_eq!(arr[0]["month"], "2021-01-01");
    let back: Vec<MonthlyAggregate> = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn load_csv_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/weather.csv");
    let rows = storage::load_csv(path, NumericPolicy::Strict).unwrap();
    assert_eq!(rows.len(), 9);
    assert_eq!(rows.iter().filter(|r| r.city == "Chicago").count(), 2);
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = storage::load_csv(dir.path().join("nope.csv"), NumericPolicy::Strict).unwrap_err();
    assert!(matches!(err, weather_viz::Error::Io(_)));
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    fs::write(&path, r#"{ "city": "Chicago", "chart": { "width": 1200, "height": 500 } }"#).unwrap();
    let cfg = config::load_config(&path).unwrap();
    assert_eq!(cfg.city, "Chicago");
    assert_eq!(cfg.chart.plot_width(), 1100.0);
    assert_eq!(cfg.chart.plot_height(), 390.0);
}
