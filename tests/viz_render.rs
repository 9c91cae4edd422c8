use std::fs;
use weather_viz::config::ChartConfig;
use weather_viz::storage::{self, NumericPolicy};
use weather_viz::viz::{self, Dashboard, DashboardState, Event};
use weather_viz::Series;

const FIXTURE: &str = include_str!("fixtures/weather.csv");

fn dashboard() -> Dashboard {
    let records = storage::read_records(FIXTURE.as_bytes(), NumericPolicy::Strict).unwrap();
    Dashboard::build(&records, "Indianapolis", ChartConfig::default()).unwrap()
}

fn occurrences(haystack: &str, needle: &str) -> usize {
    haystack.to_ascii_lowercase().matches(needle).count()
}

#[test]
fn svg_contains_titles_and_ticks() {
    let d = dashboard();
    let state = DashboardState::default();
    let svg = viz::render_svg_string(&d.temperature_scene(&state), &state.visibility).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Temperature Trends Over Time"));
    // Ticks fall on every other month start inside the data range.
    assert!(svg.contains("Mar 2021"));
    assert!(!svg.contains("Jan 2021"));
    assert!(!svg.contains("Feb 2021"));

    let svg = viz::render_svg_string(&d.precipitation_scene(&state), &state.visibility).unwrap();
    assert!(svg.contains("Precipitation Trends (Monthly Averages)"));
    assert!(svg.contains("Historical Monthly Avg"));
}

#[test]
fn hidden_bars_are_not_painted() {
    let d = dashboard();
    let shown = DashboardState::default();
    let hidden = d.handle(&shown, Event::Toggle(Series::ActualPrecip, false));

    let a = viz::render_svg_string(&d.precipitation_scene(&shown), &shown.visibility).unwrap();
    let b = viz::render_svg_string(&d.precipitation_scene(&hidden), &hidden.visibility).unwrap();
    // Four red bars disappear; the red legend swatch stays.
    assert_eq!(occurrences(&a, "#ff0000") - occurrences(&b, "#ff0000"), 4);
    assert_eq!(occurrences(&a, "#4682b4"), occurrences(&b, "#4682b4"));
}

#[test]
fn hover_tooltip_is_rendered() {
    let d = dashboard();
    let date = chrono::NaiveDate::from_ymd_opt(2021, 1, 28).unwrap();
    let state = d.hover_date(&DashboardState::default(), date);
    let svg = viz::render_svg_string(&d.temperature_scene(&state), &state.visibility).unwrap();
    assert!(svg.contains("1/28/2021"));
    assert!(svg.contains("26°F"));
}

#[test]
fn render_to_dir_writes_both_files() {
    let d = dashboard();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("charts");
    d.render_to_dir(&DashboardState::default(), &out).unwrap();
    for name in [viz::TEMPERATURE_FILE, viz::PRECIPITATION_FILE] {
        let meta = fs::metadata(out.join(name)).expect("file created");
        assert!(meta.len() > 0, "svg has content");
    }
}
