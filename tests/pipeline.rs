use chrono::NaiveDate;
use std::collections::HashSet;
use weather_viz::models::DailyRecord;
use weather_viz::storage::{self, NumericPolicy};
use weather_viz::transform::{filter_city, monthly_aggregates};

const FIXTURE: &str = include_str!("fixtures/weather.csv");

fn fixture() -> Vec<DailyRecord> {
    storage::read_records(FIXTURE.as_bytes(), NumericPolicy::Strict).unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn filter_output_is_a_sorted_subset_of_one_city() {
    let all = fixture();
    let indy = filter_city(&all, "Indianapolis");
    assert_eq!(indy.len(), 7);
    assert!(indy.iter().all(|r| r.city == "Indianapolis"));
    assert!(indy.iter().all(|r| all.contains(r)));
    assert!(indy.windows(2).all(|w| w[0].date <= w[1].date));
    assert!(filter_city(&all, "INDIANAPOLIS").is_empty());
}

#[test]
fn aggregation_partitions_the_filtered_records() {
    let indy = filter_city(&fixture(), "Indianapolis");
    let months = monthly_aggregates(&indy);

    // Strictly increasing, so no duplicate (year, month) keys.
    assert!(months.windows(2).all(|w| w[0].month < w[1].month));
    let keys: HashSet<NaiveDate> = months.iter().map(|m| m.month).collect();
    assert_eq!(keys.len(), months.len());

    for m in &months {
        let group: Vec<&DailyRecord> = indy
            .iter()
            .filter(|r| r.date >= m.month && r.date < weather_viz::viz::scale::shift_months(m.month, 1))
            .collect();
        assert!(!group.is_empty());
        let mean = group.iter().map(|r| r.actual_precipitation).sum::<f64>() / group.len() as f64;
        assert!((m.actual_avg - mean).abs() < 1e-12);
    }

    let grouped: usize = months
        .iter()
        .map(|m| {
            indy.iter()
                .filter(|r| r.date.format("%Y-%m").to_string() == m.month.format("%Y-%m").to_string())
                .count()
        })
        .sum();
    assert_eq!(grouped, indy.len());
}

#[test]
fn january_example() {
    let indy = filter_city(&fixture(), "Indianapolis");
    let months = monthly_aggregates(&indy);
    assert_eq!(months.len(), 4);
    let jan = months[0];
    assert_eq!(jan.month, d(2021, 1, 1));
    assert!((jan.actual_avg - 0.20).abs() < 1e-12);
    assert!((jan.average_avg - 0.15).abs() < 1e-12);
    assert_eq!(months[3].month, d(2021, 4, 1));
}

#[test]
fn lenient_trace_values_keep_their_month() {
    let csv = "\
date,city,actual_mean_temp,average_max_temp,actual_precipitation,average_precipitation
2021-01-15,Indianapolis,30,36,0.10,0.05
2021-01-20,Indianapolis,27,36,T,0.10
2021-01-28,Indianapolis,26,36,0.30,0.25
";
    let rows = storage::read_records(csv.as_bytes(), NumericPolicy::Lenient).unwrap();
    assert!(rows[1].actual_precipitation.is_nan());

    let months = monthly_aggregates(&filter_city(&rows, "Indianapolis"));
    assert_eq!(months.len(), 1);
    assert!((months[0].actual_avg - 0.20).abs() < 1e-12);
    assert!((months[0].average_avg - 0.40 / 3.0).abs() < 1e-12);
}
