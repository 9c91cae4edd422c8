use crate::models::{DailyRecord, MonthlyAggregate};
use chrono::{Datelike, NaiveDate};
use log::debug;
use std::collections::HashMap;

/// Keep the records of exactly `city` (case-sensitive), ordered by date.
/// The sort is stable, so same-day records keep their input order.
pub fn filter_city(records: &[DailyRecord], city: &str) -> Vec<DailyRecord> {
    let mut out: Vec<DailyRecord> = records.iter().filter(|r| r.city == city).cloned().collect();
    out.sort_by_key(|r| r.date);
    debug!("{} of {} records match {city:?}", out.len(), records.len());
    out
}

/// Running mean that ignores non-finite values.
#[derive(Debug, Clone, Copy, Default)]
struct FiniteMean {
    sum: f64,
    count: usize,
}

impl FiniteMean {
    fn add(&mut self, v: f64) {
        if v.is_finite() {
            self.sum += v;
            self.count += 1;
        }
    }

    /// `NaN` when no finite value was seen.
    fn mean(self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Group records by calendar month and average both precipitation fields.
/// Output is sorted by month and holds one entry per month present.
///
/// Each field's mean skips NaN readings, so one unparseable day does not
/// blank out its month; a field with no finite reading in a month is NaN.
pub fn monthly_aggregates(records: &[DailyRecord]) -> Vec<MonthlyAggregate> {
    // (year, zero-based month) -> (actual, average)
    let mut groups: HashMap<(i32, u32), (FiniteMean, FiniteMean)> = HashMap::new();
    for r in records {
        let slot = groups.entry((r.date.year(), r.date.month0())).or_default();
        slot.0.add(r.actual_precipitation);
        slot.1.add(r.average_precipitation);
    }

    let mut out: Vec<MonthlyAggregate> = groups
        .into_iter()
        .filter_map(|((year, month0), (actual, average))| {
            let month = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
            Some(MonthlyAggregate {
                month,
                actual_avg: actual.mean(),
                average_avg: average.mean(),
            })
        })
        .collect();
    out.sort_by_key(|a| a.month);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(city: &str, y: i32, m: u32, d: u32, actual: f64, average: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            city: city.into(),
            actual_mean_temp: 0.0,
            average_max_temp: 0.0,
            actual_precipitation: actual,
            average_precipitation: average,
        }
    }

    #[test]
    fn filter_is_exact_and_sorted() {
        let rows = vec![
            rec("Indianapolis", 2021, 2, 1, 0.0, 0.0),
            rec("indianapolis", 2021, 1, 1, 0.0, 0.0),
            rec("Chicago", 2021, 1, 2, 0.0, 0.0),
            rec("Indianapolis", 2021, 1, 3, 0.0, 0.0),
        ];
        let out = filter_city(&rows, "Indianapolis");
        assert_eq!(out.len(), 2);
        assert!(out[0].date < out[1].date);
        assert!(out.iter().all(|r| r.city == "Indianapolis"));
    }

    #[test]
    fn filter_is_stable_on_equal_dates() {
        let mut a = rec("X", 2021, 1, 1, 1.0, 0.0);
        let mut b = rec("X", 2021, 1, 1, 2.0, 0.0);
        a.actual_mean_temp = 1.0;
        b.actual_mean_temp = 2.0;
        let out = filter_city(&[b.clone(), a.clone()], "X");
        assert_eq!(out, vec![b, a]);
    }

    #[test]
    fn single_month_example() {
        let rows = vec![
            rec("Indianapolis", 2021, 1, 15, 0.10, 0.05),
            rec("Indianapolis", 2021, 1, 28, 0.30, 0.25),
        ];
        let agg = monthly_aggregates(&rows);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].month, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert!((agg[0].actual_avg - 0.20).abs() < 1e-12);
        assert!((agg[0].average_avg - 0.15).abs() < 1e-12);
    }

    #[test]
    fn nan_readings_are_left_out_of_the_mean() {
        let rows = vec![
            rec("Indianapolis", 2021, 1, 15, 0.10, 0.05),
            rec("Indianapolis", 2021, 1, 20, f64::NAN, 0.20),
            rec("Indianapolis", 2021, 1, 28, 0.30, 0.25),
            rec("Indianapolis", 2021, 2, 3, f64::NAN, 0.08),
        ];
        let agg = monthly_aggregates(&rows);
        assert_eq!(agg.len(), 2);
        assert!((agg[0].actual_avg - 0.20).abs() < 1e-12);
        assert!((agg[0].average_avg - 0.50 / 3.0).abs() < 1e-12);
        // Nothing finite left for February's actual field.
        assert!(agg[1].actual_avg.is_nan());
        assert!((agg[1].average_avg - 0.08).abs() < 1e-12);
    }

    #[test]
    fn months_are_sorted_across_years() {
        let rows = vec![
            rec("X", 2021, 1, 5, 1.0, 1.0),
            rec("X", 2020, 12, 5, 2.0, 2.0),
            rec("X", 2021, 3, 5, 3.0, 3.0),
        ];
        let months: Vec<_> = monthly_aggregates(&rows).iter().map(|a| a.month).collect();
        assert_eq!(
            months,
            vec![
                NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(monthly_aggregates(&[]).is_empty());
    }
}
