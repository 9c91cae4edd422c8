//! Domain → pixel mappings for the chart axes.
//!
//! Dates travel through the scales as fractional day numbers (days since
//! 0001-01-01, see [`day_number`]) so that an inverted pixel can land between
//! two calendar days.

use chrono::{Datelike, Months, NaiveDate};

/// Calendar date → day number.
pub fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Day number → the calendar date containing it.
pub fn date_from_day(day: f64) -> Option<NaiveDate> {
    if !day.is_finite() {
        return None;
    }
    let whole = day.floor();
    if whole < i32::MIN as f64 || whole > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(whole as i32)
}

/// Move `date` by whole calendar months (negative = earlier). Out-of-range
/// results leave the date unchanged.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// `[min, max]` of the finite values, or `None` when there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Extent over pairs of readings. A pair contributes only when both values
/// are finite; one NaN drops the whole pair.
pub fn paired_extent(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<(f64, f64)> {
    extent(
        pairs
            .into_iter()
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .flat_map(|(a, b)| [a, b]),
    )
}

/// Linear map from a value domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` evenly spaced round values inside the domain, stepping
    /// by 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi || count == 0 {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        let i0 = (lo / step).ceil() as i64;
        let i1 = (hi / step).floor() as i64;
        (i0..=i1).map(|i| i as f64 * step).collect()
    }

    /// Tick labels with just enough decimals for the tick spacing.
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let ticks = self.ticks(count);
        let (lo, hi) = ordered(self.domain);
        let prec = if lo < hi && count > 0 {
            let step = tick_step(lo, hi, count);
            (-step.log10().floor()).max(0.0) as usize
        } else {
            0
        };
        ticks
            .into_iter()
            .map(|t| {
                let t = if t == 0.0 { 0.0 } else { t };
                (t, format!("{:.*}", prec, t))
            })
            .collect()
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Linear map from dates to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((day_number(start), day_number(end)), range),
        }
    }

    pub fn domain_dates(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (
            date_from_day(self.inner.domain.0),
            date_from_day(self.inner.domain.1),
        )
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range
    }

    pub fn map_date(&self, date: NaiveDate) -> f64 {
        self.inner.map(day_number(date))
    }

    pub fn map_day(&self, day: f64) -> f64 {
        self.inner.map(day)
    }

    /// Pixel → fractional day number.
    pub fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }

    /// First day of every `step`-th calendar month (January-aligned) inside
    /// the domain, endpoints included.
    pub fn month_ticks(&self, step: u32) -> Vec<NaiveDate> {
        let step = step.max(1);
        let (lo, hi) = ordered(self.inner.domain);
        let (Some(start), Some(end)) = (date_from_day(lo), date_from_day(hi)) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let Some(mut cursor) = start.with_day(1) else {
            return out;
        };
        while cursor <= end {
            if cursor >= start && cursor.month0() % step == 0 {
                out.push(cursor);
            }
            match cursor.checked_add_months(Months::new(1)) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        out
    }
}

/// Axis label for a month tick, e.g. `Mar 2021`.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn linear_map_and_invert() {
        let s = LinearScale::new((0.0, 100.0), (290.0, 0.0));
        assert_eq!(s.map(0.0), 290.0);
        assert_eq!(s.map(100.0), 0.0);
        assert!((s.invert(s.map(37.5)) - 37.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.map(5.0), 50.0);
    }

    #[test]
    fn nice_ticks() {
        let s = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let t = s.ticks(10);
        assert_eq!(t.len(), 11);
        assert!((t[3] - 0.3).abs() < 1e-12);
        let labels = s.tick_labels(10);
        assert_eq!(labels[5].1, "0.5");

        let s = LinearScale::new((12.0, 97.0), (0.0, 100.0));
        assert_eq!(s.ticks(10), vec![20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]);
        assert_eq!(s.tick_labels(10)[0].1, "20");
    }

    #[test]
    fn time_scale_is_monotonic_and_invertible() {
        let s = TimeScale::new(d(2021, 1, 1), d(2021, 12, 31), (0.0, 800.0));
        let a = d(2021, 3, 14);
        let b = d(2021, 3, 15);
        assert!(s.map_date(a) <= s.map_date(b));
        let back = s.invert(s.map_date(a));
        assert!((back - day_number(a)).abs() < 1.0);
        assert_eq!(date_from_day(back + 1e-6), Some(a));
    }

    #[test]
    fn ticks_every_two_months() {
        let s = TimeScale::new(d(2020, 12, 15), d(2021, 7, 1), (0.0, 800.0));
        let ticks: Vec<String> = s.month_ticks(2).into_iter().map(format_month).collect();
        assert_eq!(ticks, vec!["Jan 2021", "Mar 2021", "May 2021", "Jul 2021"]);
    }

    #[test]
    fn month_shift_crosses_years() {
        assert_eq!(shift_months(d(2021, 1, 1), -1), d(2020, 12, 1));
        assert_eq!(shift_months(d(2021, 12, 1), 1), d(2022, 1, 1));
    }

    #[test]
    fn extent_skips_nan() {
        assert_eq!(extent([3.0, f64::NAN, -1.0]), Some((-1.0, 3.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }

    #[test]
    fn paired_extent_drops_half_missing_pairs() {
        assert_eq!(
            paired_extent([(1.0, 2.0), (f64::NAN, 50.0), (-3.0, 0.0)]),
            Some((-3.0, 2.0))
        );
        assert_eq!(paired_extent([(f64::NAN, 1.0)]), None);
    }
}
