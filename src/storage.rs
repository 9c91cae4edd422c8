use crate::error::{Error, Result};
use crate::models::{DailyRecord, MonthlyAggregate, RawRow};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, warn};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 6] = [
    "date",
    "city",
    "actual_mean_temp",
    "average_max_temp",
    "actual_precipitation",
    "average_precipitation",
];

/// What to do with a numeric field that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Fail the whole load with [`Error::MalformedNumber`].
    #[default]
    Strict,
    /// Store `NaN`, log a warning, and keep going.
    Lenient,
}

/// Load daily records from a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P, policy: NumericPolicy) -> Result<Vec<DailyRecord>> {
    let path = path.as_ref();
    debug!("Reading weather CSV: {}", path.display());
    read_records(File::open(path)?, policy)
}

/// Parse daily records from any CSV source. Columns may appear in any order;
/// extra columns are ignored.
pub fn read_records<R: Read>(source: R, policy: NumericPolicy) -> Result<Vec<DailyRecord>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(Error::MissingColumn(col));
        }
    }

    let mut out = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawRow = record.deserialize(Some(&headers))?;
        out.push(convert_row(raw, line, policy)?);
    }
    debug!("Parsed {} daily records", out.len());
    Ok(out)
}

fn convert_row(raw: RawRow, line: u64, policy: NumericPolicy) -> Result<DailyRecord> {
    let date = parse_date(&raw.date).ok_or_else(|| Error::MalformedDate {
        line,
        value: raw.date.clone(),
    })?;
    let num = |column: &'static str, value: &str| parse_number(value, column, line, policy);
    Ok(DailyRecord {
        date,
        actual_mean_temp: num("actual_mean_temp", &raw.actual_mean_temp)?,
        average_max_temp: num("average_max_temp", &raw.average_max_temp)?,
        actual_precipitation: num("actual_precipitation", &raw.actual_precipitation)?,
        average_precipitation: num("average_precipitation", &raw.average_precipitation)?,
        city: raw.city,
    })
}

/// Accepts `YYYY-MM-DD` (unpadded month/day allowed) and `M/D/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

fn parse_number(value: &str, column: &'static str, line: u64, policy: NumericPolicy) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) => match policy {
            NumericPolicy::Strict => Err(Error::MalformedNumber {
                line,
                column,
                value: value.to_string(),
            }),
            NumericPolicy::Lenient => {
                warn!("line {line}: `{column}` value {value:?} is not a number, using NaN");
                Ok(f64::NAN)
            }
        },
    }
}

/// Save monthly aggregates as CSV with header.
pub fn save_monthly_csv<P: AsRef<Path>>(rows: &[MonthlyAggregate], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["month", "actual_avg", "average_avg"])?;
    for r in rows {
        wtr.write_record([
            r.month.format("%Y-%m-%d").to_string(),
            r.actual_avg.to_string(),
            r.average_avg.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save monthly aggregates as pretty JSON array.
pub fn save_monthly_json<P: AsRef<Path>>(rows: &[MonthlyAggregate], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
