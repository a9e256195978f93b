//! Parser for the per-station daily CSV (`csv/by_station/{id}.csv`).
//!
//! Rows look like `ID,DATE,ELEMENT,DATA_VALUE,M_FLAG,Q_FLAG,S_FLAG,OBS_TIME`
//! with dates as `YYYYMMDD` and values in tenths of a degree.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use super::types::{Element, Observation};

/// Value marking a missing reading.
const MISSING_VALUE: &str = "NA";

/// Why a row was dropped as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Malformed {
    TooFewFields,
    BadYear,
    BadDate,
    BadValue,
}

/// Parse the daily CSV, keeping TMAX/TMIN rows in `start_year..=end_year`.
///
/// The first line is a header and is always discarded. Blank lines are
/// ignored and a malformed row is skipped on its own; it never aborts the
/// parse.
pub fn parse_daily_csv(raw: &str, start_year: i32, end_year: i32) -> Vec<Observation> {
    let body = match raw.split_once('\n') {
        Some((_header, rest)) => rest,
        None => return Vec::new(),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut observations = Vec::new();
    let mut malformed = 0usize;

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "skipping unreadable row");
                malformed += 1;
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        match parse_row(&record, start_year, end_year) {
            Ok(Some(observation)) => observations.push(observation),
            Ok(None) => {}
            Err(reason) => {
                debug!(?reason, row = ?record, "skipping malformed row");
                malformed += 1;
            }
        }
    }

    debug!(
        kept = observations.len(),
        malformed, "parsed daily observations"
    );
    observations
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// `Ok(None)` for a well-formed row that the filters exclude.
fn parse_row(
    record: &StringRecord,
    start_year: i32,
    end_year: i32,
) -> Result<Option<Observation>, Malformed> {
    let (Some(date), Some(code), Some(value)) = (record.get(1), record.get(2), record.get(3))
    else {
        return Err(Malformed::TooFewFields);
    };

    let year = date
        .get(..4)
        .and_then(|y| y.parse::<i32>().ok())
        .ok_or(Malformed::BadYear)?;

    if year < start_year || year > end_year {
        return Ok(None);
    }

    let Some(element) = Element::parse(code) else {
        return Ok(None);
    };

    let date = parse_date(date).ok_or(Malformed::BadDate)?;

    let value_tenths = if value == MISSING_VALUE {
        None
    } else {
        Some(value.parse::<i32>().map_err(|_| Malformed::BadValue)?)
    };

    Ok(Some(Observation {
        date,
        element,
        value_tenths,
    }))
}

/// Parse an 8-digit `YYYYMMDD` date.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
