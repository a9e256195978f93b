//! Daily observation and yearly summary types.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Temperature element of a daily record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Daily maximum temperature
    Tmax,
    /// Daily minimum temperature
    Tmin,
}

impl Element {
    /// Parse a GHCN element code. Only `TMAX` and `TMIN` are recognised.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "TMAX" => Some(Element::Tmax),
            "TMIN" => Some(Element::Tmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Tmax => "TMAX",
            Element::Tmin => "TMIN",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's TMAX or TMIN reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub date: NaiveDate,
    pub element: Element,
    /// Tenths of a degree Celsius; `None` where the feed has no value.
    pub value_tenths: Option<i32>,
}

/// Average temperatures for one year, in degrees Celsius.
///
/// `winter_*` covers December of the previous year through February of
/// this one. A field is `None` when no reading contributed to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    pub spring_tmax: Option<f64>,
    pub spring_tmin: Option<f64>,
    pub summer_tmax: Option<f64>,
    pub summer_tmin: Option<f64>,
    pub fall_tmax: Option<f64>,
    pub fall_tmin: Option<f64>,
    pub winter_tmax: Option<f64>,
    pub winter_tmin: Option<f64>,
}
