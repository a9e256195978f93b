//! Yearly and seasonal temperature averages.
//!
//! Two calendar rules matter here:
//!
//! * **Winter rollover.** Winter runs December to February and belongs to the
//!   year its February falls in, so a December reading counts towards the
//!   *next* year's winter. The yearly averages still use the calendar year.
//! * **Final-year drop.** The most recent year in the result is removed, since
//!   the feed's last year is normally incomplete. This includes a year that
//!   only exists because December rolled over into it.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::types::{Element, Observation, YearSummary};

/// Meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }
}

/// The season a date falls in, and the year that season is attributed to.
///
/// ```
/// use chrono::NaiveDate;
/// use ghcn_server::observations::{Season, season_of};
///
/// let dec = NaiveDate::from_ymd_opt(2019, 12, 24).unwrap();
/// assert_eq!(season_of(dec), (Season::Winter, 2020));
///
/// let feb = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
/// assert_eq!(season_of(feb), (Season::Winter, 2020));
/// ```
pub fn season_of(date: NaiveDate) -> (Season, i32) {
    let year = date.year();
    match date.month() {
        3..=5 => (Season::Spring, year),
        6..=8 => (Season::Summer, year),
        9..=11 => (Season::Fall, year),
        12 => (Season::Winter, year + 1),
        _ => (Season::Winter, year),
    }
}

/// Running mean of readings in tenths of a degree.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: i64,
    count: u32,
}

impl Mean {
    fn add(&mut self, tenths: i32) {
        self.sum += i64::from(tenths);
        self.count += 1;
    }

    /// Mean in degrees Celsius, one decimal place.
    fn celsius(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let mean_tenths = self.sum as f64 / f64::from(self.count);
        Some(round_one_decimal(mean_tenths / 10.0))
    }
}

/// Round to one decimal place, ties to even.
///
/// The comparison against the midpoint uses the exact binary value of `x`,
/// so `1.15` (stored just below 1.15) rounds to `1.1`, while `1.25` (stored
/// exactly) is a true tie and rounds to `1.2`.
fn round_one_decimal(x: f64) -> f64 {
    let lower = (x * 10.0).floor();
    // Single rounding, so the sign of `x * 10 - (lower + 0.5)` is exact.
    let above_mid = x.mul_add(10.0, -(lower + 0.5));

    let tenths = if above_mid > 0.0 {
        lower + 1.0
    } else if above_mid < 0.0 || lower % 2.0 == 0.0 {
        lower
    } else {
        lower + 1.0
    };
    tenths / 10.0
}

#[derive(Debug, Clone, Copy, Default)]
struct MinMax {
    tmax: Mean,
    tmin: Mean,
}

impl MinMax {
    fn add(&mut self, element: Element, tenths: i32) {
        match element {
            Element::Tmax => self.tmax.add(tenths),
            Element::Tmin => self.tmin.add(tenths),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct YearBucket {
    annual: MinMax,
    seasons: [MinMax; 4],
}

impl YearBucket {
    fn summary(&self, year: i32) -> YearSummary {
        let season = |s: Season| &self.seasons[s.index()];
        YearSummary {
            year,
            tmax: self.annual.tmax.celsius(),
            tmin: self.annual.tmin.celsius(),
            spring_tmax: season(Season::Spring).tmax.celsius(),
            spring_tmin: season(Season::Spring).tmin.celsius(),
            summer_tmax: season(Season::Summer).tmax.celsius(),
            summer_tmin: season(Season::Summer).tmin.celsius(),
            fall_tmax: season(Season::Fall).tmax.celsius(),
            fall_tmin: season(Season::Fall).tmin.celsius(),
            winter_tmax: season(Season::Winter).tmax.celsius(),
            winter_tmin: season(Season::Winter).tmin.celsius(),
        }
    }
}

/// Average daily TMAX/TMIN per year and per season, ascending by year.
///
/// Readings without a value are ignored. A year or season with no readings
/// reports `None`. The most recent year is dropped from the result (see the
/// module docs); input with no usable readings yields an empty result.
pub fn aggregate(observations: &[Observation]) -> Vec<YearSummary> {
    let mut years: BTreeMap<i32, YearBucket> = BTreeMap::new();

    for obs in observations {
        let Some(tenths) = obs.value_tenths else {
            continue;
        };

        years
            .entry(obs.date.year())
            .or_default()
            .annual
            .add(obs.element, tenths);

        let (season, season_year) = season_of(obs.date);
        years.entry(season_year).or_default().seasons[season.index()].add(obs.element, tenths);
    }

    let mut summaries: Vec<YearSummary> = years
        .iter()
        .map(|(&year, bucket)| bucket.summary(year))
        .collect();

    summaries.pop();
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(y: i32, m: u32, d: u32, element: Element, tenths: i32) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            element,
            value_tenths: Some(tenths),
        }
    }

    fn tmax(y: i32, m: u32, tenths: i32) -> Observation {
        obs(y, m, 15, Element::Tmax, tenths)
    }

    fn tmin(y: i32, m: u32, tenths: i32) -> Observation {
        obs(y, m, 15, Element::Tmin, tenths)
    }

    #[test]
    fn season_boundaries() {
        let season = |m| season_of(NaiveDate::from_ymd_opt(2020, m, 1).unwrap());
        assert_eq!(season(1), (Season::Winter, 2020));
        assert_eq!(season(2), (Season::Winter, 2020));
        assert_eq!(season(3), (Season::Spring, 2020));
        assert_eq!(season(5), (Season::Spring, 2020));
        assert_eq!(season(6), (Season::Summer, 2020));
        assert_eq!(season(8), (Season::Summer, 2020));
        assert_eq!(season(9), (Season::Fall, 2020));
        assert_eq!(season(11), (Season::Fall, 2020));
        assert_eq!(season(12), (Season::Winter, 2021));
    }

    #[test]
    fn december_counts_towards_next_winter_only() {
        let input = [
            tmax(2019, 12, 10),
            tmax(2020, 1, 20),
            tmax(2020, 6, 200),
            tmax(2021, 3, 0),
        ];
        let result = aggregate(&input);
        let years: Vec<_> = result.iter().map(|s| s.year).collect();
        assert_eq!(years, [2019, 2020]);

        let y2019 = &result[0];
        assert_eq!(y2019.tmax, Some(1.0));
        assert_eq!(y2019.winter_tmax, None);

        let y2020 = &result[1];
        assert_eq!(y2020.tmax, Some(11.0));
        assert_eq!(y2020.winter_tmax, Some(1.5));
        assert_eq!(y2020.summer_tmax, Some(20.0));
    }

    #[test]
    fn full_year_then_partial_year() {
        let input = [
            tmax(2018, 1, 10),
            tmin(2018, 1, -30),
            tmax(2018, 4, 150),
            tmin(2018, 4, 50),
            tmax(2018, 7, 250),
            tmin(2018, 7, 140),
            tmax(2018, 10, 140),
            tmin(2018, 10, 60),
            tmax(2019, 1, 30),
            tmin(2019, 2, -10),
        ];
        let result = aggregate(&input);
        assert_eq!(result.len(), 1);

        let s = &result[0];
        assert_eq!(s.year, 2018);
        assert_eq!(s.tmax, Some(13.8));
        assert_eq!(s.tmin, Some(5.5));
        assert_eq!(s.winter_tmax, Some(1.0));
        assert_eq!(s.winter_tmin, Some(-3.0));
        assert_eq!(s.spring_tmax, Some(15.0));
        assert_eq!(s.spring_tmin, Some(5.0));
        assert_eq!(s.summer_tmax, Some(25.0));
        assert_eq!(s.summer_tmin, Some(14.0));
        assert_eq!(s.fall_tmax, Some(14.0));
        assert_eq!(s.fall_tmin, Some(6.0));
    }

    #[test]
    fn rollover_year_is_the_one_dropped() {
        // December of the last explicit year creates a winter-only bucket for
        // the year after; that bucket is the one removed.
        let input = [tmax(2018, 6, 200), tmax(2019, 6, 220), tmax(2019, 12, 30)];
        let result = aggregate(&input);
        let years: Vec<_> = result.iter().map(|s| s.year).collect();
        assert_eq!(years, [2018, 2019]);

        // The December reading still counts in its own calendar year.
        assert_eq!(result[1].tmax, Some(12.5));
        assert_eq!(result[1].winter_tmax, None);
    }

    #[test]
    fn tmax_only_year_has_no_tmin() {
        let input = [tmax(2020, 4, 100), tmax(2020, 8, 200), tmax(2021, 1, 0)];
        let result = aggregate(&input);
        assert_eq!(result.len(), 1);

        let s = &result[0];
        assert_eq!(s.tmax, Some(15.0));
        assert_eq!(s.tmin, None);
        assert_eq!(s.spring_tmin, None);
        assert_eq!(s.summer_tmin, None);
        assert_eq!(s.fall_tmax, None);
        assert_eq!(s.winter_tmax, None);
    }

    #[test]
    fn missing_values_are_ignored() {
        let mut na = tmax(2022, 5, 0);
        na.value_tenths = None;

        let input = [tmax(2020, 5, 100), na, tmax(2021, 5, 100)];
        let result = aggregate(&input);
        // 2022 never gets a bucket, so 2021 is the dropped year.
        let years: Vec<_> = result.iter().map(|s| s.year).collect();
        assert_eq!(years, [2020]);
    }

    #[test]
    fn empty_and_single_year() {
        assert!(aggregate(&[]).is_empty());
        assert!(aggregate(&[tmax(2020, 5, 100)]).is_empty());

        let mut na = tmax(2020, 5, 0);
        na.value_tenths = None;
        assert!(aggregate(&[na]).is_empty());
    }

    #[test]
    fn averages_round_to_one_decimal() {
        // Mean 12.5 tenths: 1.25 is an exact tie, rounds to even.
        let input = [tmax(2020, 5, 12), tmax(2020, 5, 13), tmax(2021, 1, 0)];
        assert_eq!(aggregate(&input)[0].tmax, Some(1.2));

        // Mean 11.5 tenths: 1.15 is stored just below the midpoint.
        let input = [tmax(2020, 5, 11), tmax(2020, 5, 12), tmax(2021, 1, 0)];
        assert_eq!(aggregate(&input)[0].tmax, Some(1.1));

        // Mean 13.5 tenths: 1.35 is stored just above the midpoint.
        let input = [tmax(2020, 5, 13), tmax(2020, 5, 14), tmax(2021, 1, 0)];
        assert_eq!(aggregate(&input)[0].tmax, Some(1.4));

        // Mean of 1, 1, 2 tenths.
        let input = [
            tmin(2020, 5, 1),
            tmin(2020, 5, 1),
            tmin(2020, 5, 2),
            tmin(2021, 1, 0),
        ];
        assert_eq!(aggregate(&input)[0].tmin, Some(0.1));
    }

    #[test]
    fn rounding_of_negative_values() {
        assert_eq!(round_one_decimal(-1.25), -1.2);
        assert_eq!(round_one_decimal(-0.04), 0.0);
        assert_eq!(round_one_decimal(-12.36), -12.4);
        assert_eq!(round_one_decimal(7.0), 7.0);
    }
}
