//! Daily temperature observations for a single station.
//!
//! [`parse_daily_csv`] turns the per-station CSV into [`Observation`]s and
//! [`aggregate`] reduces them to one [`YearSummary`] per year.

mod aggregate;
mod parse;
mod types;

pub use aggregate::{Season, aggregate, season_of};
pub use parse::parse_daily_csv;
pub use types::{Element, Observation, YearSummary};
