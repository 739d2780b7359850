// src/readings/mod.rs
//
// Report Builder input side: the two reading tables, typed.

pub mod convert;
pub mod group;
pub mod parse;
pub mod trend;

use chrono::NaiveDateTime;
use thiserror::Error;

pub use group::{EventGroup, group_by_event};
pub use parse::parse_readings;
pub use trend::{LinearFit, TrendLine};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no table with a {0:?} header")]
    TableNotFound(&'static str),

    #[error("{table} table has no {column:?} column")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("expected \"<number> <units>\", got {0:?}")]
    BadValue(String),

    #[error("timestamp {0:?} is not like \"Jan 02, 2017 7:05:00 AM\"")]
    BadTimestamp(String),

    #[error("{0} table has no readings")]
    NoReadings(&'static str),
}

/// One glucose row; `at` is the row key.
#[derive(Debug, Clone, PartialEq)]
pub struct GlucoseReading {
    pub at: NaiveDateTime,
    pub concentration: f64,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightReading {
    pub at: NaiveDateTime,
    pub weight: f64,
}

/// Both tables, rows in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings {
    pub glucose: Vec<GlucoseReading>,
    pub weight: Vec<WeightReading>,
}

impl Readings {
    /// Earliest and latest timestamp over both tables.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let times = self
            .glucose
            .iter()
            .map(|g| g.at)
            .chain(self.weight.iter().map(|w| w.at));
        times.fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }
}
