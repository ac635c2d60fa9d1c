//! Calendar periods (month + year) and the `year * 100 + month` range encoding
//! shared by every "records between two periods" query.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

use crate::core::error::AppError;
use crate::shared::constants::{MAX_YEAR, MIN_YEAR};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(i32),

    #[error("Year must be between 1970 and 9999, got {0}")]
    InvalidYear(i32),

    #[error("Invalid period '{0}', expected YYYY-MM")]
    Malformed(String),

    #[error("Both starting and ending periods are required")]
    MissingBound,
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// A calendar month. Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub struct Period {
    pub year: i32,
    pub month: i32,
}

impl Period {
    pub fn new(month: i32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month() as i32,
        }
    }

    /// The month before this one; January wraps to December of the prior year.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Comparable integer encoding, e.g. June 2024 -> 202406
    pub fn key(self) -> i32 {
        self.year * 100 + self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PeriodError::Malformed(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) || month.len() > 2 || !all_digits(month) {
            return Err(malformed());
        }

        let year = year.parse::<i32>().map_err(|_| malformed())?;
        let month = month.parse::<i32>().map_err(|_| malformed())?;
        Period::new(month, year)
    }
}

/// Inclusive range of encoded periods `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    pub start: i32,
    pub end: i32,
}

impl PeriodRange {
    pub fn new(start: Period, end: Period) -> Self {
        Self {
            start: start.key(),
            end: end.key(),
        }
    }

    /// Build a range from the raw `starting`/`ending` query strings.
    pub fn from_bounds(starting: Option<&str>, ending: Option<&str>) -> Result<Self, PeriodError> {
        match (starting, ending) {
            (Some(starting), Some(ending)) => Ok(Self::new(starting.parse()?, ending.parse()?)),
            _ => Err(PeriodError::MissingBound),
        }
    }
}

/// `?starting=YYYY-MM&ending=YYYY-MM`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// First period, inclusive (YYYY-MM)
    pub starting: Option<String>,
    /// Last period, inclusive (YYYY-MM)
    pub ending: Option<String>,
}

impl RangeQuery {
    pub fn range(&self) -> Result<PeriodRange, PeriodError> {
        PeriodRange::from_bounds(self.starting.as_deref(), self.ending.as_deref())
    }
}

/// `?month=&year=`, both defaulting to the current month
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MonthYearQuery {
    /// Month 1-12 (default: current month)
    pub month: Option<i32>,
    /// Four digit year (default: current year)
    pub year: Option<i32>,
}

impl MonthYearQuery {
    pub fn period(&self) -> Result<Period, PeriodError> {
        let current = Period::current();
        Period::new(
            self.month.unwrap_or(current.month),
            self.year.unwrap_or(current.year),
        )
    }
}

/// `?year=`, defaulting to the current year
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Four digit year (default: current year)
    pub year: Option<i32>,
}

impl YearQuery {
    pub fn year(&self) -> Result<i32, PeriodError> {
        let year = self.year.unwrap_or_else(|| Period::current().year);
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(year)
    }
}
