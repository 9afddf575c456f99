//! Period - calendar month partition key for all counters
//!
//! Canonical textual form is `YYYY-MM` (four-digit year, zero-padded month).
//! Ordering follows calendar time because fields compare year first.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::DomainError;

/// A calendar month of a calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: u16,
    month: u8,
}

impl Period {
    pub const MIN_YEAR: u16 = 1;
    pub const MAX_YEAR: u16 = 9999;

    /// Create a period, validating year and month ranges
    pub fn new(year: u16, month: u8) -> Result<Self, DomainError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(DomainError::InvalidPeriod(format!(
                "year {year} out of range"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidPeriod(format!(
                "month {month} out of range"
            )));
        }
        Ok(Self { year, month })
    }

    /// The UTC calendar month containing `instant`
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        let year = instant
            .year()
            .clamp(i32::from(Self::MIN_YEAR), i32::from(Self::MAX_YEAR)) as u16;
        Self {
            year,
            month: instant.month() as u8,
        }
    }

    /// Parse the canonical `YYYY-MM` form. No other layout is accepted.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidPeriod(format!("expected YYYY-MM, got {s:?}"));

        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year = year.parse::<u16>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// The following month, or `None` past year 9999
    pub fn succ(&self) -> Option<Self> {
        if self.month == 12 {
            (self.year < Self::MAX_YEAR).then(|| Self {
                year: self.year + 1,
                month: 1,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    /// The preceding month, or `None` before year 1
    pub fn pred(&self) -> Option<Self> {
        if self.month == 1 {
            (self.year > Self::MIN_YEAR).then(|| Self {
                year: self.year - 1,
                month: 12,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month - 1,
            })
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), 1)
    }

    /// Human readable form, e.g. "March 2024"
    pub fn long_name(&self) -> String {
        self.first_day()
            .map_or_else(|| self.to_string(), |d| d.format("%B %Y").to_string())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Period::parse(&raw).map_err(serde::de::Error::custom)
    }
}
