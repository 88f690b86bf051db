//! Canonical `YYYY-MM-DD` storage keys.
//!
//! A key is built from a date's local year, month and day only. Keys are
//! fixed-width for years 0000–9999, so comparing two keys as strings gives
//! the same answer as comparing the dates.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};

const KEY_LEN: usize = 10;

/// Storage key for one calendar date.
///
/// Ordering is by the key string, which matches chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey {
    key: String,
    date: NaiveDate,
}

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The date this key was built from.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Build the key for `date`.
pub fn encode(date: NaiveDate) -> DateKey {
    DateKey {
        key: format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
        date,
    }
}

/// Parse a key back into its date.
///
/// Only the exact fixed-width form is accepted: `2024-3-5` or `2024-03-05T00`
/// are rejected, as are impossible dates such as `2023-02-29`.
pub fn decode(key: &str) -> DaybookResult<NaiveDate> {
    let malformed = || DaybookError::MalformedKey(key.to_string());
    let bytes = key.as_bytes();

    if bytes.len() != KEY_LEN || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(malformed());
    }

    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4 && *i != 7)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_ok {
        return Err(malformed());
    }

    let year: i32 = key[0..4].parse().map_err(|_| malformed())?;
    let month: u32 = key[5..7].parse().map_err(|_| malformed())?;
    let day: u32 = key[8..10].parse().map_err(|_| malformed())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        encode(date)
    }
}

impl From<&NaiveDate> for DateKey {
    fn from(date: &NaiveDate) -> Self {
        encode(*date)
    }
}

impl FromStr for DateKey {
    type Err = DaybookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s).map(encode)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DaybookError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let date = decode(&s)?;
        Ok(DateKey { key: s, date })
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.key
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.key)
    }
}
