//! Month grids and week strips.
//!
//! Every month is laid out as 6 rows of 7 days. Column 0 is the configured
//! week start; the grid begins on the week-start day on or before the first
//! of the month and runs for 42 consecutive days.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::{GRID_CELLS, WEEK_DAYS};
use crate::date::{first_of_month, month_start};
use crate::error::{DaybookError, DaybookResult};

/// Which weekday is column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    #[serde(rename = "monday")]
    MondayFirst,
    #[serde(rename = "sunday")]
    SundayFirst,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::MondayFirst => Weekday::Mon,
            WeekStart::SundayFirst => Weekday::Sun,
        }
    }

    /// Column (0–6) that `weekday` occupies under this convention.
    pub fn column_of(self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_monday() + 7 - self.weekday().num_days_from_monday()) % 7
    }

    /// Short column headers, in column order.
    pub fn labels(self) -> [&'static str; WEEK_DAYS] {
        match self {
            WeekStart::MondayFirst => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
            WeekStart::SundayFirst => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

/// Grid for `year`-`month` (1-indexed).
pub fn build_month_grid(
    year: i32,
    month: u32,
    week_start: WeekStart,
) -> DaybookResult<[GridCell; GRID_CELLS]> {
    let first = first_of_month(year, month).ok_or(DaybookError::InvalidMonth { year, month })?;
    Ok(month_grid(first, week_start))
}

/// Grid for the month containing `date`.
pub fn month_grid(date: NaiveDate, week_start: WeekStart) -> [GridCell; GRID_CELLS] {
    let first = month_start(date);
    let offset = week_start.column_of(first.weekday());
    let grid_start = first - Days::new(u64::from(offset));

    std::array::from_fn(|i| {
        let date = grid_start + Days::new(i as u64);
        GridCell {
            date,
            in_current_month: date.year() == first.year() && date.month() == first.month(),
        }
    })
}

/// The seven days of the week containing `date`, starting at the week start.
pub fn build_week(date: NaiveDate, week_start: WeekStart) -> [NaiveDate; WEEK_DAYS] {
    let offset = week_start.column_of(date.weekday());
    let start = date - Days::new(u64::from(offset));

    std::array::from_fn(|i| start + Days::new(i as u64))
}
