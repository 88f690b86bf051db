use chrono::{Datelike, NaiveDate};

use crate::constants::WEEK_DAYS;
use crate::date::{add_years, first_of_month, month_start};
use crate::grid::{WeekStart, month_grid};
use crate::view::{DayCell, Navigate, ViewContext};

/// Twelve small month grids. Nothing is selectable; picking a month hands
/// it to the navigation layer to open in the month view.
pub struct YearView {
    ctx: ViewContext,
    week_start: WeekStart,
    anchor: NaiveDate,
}

/// A month chosen from the year view (month is 1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPick {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTile {
    pub month: u32,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRender {
    pub year: i32,
    pub labels: [&'static str; WEEK_DAYS],
    pub months: Vec<MonthTile>,
}

impl YearView {
    pub fn new(ctx: ViewContext, week_start: WeekStart) -> Self {
        let anchor = month_start(ctx.today());
        YearView {
            ctx,
            week_start,
            anchor,
        }
    }

    pub fn year(&self) -> i32 {
        self.anchor.year()
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Show `year`. Years outside the supported range are ignored.
    pub fn show_year(&mut self, year: i32) {
        if let Some(first) = first_of_month(year, self.anchor.month()) {
            self.anchor = first;
        }
    }

    /// `month` (1–12) of the displayed year, or `None` if out of range.
    pub fn pick_month(&self, month: u32) -> Option<MonthPick> {
        first_of_month(self.year(), month).map(|_| MonthPick {
            year: self.year(),
            month,
        })
    }

    pub fn render(&self) -> YearRender {
        let events = self.ctx.store.snapshot();
        let today = self.ctx.today();
        let year = self.year();

        let months = (1..=12)
            .filter_map(|month| first_of_month(year, month))
            .map(|first| MonthTile {
                month: first.month(),
                cells: month_grid(first, self.week_start)
                    .iter()
                    .map(|cell| DayCell::project(cell, &events, today, None))
                    .collect(),
            })
            .collect();

        YearRender {
            year,
            labels: self.week_start.labels(),
            months,
        }
    }
}

impl Navigate for YearView {
    fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    fn navigate_previous(&mut self) {
        self.anchor = add_years(self.anchor, -1);
    }

    fn navigate_next(&mut self) {
        self.anchor = add_years(self.anchor, 1);
    }

    fn jump_to_today(&mut self) {
        self.anchor = month_start(self.ctx.today());
    }
}
