//! View controllers: month, week, day and year.
//!
//! A controller holds only its anchor (and, for month and day, a selected
//! date). Everything it shows is recomputed from the grid builder and the
//! shared store on each `render()`, so rendering twice without an
//! intervening change gives identical output.

mod day;
mod month;
mod week;
mod year;

pub use day::{DayRender, DayView};
pub use month::{MonthRender, MonthView};
pub use week::{WeekDay, WeekRender, WeekView};
pub use year::{MonthPick, MonthTile, YearRender, YearView};

use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::date_key::DateKey;
use crate::grid::GridCell;
use crate::store::EventMap;
use crate::store::EventStore;

/// What every controller is handed by the composition root.
#[derive(Clone)]
pub struct ViewContext {
    pub store: EventStore,
    pub clock: Arc<dyn Clock>,
}

impl ViewContext {
    pub fn new(store: EventStore, clock: Arc<dyn Clock>) -> Self {
        ViewContext { store, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

/// Moving a view through time.
pub trait Navigate {
    /// The date that defines what the view shows.
    fn anchor(&self) -> NaiveDate;

    fn navigate_previous(&mut self);

    fn navigate_next(&mut self);

    fn jump_to_today(&mut self);
}

/// One day of a month grid as a view shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: DateKey,
    pub in_current_month: bool,
    pub has_events: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    fn project(
        cell: &GridCell,
        events: &EventMap,
        today: NaiveDate,
        selected: Option<NaiveDate>,
    ) -> Self {
        let key = DateKey::from(cell.date);
        DayCell {
            date: cell.date,
            has_events: events.has_events(&key),
            key,
            in_current_month: cell.in_current_month,
            is_today: cell.date == today,
            is_selected: selected == Some(cell.date),
        }
    }
}
