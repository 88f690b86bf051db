use chrono::NaiveDate;

use crate::date::{add_days, is_supported};
use crate::date_key::DateKey;
use crate::event::{Event, EventId};
use crate::view::{Navigate, ViewContext};

/// A single day and its events. The displayed day is also the selection.
pub struct DayView {
    ctx: ViewContext,
    date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRender {
    pub date: NaiveDate,
    pub key: DateKey,
    pub is_today: bool,
    pub events: Vec<Event>,
}

impl DayView {
    pub fn new(ctx: ViewContext) -> Self {
        let date = ctx.today();
        DayView { ctx, date }
    }

    /// Show `date`. Dates outside the supported range are ignored.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if !is_supported(date) {
            return false;
        }
        self.date = date;
        true
    }

    pub async fn request_add_event(&self, title: &str) -> Option<Event> {
        self.ctx.store.add(&DateKey::from(self.date), title).await
    }

    pub async fn request_delete_event(&self, id: &EventId) -> bool {
        self.ctx.store.remove(&DateKey::from(self.date), id).await
    }

    pub fn render(&self) -> DayRender {
        let key = DateKey::from(self.date);
        DayRender {
            date: self.date,
            is_today: self.date == self.ctx.today(),
            events: self.ctx.store.get(&key),
            key,
        }
    }
}

impl Navigate for DayView {
    fn anchor(&self) -> NaiveDate {
        self.date
    }

    fn navigate_previous(&mut self) {
        self.date = add_days(self.date, -1);
    }

    fn navigate_next(&mut self) {
        self.date = add_days(self.date, 1);
    }

    fn jump_to_today(&mut self) {
        self.date = self.ctx.today();
    }
}
