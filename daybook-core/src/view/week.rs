use chrono::NaiveDate;

use crate::constants::WEEK_DAYS;
use crate::date::{add_days, is_supported};
use crate::date_key::DateKey;
use crate::event::{Event, EventId};
use crate::grid::{WeekStart, build_week};
use crate::view::{Navigate, ViewContext};

/// Seven days around the anchor. The anchor day is the one events are added
/// to and deleted from; navigation moves it by a whole week.
pub struct WeekView {
    ctx: ViewContext,
    week_start: WeekStart,
    anchor: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub key: DateKey,
    pub has_events: bool,
    pub is_today: bool,
    pub is_anchor: bool,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRender {
    pub labels: [&'static str; WEEK_DAYS],
    pub days: Vec<WeekDay>,
}

impl WeekRender {
    pub fn first(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }
}

impl WeekView {
    pub fn new(ctx: ViewContext, week_start: WeekStart) -> Self {
        let anchor = ctx.today();
        WeekView {
            ctx,
            week_start,
            anchor,
        }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Show the week containing `date`, anchored on `date`. Dates outside
    /// the supported range are ignored.
    pub fn open_at(&mut self, date: NaiveDate) -> bool {
        if !is_supported(date) {
            return false;
        }
        self.anchor = date;
        true
    }

    pub async fn request_add_event(&self, title: &str) -> Option<Event> {
        self.ctx.store.add(&DateKey::from(self.anchor), title).await
    }

    pub async fn request_delete_event(&self, id: &EventId) -> bool {
        self.ctx.store.remove(&DateKey::from(self.anchor), id).await
    }

    pub fn render(&self) -> WeekRender {
        let events = self.ctx.store.snapshot();
        let today = self.ctx.today();

        let days = build_week(self.anchor, self.week_start)
            .into_iter()
            .map(|date| {
                let key = DateKey::from(date);
                let day_events = events.get(&key).to_vec();
                WeekDay {
                    date,
                    key,
                    has_events: !day_events.is_empty(),
                    is_today: date == today,
                    is_anchor: date == self.anchor,
                    events: day_events,
                }
            })
            .collect();

        WeekRender {
            labels: self.week_start.labels(),
            days,
        }
    }
}

impl Navigate for WeekView {
    fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    fn navigate_previous(&mut self) {
        self.anchor = add_days(self.anchor, -(WEEK_DAYS as i64));
    }

    fn navigate_next(&mut self) {
        self.anchor = add_days(self.anchor, WEEK_DAYS as i64);
    }

    fn jump_to_today(&mut self) {
        self.anchor = self.ctx.today();
    }
}
