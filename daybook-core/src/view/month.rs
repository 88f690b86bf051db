use chrono::{Datelike, NaiveDate};

use crate::constants::WEEK_DAYS;
use crate::date::{add_months, first_of_month, is_supported, month_start};
use crate::date_key::DateKey;
use crate::event::{Event, EventId};
use crate::grid::{WeekStart, month_grid};
use crate::view::{DayCell, MonthPick, Navigate, ViewContext};

/// A month grid with a selected day and its event list.
///
/// The anchor is always the first of the displayed month. The selection may
/// lie outside the displayed month (after navigating away from it); adds and
/// deletes always target the selection.
pub struct MonthView {
    ctx: ViewContext,
    week_start: WeekStart,
    anchor: NaiveDate,
    selected: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRender {
    pub year: i32,
    pub month: u32,
    pub labels: [&'static str; WEEK_DAYS],
    pub cells: Vec<DayCell>,
    pub selected: NaiveDate,
    pub selected_key: DateKey,
    pub selected_events: Vec<Event>,
}

impl MonthView {
    pub fn new(ctx: ViewContext, week_start: WeekStart) -> Self {
        let today = ctx.today();
        MonthView {
            ctx,
            week_start,
            anchor: month_start(today),
            selected: today,
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Select a day. The displayed month does not change. Dates outside the
    /// supported range are ignored; returns whether the selection moved.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if !is_supported(date) {
            return false;
        }
        self.selected = date;
        true
    }

    /// Show the month containing `date`, with `date` selected. Dates outside
    /// the supported range are ignored.
    pub fn open_at(&mut self, date: NaiveDate) -> bool {
        if !is_supported(date) {
            return false;
        }
        self.anchor = month_start(date);
        self.selected = date;
        true
    }

    /// Show a month picked from the year view, selecting its first day.
    pub fn show_month(&mut self, pick: MonthPick) {
        if let Some(first) = first_of_month(pick.year, pick.month) {
            self.anchor = first;
            self.selected = first;
        }
    }

    pub async fn request_add_event(&self, title: &str) -> Option<Event> {
        self.ctx.store.add(&DateKey::from(self.selected), title).await
    }

    pub async fn request_delete_event(&self, id: &EventId) -> bool {
        self.ctx.store.remove(&DateKey::from(self.selected), id).await
    }

    pub fn render(&self) -> MonthRender {
        let events = self.ctx.store.snapshot();
        let today = self.ctx.today();
        let selected_key = DateKey::from(self.selected);

        let cells = month_grid(self.anchor, self.week_start)
            .iter()
            .map(|cell| DayCell::project(cell, &events, today, Some(self.selected)))
            .collect();

        MonthRender {
            year: self.anchor.year(),
            month: self.anchor.month(),
            labels: self.week_start.labels(),
            cells,
            selected: self.selected,
            selected_events: events.get(&selected_key).to_vec(),
            selected_key,
        }
    }
}

impl Navigate for MonthView {
    fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    fn navigate_previous(&mut self) {
        self.anchor = add_months(self.anchor, -1);
    }

    fn navigate_next(&mut self) {
        self.anchor = add_months(self.anchor, 1);
    }

    fn jump_to_today(&mut self) {
        let today = self.ctx.today();
        self.open_at(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::clock::FixedClock;
    use crate::date_key::decode;
    use crate::store::{EventStore, MemoryBlobStore};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context(today: NaiveDate) -> (ViewContext, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(today));
        let store = EventStore::new(Arc::new(MemoryBlobStore::new()));
        (ViewContext::new(store, clock.clone()), clock)
    }

    #[test]
    fn starts_on_todays_month_with_today_selected() {
        let (ctx, _) = context(ymd(2024, 2, 14));
        let view = MonthView::new(ctx, WeekStart::MondayFirst);

        assert_eq!(view.anchor(), ymd(2024, 2, 1));
        assert_eq!(view.selected(), ymd(2024, 2, 14));

        let render = view.render();
        assert_eq!((render.year, render.month), (2024, 2));
        assert_eq!(render.cells.len(), 42);
        assert_eq!(render.cells[0].date, ymd(2024, 1, 29));
        assert_eq!(render.labels[0], "Mo");

        let marked: Vec<_> = render.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].is_selected);
    }

    #[test]
    fn navigating_back_from_the_31st_lands_on_december_first() {
        let (ctx, _) = context(ymd(2024, 1, 31));
        let mut view = MonthView::new(ctx, WeekStart::MondayFirst);

        view.navigate_previous();
        assert_eq!(view.anchor(), ymd(2023, 12, 1));
        assert_eq!(view.render().month, 12);

        view.navigate_next();
        view.navigate_next();
        assert_eq!(view.anchor(), ymd(2024, 2, 1));
    }

    #[test]
    fn navigation_keeps_the_selection() {
        let (ctx, _) = context(ymd(2024, 3, 15));
        let mut view = MonthView::new(ctx, WeekStart::MondayFirst);

        view.navigate_next();
        assert_eq!(view.selected(), ymd(2024, 3, 15));
        assert!(view.render().cells.iter().all(|c| !c.is_selected));
    }

    #[test]
    fn ignores_dates_outside_the_supported_range() {
        let (ctx, _) = context(ymd(2024, 3, 15));
        let mut view = MonthView::new(ctx, WeekStart::MondayFirst);

        assert!(!view.open_at(ymd(9999, 12, 31)));
        assert!(!view.open_at(NaiveDate::MAX));
        assert!(!view.select_date(NaiveDate::MIN));
        assert_eq!(view.anchor(), ymd(2024, 3, 1));
        assert_eq!(view.selected(), ymd(2024, 3, 15));

        // The last supported month still renders only fixed-width keys
        assert!(view.open_at(ymd(9998, 12, 31)));
        let render = view.render();
        assert_eq!(render.cells[41].key.as_str(), "9999-01-10");
        for cell in &render.cells {
            assert_eq!(cell.key.as_str().len(), 10);
            assert_eq!(decode(cell.key.as_str()).unwrap(), cell.date);
        }

        view.navigate_next();
        assert_eq!(view.anchor(), ymd(9998, 12, 1));
    }

    #[test]
    fn select_does_not_move_the_anchor() {
        let (ctx, _) = context(ymd(2024, 3, 15));
        let mut view = MonthView::new(ctx, WeekStart::MondayFirst);

        view.select_date(ymd(2024, 4, 2));
        assert_eq!(view.anchor(), ymd(2024, 3, 1));

        let render = view.render();
        let selected: Vec<_> = render.cells.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert!(!selected[0].in_current_month);
    }

    #[test]
    fn jump_to_today_reads_the_clock_at_call_time() {
        let (ctx, clock) = context(ymd(2024, 3, 15));
        let mut view = MonthView::new(ctx, WeekStart::MondayFirst);
        view.navigate_previous();
        view.select_date(ymd(2024, 2, 3));

        clock.set(ymd(2024, 6, 9));
        view.jump_to_today();

        assert_eq!(view.anchor(), ymd(2024, 6, 1));
        assert_eq!(view.selected(), ymd(2024, 6, 9));
    }

    #[test]
    fn show_month_opens_a_picked_month() {
        let (ctx, _) = context(ymd(2024, 3, 15));
        let mut view = MonthView::new(ctx, WeekStart::MondayFirst);

        view.show_month(MonthPick { year: 2025, month: 11 });
        assert_eq!(view.anchor(), ymd(2025, 11, 1));
        assert_eq!(view.selected(), ymd(2025, 11, 1));

        view.show_month(MonthPick { year: 2025, month: 13 });
        assert_eq!(view.anchor(), ymd(2025, 11, 1));
    }

    #[tokio::test]
    async fn add_and_delete_target_the_selected_day() {
        let (ctx, _) = context(ymd(2024, 3, 1));
        let mut view = MonthView::new(ctx, WeekStart::MondayFirst);
        view.select_date(ymd(2024, 3, 15));

        let dentist = view.request_add_event("Dentist").await.unwrap();
        view.request_add_event("Lunch").await.unwrap();
        assert!(view.request_add_event(" ").await.is_none());

        let render = view.render();
        assert_eq!(render.selected_key.as_str(), "2024-03-15");
        let titles: Vec<_> = render.selected_events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Dentist", "Lunch"]);

        let marked: Vec<_> = render.cells.iter().filter(|c| c.has_events).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].date, ymd(2024, 3, 15));

        assert!(view.request_delete_event(&dentist.id).await);
        assert_eq!(view.render().selected_events.len(), 1);
    }

    #[tokio::test]
    async fn render_is_idempotent() {
        let (ctx, _) = context(ymd(2024, 3, 15));
        let view = MonthView::new(ctx, WeekStart::SundayFirst);
        view.request_add_event("Dentist").await.unwrap();

        assert_eq!(view.render(), view.render());
    }
}
