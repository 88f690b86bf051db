//! Composition root: one store, one clock, any number of views.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::clock::{Clock, SystemClock};
use crate::daybook_config::DaybookConfig;
use crate::store::{BlobStore, EventStore, FileBlobStore};
use crate::view::{DayView, MonthView, ViewContext, WeekView, YearView};

/// Owns the process's only [`EventStore`] and hands every view a handle to
/// it. Views built from the same `Daybook` always agree on the events.
pub struct Daybook {
    ctx: ViewContext,
    config: DaybookConfig,
}

impl Daybook {
    /// Open the file-backed store in the configured data directory.
    pub async fn open(config: DaybookConfig) -> Self {
        let backend = Arc::new(FileBlobStore::new(config.data_path()));
        tracing::debug!("Opening daybook in {}", backend.dir().display());

        Self::with_backend(backend, Arc::new(SystemClock), config).await
    }

    pub async fn with_backend(
        backend: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        config: DaybookConfig,
    ) -> Self {
        let store = EventStore::open(backend).await;
        Daybook {
            ctx: ViewContext::new(store, clock),
            config,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.ctx.store
    }

    pub fn config(&self) -> &DaybookConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.ctx.today()
    }

    pub fn month_view(&self) -> MonthView {
        MonthView::new(self.ctx.clone(), self.config.month_week_start)
    }

    pub fn week_view(&self) -> WeekView {
        WeekView::new(self.ctx.clone(), self.config.month_week_start)
    }

    pub fn day_view(&self) -> DayView {
        DayView::new(self.ctx.clone())
    }

    pub fn year_view(&self) -> YearView {
        YearView::new(self.ctx.clone(), self.config.year_week_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::constants::STORAGE_KEY;
    use crate::date_key::DateKey;
    use crate::grid::WeekStart;
    use crate::store::MemoryBlobStore;
    use crate::view::Navigate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn daybook(backend: Arc<MemoryBlobStore>, today: NaiveDate) -> Daybook {
        Daybook::with_backend(
            backend,
            Arc::new(FixedClock::new(today)),
            DaybookConfig::default(),
        )
        .await
    }

    #[tokio::test]
    async fn views_share_one_store() {
        let backend = Arc::new(MemoryBlobStore::new());
        let daybook = daybook(backend.clone(), ymd(2024, 3, 15)).await;

        let month = daybook.month_view();
        let year = daybook.year_view();
        let day = daybook.day_view();

        let event = month.request_add_event("Dentist").await.unwrap();

        let key = DateKey::from(ymd(2024, 3, 15));
        assert_eq!(day.render().events, [event.clone()]);
        let march = &year.render().months[2];
        assert!(march.cells.iter().any(|c| c.key == key && c.has_events));

        assert!(day.request_delete_event(&event.id).await);
        assert!(month.render().selected_events.is_empty());
    }

    #[tokio::test]
    async fn adds_from_two_views_both_survive_a_restart() {
        let backend = Arc::new(MemoryBlobStore::new());
        let today = ymd(2024, 3, 15);

        {
            let daybook = daybook(backend.clone(), today).await;
            let month = daybook.month_view();
            let mut day = daybook.day_view();

            month.request_add_event("Dentist").await.unwrap();
            day.navigate_next();
            day.request_add_event("Lunch").await.unwrap();
            // A write triggered from the other view must carry both events
            month.request_add_event("Call mum").await.unwrap();
        }

        let reopened = daybook(backend.clone(), today).await;
        let snapshot = reopened.store().snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get(&DateKey::from(ymd(2024, 3, 16))).len(), 1);
        assert!(backend.value(STORAGE_KEY).is_some());
    }

    #[tokio::test]
    async fn views_use_configured_week_starts() {
        let backend = Arc::new(MemoryBlobStore::new());
        let daybook = daybook(backend, ymd(2024, 2, 10)).await;

        assert_eq!(daybook.month_view().week_start(), WeekStart::MondayFirst);
        assert_eq!(daybook.week_view().week_start(), WeekStart::MondayFirst);
        assert_eq!(daybook.year_view().week_start(), WeekStart::SundayFirst);
        assert_eq!(daybook.month_view().render().cells[0].date, ymd(2024, 1, 29));
        assert_eq!(daybook.year_view().render().months[1].cells[0].date, ymd(2024, 1, 28));
    }

    #[tokio::test]
    async fn year_pick_opens_the_month_view() {
        let backend = Arc::new(MemoryBlobStore::new());
        let daybook = daybook(backend, ymd(2024, 3, 15)).await;

        let mut year = daybook.year_view();
        let mut month = daybook.month_view();
        year.navigate_next();

        let pick = year.pick_month(9).unwrap();
        month.show_month(pick);

        let render = month.render();
        assert_eq!((render.year, render.month), (2025, 9));
    }
}
