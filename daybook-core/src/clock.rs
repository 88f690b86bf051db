//! Source of "today" for the views.

use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// The local wall-clock date at the time of the call.
    fn today(&self) -> NaiveDate;
}

/// Reads the system's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock that reports a settable date. Used by tests and embedders that
/// drive "today" themselves.
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        FixedClock {
            today: RwLock::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.write().unwrap_or_else(PoisonError::into_inner) = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.read().unwrap_or_else(PoisonError::into_inner)
    }
}
