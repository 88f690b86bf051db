//! Core of daybook: a date-keyed event store and calendar grid engine.
//!
//! This crate provides everything the front ends share:
//! - `date_key` and `date` for canonical storage keys and calendar arithmetic
//! - `grid` for the fixed 42-cell month grid and week strips
//! - `store` for the one shared, write-through event store and its backends
//! - `view` for the month, week, day and year controllers
//! - `daybook` for the composition root that wires them together

pub mod clock;
pub mod constants;
pub mod date;
pub mod date_key;
pub mod daybook;
pub mod daybook_config;
pub mod error;
pub mod event;
pub mod grid;
pub mod store;
pub mod view;

pub use date_key::DateKey;
pub use daybook::Daybook;
pub use error::{DaybookError, DaybookResult};
pub use event::{Event, EventId};
pub use grid::{GridCell, WeekStart};
pub use store::EventStore;
