pub mod add;
pub mod browse;
pub mod config;
pub mod delete;
pub mod events;
pub mod show;

/// Days listed by `events` when no --to is given
pub const DEFAULT_EVENT_DAYS: u64 = 30;
