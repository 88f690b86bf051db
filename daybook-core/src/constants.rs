/// Key under which the whole event mapping is stored in the blob backend.
pub const STORAGE_KEY: &str = "@eventsByDate";

/// Cells in a month grid: 6 rows of 7 days.
pub const GRID_CELLS: usize = 42;

/// Days in a week strip.
pub const WEEK_DAYS: usize = 7;

/// Earliest year a view may be anchored in.
pub const MIN_YEAR: i32 = 1;

/// Latest year a view may be anchored in. Grid overflow into the
/// neighbouring years stays inside the four-digit key range.
pub const MAX_YEAR: i32 = 9998;
