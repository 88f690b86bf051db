//! Terminal rendering for daybook view models.
//!
//! Extension traits that turn the core's render structs into colored text
//! using owo_colors. Widths are computed on the plain text before styling so
//! escape codes never break the alignment.

use chrono::{Datelike, NaiveDate};
use daybook_core::Event;
use daybook_core::view::{DayCell, DayRender, MonthRender, MonthTile, WeekRender, YearRender};
use owo_colors::{OwoColorize, Style};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

const EVENT_MARK: &str = "•";

/// Visible width of a month grid row: seven 3-wide cells, single spaced.
const MONTH_WIDTH: usize = 27;

/// Visible width of a year tile row: seven 2-wide cells, single spaced.
const TILE_WIDTH: usize = 20;

const TILES_PER_ROW: usize = 3;

fn cell_style(cell: &DayCell) -> Style {
    let mut style = Style::new();
    if !cell.in_current_month {
        style = style.dimmed();
    }
    if cell.is_today {
        style = style.bold().underline();
    }
    if cell.is_selected {
        style = style.reversed();
    }
    style
}

fn month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

fn month_name(month: u32) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}

/// Numbered event lines, as used by every view that lists a day's events.
pub fn event_lines(events: &[Event]) -> Vec<String> {
    if events.is_empty() {
        return vec![format!("  {}", "No events".dimmed())];
    }

    events
        .iter()
        .enumerate()
        .map(|(i, event)| format!("  {:>2}. {}  {}", i + 1, event.title, event.id.dimmed()))
        .collect()
}

impl Render for MonthRender {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let title = format!("{:^MONTH_WIDTH$}", month_title(self.year, self.month));
        lines.push(title.trim_end().bold().to_string());

        let labels: Vec<String> = self.labels.iter().map(|l| format!("{l:>2} ")).collect();
        lines.push(labels.join(" ").trim_end().dimmed().to_string());

        for week in self.cells.chunks(7) {
            let row: Vec<String> = week
                .iter()
                .map(|cell| {
                    let day = format!("{:>2}", cell.date.day());
                    let day = day.style(cell_style(cell));
                    let mark = if cell.has_events {
                        EVENT_MARK.green().to_string()
                    } else {
                        " ".to_string()
                    };
                    format!("{day}{mark}")
                })
                .collect();
            lines.push(row.join(" "));
        }

        lines.push(String::new());
        lines.push(self.selected.format("%a %-d %B %Y").bold().to_string());
        lines.extend(event_lines(&self.selected_events));

        lines.join("\n")
    }
}

impl Render for WeekRender {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if let (Some(first), Some(last)) = (self.first(), self.last()) {
            let title = format!("{} to {}", first.format("%-d %b %Y"), last.format("%-d %b %Y"));
            lines.push(title.bold().to_string());
        }

        for (label, day) in self.labels.iter().zip(&self.days) {
            let pointer = if day.is_anchor { ">" } else { " " };
            let date = format!("{label} {}", day.date.format("%e %b"));
            let date = if day.is_today {
                date.bold().underline().to_string()
            } else {
                date
            };

            let titles = if day.events.is_empty() {
                "-".dimmed().to_string()
            } else {
                day.events
                    .iter()
                    .map(|e| e.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            lines.push(format!("{pointer} {date}  {titles}"));
        }

        if let Some(anchor) = self.days.iter().find(|d| d.is_anchor) {
            lines.push(String::new());
            lines.push(anchor.date.format("%a %-d %B %Y").bold().to_string());
            lines.extend(event_lines(&anchor.events));
        }

        lines.join("\n")
    }
}

impl Render for DayRender {
    fn render(&self) -> String {
        let mut title = self.date.format("%A %-d %B %Y").bold().to_string();
        if self.is_today {
            title.push_str(&format!(" {}", "(today)".green()));
        }

        let mut lines = vec![title];
        lines.extend(event_lines(&self.events));
        lines.join("\n")
    }
}

/// The eight lines of one year tile, each `TILE_WIDTH` wide when visible.
fn tile_lines(tile: &MonthTile, labels: &[&str]) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);

    lines.push(format!("{:^TILE_WIDTH$}", month_name(tile.month)).bold().to_string());
    lines.push(format!("{:<TILE_WIDTH$}", labels.join(" ")).dimmed().to_string());

    for week in tile.cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                if !cell.in_current_month {
                    return "  ".to_string();
                }
                let day = format!("{:>2}", cell.date.day());
                match (cell.is_today, cell.has_events) {
                    (true, _) => day.reversed().to_string(),
                    (false, true) => day.green().bold().to_string(),
                    (false, false) => day,
                }
            })
            .collect();
        lines.push(row.join(" "));
    }

    lines
}

impl Render for YearRender {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let width = TILE_WIDTH * TILES_PER_ROW + 3 * (TILES_PER_ROW - 1);
        let title = format!("{:^width$}", self.year);
        lines.push(title.trim_end().bold().to_string());

        for row in self.months.chunks(TILES_PER_ROW) {
            lines.push(String::new());

            let tiles: Vec<Vec<String>> =
                row.iter().map(|tile| tile_lines(tile, &self.labels)).collect();
            let height = tiles.iter().map(Vec::len).max().unwrap_or(0);

            for i in 0..height {
                let line: Vec<&str> = tiles
                    .iter()
                    .map(|t| t.get(i).map(String::as_str).unwrap_or(""))
                    .collect();
                lines.push(line.join("   ").trim_end().to_string());
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use daybook_core::clock::FixedClock;
    use daybook_core::store::{EventStore, MemoryBlobStore};
    use daybook_core::view::{MonthView, ViewContext};
    use daybook_core::{DateKey, WeekStart};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn titles_use_month_names() {
        assert_eq!(month_title(2024, 2), "February 2024");
        assert_eq!(month_name(12), "December");
    }

    #[test]
    fn empty_event_list_says_so() {
        let lines = event_lines(&[]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("No events"));
    }

    #[test]
    fn events_are_numbered_from_one() {
        let events = [Event::new("Dentist").unwrap(), Event::new("Lunch").unwrap()];
        let lines = event_lines(&events);

        assert!(lines[0].contains(" 1. Dentist"));
        assert!(lines[1].contains(" 2. Lunch"));
        assert!(lines[1].contains(events[1].id.as_str()));
    }

    #[test]
    fn month_render_draws_six_week_rows_and_the_selected_day() {
        let store = EventStore::new(Arc::new(MemoryBlobStore::new()));
        let ctx = ViewContext::new(store, Arc::new(FixedClock::new(ymd(2024, 2, 14))));
        let text = MonthView::new(ctx, WeekStart::MondayFirst).render().render();
        let lines: Vec<&str> = text.lines().collect();

        // title, labels, six weeks, blank, selected day, its events
        assert_eq!(lines.len(), 11);
        assert!(lines[0].contains("February 2024"));
        assert!(lines[1].contains("Mo"));
        assert!(lines[2].contains("29"));
        assert!(lines[7].contains("10"));
        assert!(lines[8].is_empty());
        assert!(lines[9].contains("Wed 14 February 2024"));
        assert!(lines[10].contains("No events"));
    }

    #[test]
    fn day_render_lists_its_events() {
        let date = ymd(2024, 3, 15);
        let render = DayRender {
            date,
            key: DateKey::from(date),
            is_today: true,
            events: vec![Event::new("Dentist").unwrap()],
        };

        let text = render.render();
        assert!(text.contains("Friday 15 March 2024"));
        assert!(text.contains("(today)"));
        assert!(text.contains("Dentist"));
    }
}
