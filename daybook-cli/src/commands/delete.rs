use anyhow::{Result, bail};
use daybook_core::{Daybook, EventId};
use owo_colors::OwoColorize;

use crate::args::parse_date;

pub async fn run(daybook: &Daybook, date: &str, id: &str) -> Result<()> {
    let date = parse_date(date)?;

    let mut view = daybook.day_view();
    view.select_date(date);

    let id = EventId::from(id.trim());
    let title = view
        .render()
        .events
        .into_iter()
        .find(|e| e.id == id)
        .map(|e| e.title);

    if !view.request_delete_event(&id).await {
        bail!(
            "No event with id '{}' on {}. List the day's events with:\n  daybook day {}",
            id,
            date.format("%Y-%m-%d"),
            date.format("%Y-%m-%d")
        );
    }

    println!(
        "{} {} on {}",
        "-".red(),
        title.unwrap_or_else(|| id.to_string()),
        date.format("%a %-d %b %Y")
    );

    Ok(())
}
