use anyhow::Result;
use daybook_core::Daybook;
use owo_colors::OwoColorize;

use crate::args::parse_date;

pub async fn run(daybook: &Daybook, date: &str, title: &str) -> Result<()> {
    let date = parse_date(date)?;

    let mut view = daybook.day_view();
    view.select_date(date);

    match view.request_add_event(title).await {
        Some(event) => println!(
            "{} {} on {}  {}",
            "+".green(),
            event.title,
            date.format("%a %-d %b %Y"),
            event.id.dimmed()
        ),
        // Blank titles are ignored by the store
        None => println!("{}", "Nothing added: the title is empty".dimmed()),
    }

    Ok(())
}
