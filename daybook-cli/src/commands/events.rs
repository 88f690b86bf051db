use anyhow::{Result, bail};
use chrono::{Days, NaiveDate};
use daybook_core::{DateKey, Daybook};
use owo_colors::OwoColorize;

use crate::args::parse_date;
use crate::commands::DEFAULT_EVENT_DAYS;

pub fn run(daybook: &Daybook, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let today = daybook.today();
    let from = match from {
        Some(arg) => parse_date(arg)?,
        None => today,
    };
    let to = match to {
        Some(arg) => parse_date(arg)?,
        None => from.checked_add_days(Days::new(DEFAULT_EVENT_DAYS)).unwrap_or(from),
    };

    if to < from {
        bail!("--to ({to}) is before --from ({from})");
    }

    let days = daybook
        .store()
        .events_between(&DateKey::from(from), &DateKey::from(to));

    if days.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, (key, events)) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format_date_label(key.date(), today).bold());

        for event in events {
            println!("  {}  {}", event.title, event.id.dimmed());
        }
    }

    Ok(())
}

/// A human-readable day label (e.g. "Today", "Tomorrow", "Wed 25 Feb 2026")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %-d %b %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_nearby_days_by_name() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let label = |d| format_date_label(NaiveDate::from_ymd_opt(2024, 3, d).unwrap(), today);

        assert_eq!(label(15), "Today");
        assert_eq!(label(16), "Tomorrow");
        assert_eq!(label(14), "Yesterday");
        assert_eq!(label(20), "Wed 20 Mar 2024");
    }
}
