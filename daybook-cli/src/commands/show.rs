use anyhow::Result;
use daybook_core::Daybook;
use daybook_core::date::month_start;

use crate::args::{date_or, parse_month, parse_year};
use crate::render::Render;

pub fn month(daybook: &Daybook, month: Option<&str>) -> Result<()> {
    let mut view = daybook.month_view();
    if let Some(arg) = month {
        let first = parse_month(arg)?;
        // Keep today selected when it is in the requested month
        if month_start(daybook.today()) != first {
            view.open_at(first);
        }
    }

    println!("{}", view.render().render());
    Ok(())
}

pub fn week(daybook: &Daybook, date: Option<&str>) -> Result<()> {
    let mut view = daybook.week_view();
    view.open_at(date_or(date, daybook.today())?);

    println!("{}", view.render().render());
    Ok(())
}

pub fn day(daybook: &Daybook, date: Option<&str>) -> Result<()> {
    let mut view = daybook.day_view();
    view.select_date(date_or(date, daybook.today())?);

    println!("{}", view.render().render());
    Ok(())
}

pub fn year(daybook: &Daybook, year: Option<&str>) -> Result<()> {
    let mut view = daybook.year_view();
    if let Some(arg) = year {
        view.show_year(parse_year(arg)?);
    }

    println!("{}", view.render().render());
    Ok(())
}
