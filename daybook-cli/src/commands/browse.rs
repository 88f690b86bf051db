//! Interactive session with the month, week, day and year views mounted at
//! once over the one store.

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};
use daybook_core::view::{DayView, MonthView, Navigate, WeekView, YearView};
use daybook_core::{Daybook, Event};
use dialoguer::Input;
use owo_colors::OwoColorize;

use crate::args::parse_date;
use crate::render::Render;

const HELP: &str = "\
  m w d y      month, week, day or year view
  p n          previous / next
  t            today
  s <date>     go to a date (YYYY-MM-DD)
  a <title>    add an event to the selected day
  x <n>        delete the n-th event of the selected day
  o <1-12>     open a month (year view)
  ?            this help
  q            quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Month,
    Week,
    Day,
    Year,
}

impl Mode {
    fn prompt(self) -> &'static str {
        match self {
            Mode::Month => "month",
            Mode::Week => "week",
            Mode::Day => "day",
            Mode::Year => "year",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Switch(Mode),
    Previous,
    Next,
    Today,
    Select(NaiveDate),
    Add(String),
    Delete(usize),
    Open(u32),
    Help,
    Quit,
}

/// Parse one input line. An empty line only redraws.
fn parse_action(input: &str) -> Result<Option<Action>> {
    let input = input.trim();
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    let action = match command {
        "" => return Ok(None),
        "m" => Action::Switch(Mode::Month),
        "w" => Action::Switch(Mode::Week),
        "d" => Action::Switch(Mode::Day),
        "y" => Action::Switch(Mode::Year),
        "p" => Action::Previous,
        "n" => Action::Next,
        "t" => Action::Today,
        "s" => Action::Select(parse_date(rest)?),
        "a" if rest.is_empty() => bail!("Usage: a <title>"),
        "a" => Action::Add(rest.to_string()),
        "x" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => Action::Delete(n),
            _ => bail!("Usage: x <n>, where n is the event's number in the list"),
        },
        "o" => match rest.parse::<u32>() {
            Ok(month) if (1..=12).contains(&month) => Action::Open(month),
            _ => bail!("Usage: o <1-12>"),
        },
        "?" | "h" | "help" => Action::Help,
        "q" | "quit" => Action::Quit,
        other => bail!("Unknown command '{other}'. Type ? for help"),
    };

    Ok(Some(action))
}

struct Session {
    mode: Mode,
    month: MonthView,
    week: WeekView,
    day: DayView,
    year: YearView,
}

impl Session {
    fn new(daybook: &Daybook) -> Self {
        Session {
            mode: Mode::Month,
            month: daybook.month_view(),
            week: daybook.week_view(),
            day: daybook.day_view(),
            year: daybook.year_view(),
        }
    }

    fn navigator(&mut self) -> &mut dyn Navigate {
        match self.mode {
            Mode::Month => &mut self.month,
            Mode::Week => &mut self.week,
            Mode::Day => &mut self.day,
            Mode::Year => &mut self.year,
        }
    }

    fn render(&self) -> String {
        match self.mode {
            Mode::Month => self.month.render().render(),
            Mode::Week => self.week.render().render(),
            Mode::Day => self.day.render().render(),
            Mode::Year => self.year.render().render(),
        }
    }

    /// Events of the day adds and deletes target in the current view.
    fn selected_events(&self) -> Vec<Event> {
        match self.mode {
            Mode::Month => self.month.render().selected_events,
            Mode::Week => self
                .week
                .render()
                .days
                .into_iter()
                .find(|d| d.is_anchor)
                .map(|d| d.events)
                .unwrap_or_default(),
            Mode::Day => self.day.render().events,
            Mode::Year => Vec::new(),
        }
    }

    /// Apply an action, returning a status line to show if there is one.
    async fn apply(&mut self, action: Action) -> Option<String> {
        match action {
            Action::Switch(mode) => self.mode = mode,
            Action::Previous => self.navigator().navigate_previous(),
            Action::Next => self.navigator().navigate_next(),
            Action::Today => self.navigator().jump_to_today(),
            Action::Select(date) => {
                let moved = match self.mode {
                    Mode::Month => self.month.open_at(date),
                    Mode::Week => self.week.open_at(date),
                    Mode::Day => self.day.select_date(date),
                    Mode::Year => {
                        self.year.show_year(date.year());
                        true
                    }
                };
                if !moved {
                    return Some(format!("{date} is outside the supported range").red().to_string());
                }
            }
            Action::Add(title) => {
                let added = match self.mode {
                    Mode::Month => self.month.request_add_event(&title).await,
                    Mode::Week => self.week.request_add_event(&title).await,
                    Mode::Day => self.day.request_add_event(&title).await,
                    Mode::Year => return Some(Self::no_day_selected()),
                };
                return added.map(|e| format!("{} {}", "+".green(), e.title));
            }
            Action::Delete(n) => {
                if self.mode == Mode::Year {
                    return Some(Self::no_day_selected());
                }
                let Some(event) = self.selected_events().into_iter().nth(n - 1) else {
                    return Some(format!("No event number {n}").red().to_string());
                };
                let removed = match self.mode {
                    Mode::Month => self.month.request_delete_event(&event.id).await,
                    Mode::Week => self.week.request_delete_event(&event.id).await,
                    Mode::Day => self.day.request_delete_event(&event.id).await,
                    Mode::Year => false,
                };
                return removed.then(|| format!("{} {}", "-".red(), event.title));
            }
            Action::Open(month) => {
                if self.mode != Mode::Year {
                    return Some("o only works in the year view (y)".dimmed().to_string());
                }
                if let Some(pick) = self.year.pick_month(month) {
                    self.month.show_month(pick);
                    self.mode = Mode::Month;
                }
            }
            Action::Help => return Some(HELP.to_string()),
            Action::Quit => {}
        }
        None
    }

    fn no_day_selected() -> String {
        "Pick a day first: switch to the month, week or day view"
            .dimmed()
            .to_string()
    }
}

pub async fn run(daybook: &Daybook) -> Result<()> {
    let mut session = Session::new(daybook);
    println!("{}", "Type ? for help, q to quit".dimmed());

    loop {
        println!();
        println!("{}", session.render());

        let input: String = Input::new()
            .with_prompt(session.mode.prompt())
            .allow_empty(true)
            .interact_text()?;

        match parse_action(&input) {
            Ok(Some(Action::Quit)) => break,
            Ok(Some(action)) => {
                if let Some(status) = session.apply(action).await {
                    println!("{status}");
                }
            }
            Ok(None) => {}
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    Ok(())
}
