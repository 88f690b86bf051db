mod args;
mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daybook_core::daybook_config::DaybookConfig;
use daybook_core::{Daybook, WeekStart};
use tracing_subscriber::EnvFilter;

use crate::args::parse_week_start;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "A small month/week/day/year calendar over one local event store")]
struct Cli {
    /// Log store loads and writes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid (defaults to the current month)
    Month {
        /// Month to show (YYYY-MM)
        month: Option<String>,
    },
    /// Show the seven days around a date
    Week {
        /// Any day of the week to show (YYYY-MM-DD)
        date: Option<String>,
    },
    /// Show a single day and its events
    Day {
        /// Day to show (YYYY-MM-DD)
        date: Option<String>,
    },
    /// Show twelve small month grids
    Year {
        /// Year to show (YYYY)
        year: Option<String>,
    },
    /// Add an event to a day
    Add {
        /// Day of the event (YYYY-MM-DD)
        date: String,

        /// Event title (remaining words are joined)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Delete an event from a day by id
    Delete {
        /// Day of the event (YYYY-MM-DD)
        date: String,

        id: String,
    },
    /// List events in a date range
    Events {
        /// Show events from this date (YYYY-MM-DD, default today)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD, default 30 days from --from)
        #[arg(long)]
        to: Option<String>,
    },
    /// Interactive session with every view over one store
    Browse,
    /// Show the config path and effective settings, or change them
    Config {
        /// First column of the month and week views (monday or sunday)
        #[arg(long, value_parser = parse_week_start)]
        month_week_start: Option<WeekStart>,

        /// First column of the year view (monday or sunday)
        #[arg(long, value_parser = parse_week_start)]
        year_week_start: Option<WeekStart>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DaybookConfig::load()?;
    let daybook = Daybook::open(config).await;

    match cli.command.unwrap_or(Commands::Month { month: None }) {
        Commands::Month { month } => commands::show::month(&daybook, month.as_deref()),
        Commands::Week { date } => commands::show::week(&daybook, date.as_deref()),
        Commands::Day { date } => commands::show::day(&daybook, date.as_deref()),
        Commands::Year { year } => commands::show::year(&daybook, year.as_deref()),
        Commands::Add { date, title } => commands::add::run(&daybook, &date, &title.join(" ")).await,
        Commands::Delete { date, id } => commands::delete::run(&daybook, &date, &id).await,
        Commands::Events { from, to } => {
            commands::events::run(&daybook, from.as_deref(), to.as_deref())
        }
        Commands::Browse => commands::browse::run(&daybook).await,
        Commands::Config {
            month_week_start,
            year_week_start,
        } => commands::config::run(daybook.config(), month_week_start, year_week_start),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "daybook_core=debug,warn" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn add_joins_title_words() {
        let cli = Cli::try_parse_from(["daybook", "add", "2024-03-15", "Call", "mum"]).unwrap();
        match cli.command {
            Some(Commands::Add { date, title }) => {
                assert_eq!(date, "2024-03-15");
                assert_eq!(title.join(" "), "Call mum");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn add_requires_a_title() {
        assert!(Cli::try_parse_from(["daybook", "add", "2024-03-15"]).is_err());
    }

    #[test]
    fn config_takes_week_start_settings() {
        let cli =
            Cli::try_parse_from(["daybook", "config", "--month-week-start", "sunday"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                month_week_start: Some(WeekStart::SundayFirst),
                year_week_start: None,
            })
        ));

        assert!(Cli::try_parse_from(["daybook", "config", "--year-week-start", "friday"]).is_err());
    }

    #[test]
    fn verbose_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["daybook", "week", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Week { date: None })));
    }
}
