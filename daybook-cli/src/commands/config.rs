use anyhow::Result;
use daybook_core::WeekStart;
use daybook_core::constants::STORAGE_KEY;
use daybook_core::daybook_config::DaybookConfig;
use daybook_core::store::FileBlobStore;
use owo_colors::OwoColorize;

pub fn run(
    config: &DaybookConfig,
    month_week_start: Option<WeekStart>,
    year_week_start: Option<WeekStart>,
) -> Result<()> {
    let config_path = DaybookConfig::config_path()?;

    let config = match with_changes(config, month_week_start, year_week_start) {
        Some(updated) => {
            updated.save_to(&config_path)?;
            println!("{} Saved {}", "✓".green(), config_path.display());
            println!();
            updated
        }
        None => config.clone(),
    };

    let store = FileBlobStore::new(config.data_path());

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!("  Events:  {}", store.path_for(STORAGE_KEY).display());

    println!();
    println!("{}", "Settings".bold());
    println!("  month_week_start  {}", week_start_name(config.month_week_start));
    println!("  year_week_start   {}", week_start_name(config.year_week_start));

    Ok(())
}

/// `config` with the requested settings applied, or `None` if nothing changes.
fn with_changes(
    config: &DaybookConfig,
    month_week_start: Option<WeekStart>,
    year_week_start: Option<WeekStart>,
) -> Option<DaybookConfig> {
    let updated = DaybookConfig {
        month_week_start: month_week_start.unwrap_or(config.month_week_start),
        year_week_start: year_week_start.unwrap_or(config.year_week_start),
        ..config.clone()
    };

    (updated != *config).then_some(updated)
}

fn week_start_name(week_start: WeekStart) -> &'static str {
    match week_start {
        WeekStart::MondayFirst => "monday",
        WeekStart::SundayFirst => "sunday",
    }
}
