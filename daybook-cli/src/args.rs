//! Parsing of date arguments given on the command line.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use daybook_core::{DateKey, WeekStart};
use daybook_core::date::{first_of_month, is_supported};

/// A day in the canonical `YYYY-MM-DD` form.
pub fn parse_date(arg: &str) -> Result<NaiveDate> {
    let date = arg
        .trim()
        .parse::<DateKey>()
        .map(|key| key.date())
        .map_err(|_| anyhow::anyhow!("Invalid date '{arg}'. Expected YYYY-MM-DD, e.g. 2024-03-15"))?;

    if !is_supported(date) {
        bail!("Date '{arg}' is outside the supported range");
    }

    Ok(date)
}

/// A month as `YYYY-MM`, returned as its first day.
pub fn parse_month(arg: &str) -> Result<NaiveDate> {
    let arg = arg.trim();
    parse_date(&format!("{arg}-01"))
        .map_err(|_| anyhow::anyhow!("Invalid month '{arg}'. Expected YYYY-MM, e.g. 2024-03"))
}

pub fn parse_year(arg: &str) -> Result<i32> {
    let year: i32 = arg
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid year '{arg}'. Expected YYYY, e.g. 2024"))?;

    if first_of_month(year, 1).is_none() {
        bail!("Year {year} is outside the supported range");
    }

    Ok(year)
}

/// `monday` or `sunday`, as written in the config file.
pub fn parse_week_start(arg: &str) -> Result<WeekStart, String> {
    match arg.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(WeekStart::MondayFirst),
        "sunday" | "sun" => Ok(WeekStart::SundayFirst),
        other => Err(format!("'{other}' is not a week start. Use monday or sunday")),
    }
}

/// The optional argument parsed, or `fallback` when it was left out.
pub fn date_or(arg: Option<&str>, fallback: NaiveDate) -> Result<NaiveDate> {
    arg.map(parse_date).transpose().map(|d| d.unwrap_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dates_must_be_canonical() {
        assert_eq!(parse_date("2024-03-15").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), ymd(2024, 2, 29));

        for bad in ["2024-3-15", "15/03/2024", "2023-02-29", "tomorrow", ""] {
            assert!(parse_date(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn month_is_year_and_month_only() {
        assert_eq!(parse_month("2024-02").unwrap(), ymd(2024, 2, 1));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-2").is_err());
        assert!(parse_month("2024-02-01").is_err());
    }

    #[test]
    fn years_are_range_checked() {
        assert_eq!(parse_year("1999").unwrap(), 1999);
        assert!(parse_year("0").is_err());
        assert!(parse_year("20x4").is_err());
    }

    #[test]
    fn week_starts_are_monday_or_sunday() {
        assert_eq!(parse_week_start("Monday"), Ok(WeekStart::MondayFirst));
        assert_eq!(parse_week_start("sun"), Ok(WeekStart::SundayFirst));
        assert!(parse_week_start("friday").is_err());
    }

    #[test]
    fn missing_date_falls_back() {
        let today = ymd(2024, 3, 15);
        assert_eq!(date_or(None, today).unwrap(), today);
        assert_eq!(date_or(Some("2024-01-01"), today).unwrap(), ymd(2024, 1, 1));
        assert!(date_or(Some("soon"), today).is_err());
    }
}
