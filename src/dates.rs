// Date and id parsing for user input
// Relative forms are resolved against an explicit `today` so tests stay deterministic

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};

use crate::error::{Error, Result};

/// Parse a due date. Every accepted form resolves to 23:59:59 local time.
///
/// Accepts `today`, `tomorrow`/`tom`, `+N` (days from today), `YYYY-MM-DD`
/// and `MM-DD`, `MM/DD` or `M/D` in the current year. Empty input means no due date.
pub fn parse_due_date(s: &str) -> Result<Option<DateTime<Local>>> {
    parse_due_date_from(s, Local::now().date_naive())
}

pub fn parse_due_date_from(s: &str, today: NaiveDate) -> Result<Option<DateTime<Local>>> {
    let input = s.trim().to_lowercase();
    if input.is_empty() {
        return Ok(None);
    }

    let date = match input.as_str() {
        "today" => today,
        "tomorrow" | "tom" => today + Duration::days(1),
        _ => {
            if let Some(n) = input.strip_prefix('+') {
                let days: i64 = n.parse().map_err(|_| Error::InvalidDate(s.to_string()))?;
                offset(today, days).ok_or_else(|| Error::InvalidDate(s.to_string()))?
            } else if let Ok(date) = NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
                date
            } else {
                month_day(&input, today.year()).ok_or_else(|| Error::InvalidDate(s.to_string()))?
            }
        }
    };

    end_of_day(date).map(Some).ok_or_else(|| Error::InvalidDate(s.to_string()))
}

// None when the offset leaves chrono's date range
fn offset(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    today.checked_add_signed(Duration::try_days(days)?)
}

// MM-DD, MM/DD and M/D
fn month_day(input: &str, year: i32) -> Option<NaiveDate> {
    let (m, d) = input.split_once('-').or_else(|| input.split_once('/'))?;
    let (month, day) = (m.parse().ok()?, d.parse().ok()?);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn end_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    let time = NaiveTime::from_hms_opt(23, 59, 59)?;
    Local.from_local_datetime(&date.and_time(time)).earliest()
}

/// Parse a calendar date for daily notes: `today`, `yesterday`, `tomorrow`,
/// `+N`, `-N`, or a date in `format`.
pub fn parse_date(s: &str, format: &str) -> Result<NaiveDate> {
    parse_date_from(s, format, Local::now().date_naive())
}

pub fn parse_date_from(s: &str, format: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = s.trim().to_lowercase();
    match input.as_str() {
        "" | "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    if input.starts_with('+') || input.starts_with('-') {
        if let Ok(days) = input.parse::<i64>() {
            return offset(today, days).ok_or_else(|| Error::InvalidDate(s.to_string()));
        }
    }

    NaiveDate::parse_from_str(s.trim(), format).map_err(|_| Error::InvalidDate(s.to_string()))
}

pub fn parse_task_id(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidTaskId(s.to_string())),
    }
}
