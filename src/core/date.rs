//! Date formatting and calendar arithmetic.
//!
//! All values are local wall-clock times (`NaiveDateTime`); the zone is applied
//! only when parsing RFC 3339 input or epoch timestamps.

use crate::utils::error::{HelperError, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const DEFAULT_DATE_PATTERN: &str = "dd.MM.yyyy";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const YEAR_DIGITS: usize = 4;
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn parse_date(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    let invalid = || HelperError::InvalidDate {
        input: input.to_string(),
    };

    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        // 四位數以內是年份，其餘視為 epoch 毫秒
        if trimmed.len() <= YEAR_DIGITS {
            let year: i32 = trimmed.parse().map_err(|_| invalid())?;
            return NaiveDate::from_ymd_opt(year, 1, 1)
                .map(|d| d.and_time(NaiveTime::MIN))
                .ok_or_else(invalid);
        }
        let millis: i64 = trimmed.parse().map_err(|_| invalid())?;
        return DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.with_timezone(&Local).naive_local())
            .ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| invalid())
}

/// Formats `date` by replacing every `dd`, `MM`, `yyyy`, `HH` and `mm` token in `pattern`.
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;

    while let Some(ch) = rest.chars().next() {
        let (replacement, consumed) = if rest.starts_with("yyyy") {
            (Some(date.year().to_string()), 4)
        } else if rest.starts_with("dd") {
            (Some(format!("{:02}", date.day())), 2)
        } else if rest.starts_with("MM") {
            (Some(format!("{:02}", date.month())), 2)
        } else if rest.starts_with("HH") {
            (Some(format!("{:02}", date.hour())), 2)
        } else if rest.starts_with("mm") {
            (Some(format!("{:02}", date.minute())), 2)
        } else {
            (None, ch.len_utf8())
        };

        match replacement {
            Some(value) => out.push_str(&value),
            None => out.push(ch),
        }
        rest = &rest[consumed..];
    }

    out
}

/// 空字串回傳空字串，其餘先解析再格式化
pub fn format_date_str(input: &str, pattern: &str) -> Result<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(format_date(&parse_date(input)?, pattern))
}

pub fn time_ago(date: &NaiveDateTime) -> String {
    time_ago_at(date, &Local::now().naive_local())
}

/// Relative time in Russian ("2 ч. назад"); future dates read as "только что".
pub fn time_ago_at(date: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let seconds = (*now - *date).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{} дн. назад", days)
    } else if hours > 0 {
        format!("{} ч. назад", hours)
    } else if minutes > 0 {
        format!("{} мин. назад", minutes)
    } else {
        "только что".to_string()
    }
}

pub fn is_today(date: &NaiveDateTime) -> bool {
    date.date() == Local::now().date_naive()
}

pub fn is_same_day(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// `None` when the result leaves chrono's representable range.
pub fn add_days(date: &NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    date.checked_add_signed(Duration::try_days(days)?)
}

pub fn start_of_day(date: &NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: &NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN + Duration::milliseconds(MS_PER_DAY - 1))
}
