use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::foundation::error::{SlipError, SlipResult};

/// Genitive month names for the "day month" display used on the cards.
const MONTHS_RU_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

const MAX_OFFSET_DAYS: i64 = 366;

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a schedule date.
///
/// Recognized in order: `YYYY-MM-DD`, `YYYY.MM.DD`, `DD.MM.YYYY`. Anything else goes through a
/// lenient fallback (RFC 3339, RFC 2822 and a handful of common layouts). Out-of-range months
/// and days in the fixed layouts roll over into the neighbouring month or year, so
/// `2025-02-30` is March 2nd.
///
/// Returns `None` for empty or unparseable input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Some([y, m, d]) = split_fixed(s, '-', [4, 2, 2]) {
        return from_calendar_parts(y, m, d);
    }
    if let Some([y, m, d]) = split_fixed(s, '.', [4, 2, 2]) {
        return from_calendar_parts(y, m, d);
    }
    if let Some([d, m, y]) = split_fixed(s, '.', [2, 2, 4]) {
        return from_calendar_parts(y, m, d);
    }

    parse_fallback(s)
}

/// Canonical `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Human-readable "day month" without the year, e.g. `5 мая`.
pub fn format_human(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS_RU_GENITIVE[date.month0() as usize])
}

/// Monday of the week containing `date`. Saturates at the earliest representable date.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = Duration::days(i64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_signed(back).unwrap_or(NaiveDate::MIN)
}

fn split_fixed(s: &str, sep: char, widths: [usize; 3]) -> Option<[i64; 3]> {
    let mut parts = s.split(sep);
    let mut out = [0i64; 3];
    for (slot, width) in out.iter_mut().zip(widths) {
        let part = parts.next()?;
        if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

fn from_calendar_parts(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let y = i32::try_from(months.div_euclid(12)).ok()?;
    let m = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(y, m, 1)?;
    first.checked_add_signed(Duration::days(day - 1))
}

fn parse_fallback(s: &str) -> Option<NaiveDate> {
    // Timestamps with an explicit offset resolve to the local calendar day.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Day offset between the recorded date of an assignment and the day it is held.
///
/// Week overrides are keyed by the Monday of the week and take precedence over
/// `default_offset_days`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DateShift {
    pub default_offset_days: i64,
    pub week_overrides: BTreeMap<NaiveDate, i64>,
}

impl Default for DateShift {
    fn default() -> Self {
        Self {
            default_offset_days: 1,
            week_overrides: BTreeMap::new(),
        }
    }
}

impl DateShift {
    pub fn new(default_offset_days: i64) -> Self {
        Self {
            default_offset_days,
            week_overrides: BTreeMap::new(),
        }
    }

    /// Add an override for the week starting at `monday`.
    pub fn with_override(mut self, monday: NaiveDate, offset_days: i64) -> SlipResult<Self> {
        check_week_start(monday)?;
        check_offset(offset_days)?;
        self.week_overrides.insert(monday, offset_days);
        Ok(self)
    }

    pub fn validate(&self) -> SlipResult<()> {
        check_offset(self.default_offset_days)?;
        for (monday, offset) in &self.week_overrides {
            check_week_start(*monday)?;
            check_offset(*offset)?;
        }
        Ok(())
    }

    pub fn offset_for(&self, date: NaiveDate) -> i64 {
        self.week_overrides
            .get(&start_of_week(date))
            .copied()
            .unwrap_or(self.default_offset_days)
    }

    /// `None` when the shifted date falls outside the representable calendar.
    pub fn shifted_date(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_add_signed(Duration::try_days(self.offset_for(date))?)
    }
}

fn check_offset(days: i64) -> SlipResult<()> {
    if days.abs() > MAX_OFFSET_DAYS {
        return Err(SlipError::validation(format!(
            "date offset {days} is outside -{MAX_OFFSET_DAYS}..={MAX_OFFSET_DAYS} days"
        )));
    }
    Ok(())
}

fn check_week_start(date: NaiveDate) -> SlipResult<()> {
    if start_of_week(date) != date {
        return Err(SlipError::validation(format!(
            "week override key {} is not a Monday",
            format_date(date)
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/date.rs"]
mod tests;
