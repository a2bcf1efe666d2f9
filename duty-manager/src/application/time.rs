use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{DutyError, Result};

/// Display format used by every form and listing (DD/MM/YYYY).
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

// =====================
// Locale tables
// =====================

/// Fixed weekday/month name tables for one display language.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    /// Monday first
    pub weekdays: [&'static str; 7],
    /// Month names as they appear inside a date ("Τρίτη, 01 Ιουλίου 2025")
    pub months_in_date: [&'static str; 12],
    /// Month names standing alone ("Ιούλιος 2025")
    pub months_standalone: [&'static str; 12],
}

impl Locale {
    pub const GREEK: Locale = Locale {
        weekdays: [
            "Δευτέρα",
            "Τρίτη",
            "Τετάρτη",
            "Πέμπτη",
            "Παρασκευή",
            "Σάββατο",
            "Κυριακή",
        ],
        months_in_date: [
            "Ιανουαρίου",
            "Φεβρουαρίου",
            "Μαρτίου",
            "Απριλίου",
            "Μαίου",
            "Ιουνίου",
            "Ιουλίου",
            "Αυγούστου",
            "Σεπτεμβρίου",
            "Οκτωβρίου",
            "Νοεμβρίου",
            "Δεκεμβρίου",
        ],
        months_standalone: [
            "Ιανουάριος",
            "Φεβρουάριος",
            "Μάρτιος",
            "Απρίλιος",
            "Μάιος",
            "Ιούνιος",
            "Ιούλιος",
            "Αύγουστος",
            "Σεπτέμβριος",
            "Οκτώβριος",
            "Νοέμβριος",
            "Δεκέμβριος",
        ],
    };

    pub fn weekday_name(&self, date: NaiveDate) -> &'static str {
        self.weekdays[date.weekday().num_days_from_monday() as usize]
    }

    /// month: 1 (January) .. 12 (December)
    pub fn month_in_date(&self, month: u32) -> Option<&'static str> {
        month_index(month).map(|i| self.months_in_date[i])
    }

    /// month: 1 (January) .. 12 (December)
    pub fn month_standalone(&self, month: u32) -> Option<&'static str> {
        month_index(month).map(|i| self.months_standalone[i])
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::GREEK
    }
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| (month - 1) as usize)
}

// =====================
// Display dates
// =====================

/// Parses a strict `DD/MM/YYYY` string.
///
/// Both day and month must be two digits and the year four digits; anything
/// else, or a date that does not exist on the calendar, is rejected.
pub fn parse_display_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    let bytes = trimmed.as_bytes();

    let shape_ok = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());

    if !shape_ok {
        return Err(DutyError::InvalidDateFormat(s.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT)
        .map_err(|_| DutyError::InvalidDateFormat(s.to_string()))
}

/// Blank or missing input means "no date".
pub fn parse_optional_display_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_display_date(value).map(Some),
    }
}

pub fn format_display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// "<weekday>, <DD> <month> <YYYY>"
pub fn format_localized_long_date(date: Option<NaiveDate>, locale: &Locale) -> String {
    let Some(date) = date else {
        return String::new();
    };

    // month() is always 1..=12 for a NaiveDate
    let month = locale.month_in_date(date.month()).unwrap_or_default();

    format!(
        "{}, {:02} {} {}",
        locale.weekday_name(date),
        date.day(),
        month,
        date.year()
    )
}

/// "<month> <year>", used for the month selector
pub fn format_month_label(year: i32, month: u32, locale: &Locale) -> Option<String> {
    locale
        .month_standalone(month)
        .map(|name| format!("{} {}", name, year))
}

// =====================
// Month keys
// =====================

/// A calendar month, rendered as the machine key `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DutyError::InvalidDateFormat(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Half-open range `[first day, first day of the next month)`.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let next = first.checked_add_months(Months::new(1))?;
        Some((first, next))
    }

    pub fn label(&self, locale: &Locale) -> String {
        format_month_label(self.year, self.month, locale).unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DutyError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DutyError::InvalidDateFormat(s.to_string());
        let all_digits =
            |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() > 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        MonthKey::new(year, month).map_err(|_| invalid())
    }
}
