//! GEDCOM date values.
//!
//! [`DateValue`] renders the date forms GEDCOM 5.5.5 allows in `DATE`
//! lines: calendar dates at day, month or year precision, periods, ranges,
//! approximations, interpreted dates and free-text phrases. Free text from
//! other systems can be turned into a date with [`DateValue::interpret`].

use crate::error::{GedcomError, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::fmt;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A calendar date at day, month or year precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePoint {
    /// `2 OCT 1822`
    Day(NaiveDate),
    /// `DEC 1859`
    Month {
        /// Year
        year: i32,
        /// Month, 1 to 12
        month: u32,
    },
    /// `1900`
    Year(i32),
}

impl DatePoint {
    /// A full date.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::InvalidDate`] if the date does not exist.
    pub fn day(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DatePoint::Day)
            .ok_or_else(|| GedcomError::InvalidDate(format!("{year}-{month:02}-{day:02}")))
    }

    /// A month of a year.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::InvalidDate`] if `month` is not 1 to 12.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        if (1..=12).contains(&month) {
            Ok(DatePoint::Month { year, month })
        } else {
            Err(GedcomError::InvalidDate(format!("{year}-{month:02}")))
        }
    }

    /// A whole year.
    #[must_use]
    pub const fn year(year: i32) -> Self {
        DatePoint::Year(year)
    }
}

impl From<NaiveDate> for DatePoint {
    fn from(date: NaiveDate) -> Self {
        DatePoint::Day(date)
    }
}

impl fmt::Display for DatePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatePoint::Day(date) => write!(f, "{} {} {}", date.day(), month_name(date.month()), date.year()),
            DatePoint::Month { year, month } => write!(f, "{} {year}", month_name(*month)),
            DatePoint::Year(year) => write!(f, "{year}"),
        }
    }
}

/// A `DATE_VALUE`.
///
/// # Examples
///
/// ```
/// use gedcom555::date::{DatePoint, DateValue};
///
/// let residence = DateValue::FromTo(DatePoint::year(1900), DatePoint::year(1905));
/// assert_eq!(residence.to_string(), "FROM 1900 TO 1905");
///
/// let guess = DateValue::interpret("1861-06-11");
/// assert_eq!(guess.to_string(), "INT 11 JUN 1861 (1861-06-11)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateValue {
    /// A plain date
    Date(DatePoint),
    /// `FROM <date>`
    From(DatePoint),
    /// `TO <date>`
    To(DatePoint),
    /// `FROM <date> TO <date>`
    FromTo(DatePoint, DatePoint),
    /// `BEF <date>`
    Before(DatePoint),
    /// `AFT <date>`
    After(DatePoint),
    /// `BET <date> AND <date>`
    Between(DatePoint, DatePoint),
    /// `ABT <date>`
    About(DatePoint),
    /// `CAL <date>`
    Calculated(DatePoint),
    /// `EST <date>`
    Estimated(DatePoint),
    /// `INT <date> (<phrase>)`
    Interpreted {
        /// Date read from the phrase
        date: DatePoint,
        /// Original text
        phrase: String,
    },
    /// `(<phrase>)`
    Phrase(String),
}

impl DateValue {
    /// Read an ISO-like date out of free text.
    ///
    /// Trailing `.`, `x`, `X` and `-` are ignored, so placeholders such as
    /// `1850-xx` or `1850-` still yield a year. `YYYY-MM-DD`, `YYYY-MM` and
    /// `YYYY` produce an [`DateValue::Interpreted`] date at that precision;
    /// anything else is kept as a [`DateValue::Phrase`].
    ///
    /// The interpreted date never claims more precision than the phrase
    /// gives: `1850` becomes `INT 1850 (1850)`, not `INT 1 JAN 1850 (1850)`.
    #[must_use]
    pub fn interpret(phrase: &str) -> Self {
        match parse_iso(phrase) {
            Some(date) => DateValue::Interpreted {
                date,
                phrase: phrase.to_string(),
            },
            None => DateValue::Phrase(phrase.to_string()),
        }
    }
}

fn parse_iso(phrase: &str) -> Option<DatePoint> {
    let trimmed = phrase.trim().trim_end_matches(['.', 'x', 'X', '-']);
    let mut parts = trimmed.split('-');
    let year = parts.next().filter(|y| y.len() == 4)?.parse().ok()?;
    let month = parts.next().map(str::parse::<u32>).transpose().ok()?;
    let day = parts.next().map(str::parse::<u32>).transpose().ok()?;
    if parts.next().is_some() {
        return None;
    }
    match (month, day) {
        (None, _) => Some(DatePoint::year(year)),
        (Some(month), None) => DatePoint::month(year, month).ok(),
        (Some(month), Some(day)) => DatePoint::day(year, month, day).ok(),
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Date(date) => write!(f, "{date}"),
            DateValue::From(date) => write!(f, "FROM {date}"),
            DateValue::To(date) => write!(f, "TO {date}"),
            DateValue::FromTo(from, to) => write!(f, "FROM {from} TO {to}"),
            DateValue::Before(date) => write!(f, "BEF {date}"),
            DateValue::After(date) => write!(f, "AFT {date}"),
            DateValue::Between(start, end) => write!(f, "BET {start} AND {end}"),
            DateValue::About(date) => write!(f, "ABT {date}"),
            DateValue::Calculated(date) => write!(f, "CAL {date}"),
            DateValue::Estimated(date) => write!(f, "EST {date}"),
            DateValue::Interpreted { date, phrase } => write!(f, "INT {date} ({phrase})"),
            DateValue::Phrase(phrase) => write!(f, "({phrase})"),
        }
    }
}

impl From<DatePoint> for DateValue {
    fn from(date: DatePoint) -> Self {
        DateValue::Date(date)
    }
}

impl From<DateValue> for String {
    fn from(value: DateValue) -> Self {
        value.to_string()
    }
}

/// A `DATE_EXACT`, as used by change dates and file creation dates.
#[must_use]
pub fn exact_date(date: NaiveDate) -> String {
    DatePoint::Day(date).to_string()
}

/// A `TIME_VALUE` with unpadded hours.
#[must_use]
pub fn time_value(time: NaiveTime) -> String {
    format!("{}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

fn month_name(month: u32) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|m| MONTHS.get(m))
        .copied()
        .unwrap_or("")
}
