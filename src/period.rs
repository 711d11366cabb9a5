use chrono::NaiveDate;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};
use crate::locale::Locale;

/// Interchange format of dates handed in and out of the picker.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(Error::new(ErrorKind::DateParse, "empty date string"));
    }
    Ok(NaiveDate::parse_from_str(trimmed, DATE_FORMAT)?)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Two days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two arbitrarily ordered days.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if b < a {
            DateRange { start: b, end: a }
        } else {
            DateRange { start: a, end: b }
        }
    }

    /// A range covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        &self.start <= date && date <= &self.end
    }

    /// True if `date` lies inside the range, excluding both endpoints.
    pub fn strictly_contains(&self, date: &NaiveDate) -> bool {
        &self.start < date && date < &self.end
    }
}

/// Choice of a single day, a range of days, or nothing.
///
/// Used both for the (persistent) selection and the (ephemeral) hover
/// highlight of the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Empty,
    Single(NaiveDate),
    Range(DateRange),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Empty
    }
}

impl From<NaiveDate> for Selection {
    fn from(date: NaiveDate) -> Self {
        Selection::Single(date)
    }
}

impl From<DateRange> for Selection {
    fn from(range: DateRange) -> Self {
        Selection::Range(range)
    }
}

impl From<Option<Selection>> for Selection {
    fn from(sel: Option<Selection>) -> Self {
        sel.unwrap_or(Selection::Empty)
    }
}

impl Selection {
    pub fn range(a: NaiveDate, b: NaiveDate) -> Self {
        Selection::Range(DateRange::new(a, b))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Returns `self` unless it is empty, in which case `other` is used.
    pub fn or(self, other: Selection) -> Selection {
        match self {
            Selection::Empty => other,
            sel => sel,
        }
    }

    /// Day span covered by the selection, a single day being `[d, d]`.
    pub fn as_range(&self) -> Option<DateRange> {
        match self {
            Selection::Empty => None,
            Selection::Single(date) => Some(DateRange::day(*date)),
            Selection::Range(range) => Some(*range),
        }
    }

    /// Interchange representation as `(from, to)`, both equal for a single day.
    pub fn to_strings(&self) -> Option<(String, String)> {
        self.as_range()
            .map(|range| (format_date(&range.start()), format_date(&range.end())))
    }

    /// Inverse of `to_strings`. Both strings have to be present, equal strings
    /// give a single day. Anything unparseable is an error.
    pub fn from_strings(from: Option<&str>, to: Option<&str>) -> Result<Selection> {
        match (from, to) {
            (Some(from), Some(to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                if from.trim() == to.trim() {
                    Ok(Selection::Single(parse_date(from)?))
                } else {
                    Ok(Selection::range(parse_date(from)?, parse_date(to)?))
                }
            }
            _ => Ok(Selection::Empty),
        }
    }

    /// Formats the selection with `single` for a day and `ranged` for each
    /// endpoint of a range.
    pub fn display_with<F, G>(&self, single: F, ranged: G) -> Option<String>
    where
        F: Fn(&NaiveDate) -> String,
        G: Fn(&NaiveDate) -> String,
    {
        match self {
            Selection::Empty => None,
            Selection::Single(date) => Some(single(date)),
            Selection::Range(range) => Some(format!(
                "{} - {}",
                ranged(&range.start()),
                ranged(&range.end())
            )),
        }
    }

    /// Footer summary of the dropdown, `Tue, Jan 2, 2024 - Fri, Jan 5, 2024`.
    pub fn summary(&self, locale: &Locale) -> Option<String> {
        self.display_with(|d| locale.weekday_date(d), |d| locale.weekday_date(d))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_strings() {
            Some((from, to)) => write!(f, "{} {}", from, to),
            None => Ok(()),
        }
    }
}
