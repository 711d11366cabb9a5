use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use phf::phf_map;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// Position of the day relative to the month in long date forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `Jan 2, 2024`
    MonthDayYear,
    /// `2. Jan. 2024`, the string is put right after the day number.
    DayMonthYear(&'static str),
}

/// Static description of how dates are presented in one locale.
#[derive(Debug)]
pub struct Locale {
    tag: &'static str,
    first_weekday: Weekday,
    /// Abbreviated weekday names, Monday first.
    weekdays: [&'static str; 7],
    months: [&'static str; 12],
    months_short: [&'static str; 12],
    order: DateOrder,
}

static LOCALES: phf::Map<&'static str, Locale> = phf_map! {
    "en" => Locale {
        tag: "en",
        first_weekday: Weekday::Sun,
        weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        months: [
            "January", "February", "March", "April", "May", "June", "July",
            "August", "September", "October", "November", "December",
        ],
        months_short: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        order: DateOrder::MonthDayYear,
    },
    "en-gb" => Locale {
        tag: "en-gb",
        first_weekday: Weekday::Mon,
        weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        months: [
            "January", "February", "March", "April", "May", "June", "July",
            "August", "September", "October", "November", "December",
        ],
        months_short: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        order: DateOrder::DayMonthYear(""),
    },
    "de" => Locale {
        tag: "de",
        first_weekday: Weekday::Mon,
        weekdays: ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
        months: [
            "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli",
            "August", "September", "Oktober", "November", "Dezember",
        ],
        months_short: [
            "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sep.", "Okt.", "Nov.",
            "Dez.",
        ],
        order: DateOrder::DayMonthYear("."),
    },
    "fr" => Locale {
        tag: "fr",
        first_weekday: Weekday::Mon,
        weekdays: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
        months: [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet",
            "août", "septembre", "octobre", "novembre", "décembre",
        ],
        months_short: [
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
            "nov.", "déc.",
        ],
        order: DateOrder::DayMonthYear(""),
    },
    "pl" => Locale {
        tag: "pl",
        first_weekday: Weekday::Mon,
        weekdays: ["pon", "wt", "śr", "czw", "pt", "sob", "ndz"],
        months: [
            "styczeń", "luty", "marzec", "kwiecień", "maj", "czerwiec", "lipiec",
            "sierpień", "wrzesień", "październik", "listopad", "grudzień",
        ],
        months_short: [
            "sty", "lut", "mar", "kwi", "maj", "cze", "lip", "sie", "wrz", "paź", "lis", "gru",
        ],
        order: DateOrder::DayMonthYear(""),
    },
};

pub const DEFAULT_LOCALE: &str = "en";

impl Locale {
    /// Finds a locale by tag. `de_DE` and `de-DE` resolve to `de` unless a
    /// region specific entry exists.
    pub fn lookup(tag: &str) -> Result<&'static Locale> {
        let normalized = tag.trim().to_lowercase().replace('_', "-");

        if let Some(locale) = LOCALES.get(normalized.as_str()) {
            return Ok(locale);
        }

        normalized
            .split('-')
            .next()
            .and_then(|lang| LOCALES.get(lang))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::LocaleUnknown,
                    &format!("'{}', known are {}", tag, Self::available().join(", ")),
                )
            })
    }

    /// Tags of all known locales, sorted.
    pub fn available() -> impl Iterator<Item = &'static str> {
        LOCALES.keys().copied().sorted()
    }

    /// Like `lookup`, but unknown tags fall back to the default locale.
    pub fn for_tag(tag: &str) -> &'static Locale {
        match Self::lookup(tag) {
            Ok(locale) => locale,
            Err(e) => {
                log::warn!("{}, falling back to '{}'", e, DEFAULT_LOCALE);
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> &'static Locale {
        &LOCALES[DEFAULT_LOCALE]
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Column of `date` in a week row starting at the locale's first weekday.
    pub fn weekday_index(&self, date: &NaiveDate) -> usize {
        let day = date.weekday().num_days_from_monday();
        let first = self.first_weekday.num_days_from_monday();
        ((day + 7 - first) % 7) as usize
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        self.weekdays[weekday.num_days_from_monday() as usize]
    }

    pub fn month_name(&self, month0: u32) -> &'static str {
        self.months[month0 as usize % 12]
    }

    /// `January 2024`
    pub fn month_title(&self, date: &NaiveDate) -> String {
        format!("{} {}", self.month_name(date.month0()), date.year())
    }

    /// Short form, `Jan 2, 2024`.
    pub fn short_date(&self, date: &NaiveDate) -> String {
        self.compose(date, self.months_short[date.month0() as usize])
    }

    /// Long form, `January 2, 2024`.
    pub fn long_date(&self, date: &NaiveDate) -> String {
        self.compose(date, self.months[date.month0() as usize])
    }

    /// Short form with weekday, `Mon, Jan 2, 2024`.
    pub fn weekday_date(&self, date: &NaiveDate) -> String {
        format!(
            "{}, {}",
            self.weekday_name(date.weekday()),
            self.short_date(date)
        )
    }

    fn compose(&self, date: &NaiveDate, month: &str) -> String {
        match self.order {
            DateOrder::MonthDayYear => format!("{} {}, {}", month, date.day(), date.year()),
            DateOrder::DayMonthYear(suffix) => {
                format!("{}{} {} {}", date.day(), suffix, month, date.year())
            }
        }
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for Locale {}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lookup_normalizes_tags() {
        assert_eq!(Locale::lookup("de_DE").unwrap().tag(), "de");
        assert_eq!(Locale::lookup("EN-GB").unwrap().tag(), "en-gb");
        assert_eq!(Locale::lookup("en-US").unwrap().tag(), "en");
        let err = Locale::lookup("xx").unwrap_err();
        assert!(err.to_string().contains("de, en, en-gb, fr, pl"));
    }

    #[test]
    fn unknown_tag_falls_back() {
        assert_eq!(Locale::for_tag("tlh").tag(), DEFAULT_LOCALE);
    }

    #[test]
    fn weekday_index_honors_first_weekday() {
        // 2024-01-07 is a Sunday
        let sunday = date(2024, 1, 7);
        assert_eq!(Locale::for_tag("en").weekday_index(&sunday), 0);
        assert_eq!(Locale::for_tag("de").weekday_index(&sunday), 6);
    }

    #[test]
    fn formats() {
        let en = Locale::for_tag("en");
        let d = date(2024, 1, 2);
        assert_eq!(en.short_date(&d), "Jan 2, 2024");
        assert_eq!(en.long_date(&d), "January 2, 2024");
        assert_eq!(en.weekday_date(&d), "Tue, Jan 2, 2024");
        assert_eq!(en.month_title(&d), "January 2024");

        let de = Locale::for_tag("de");
        assert_eq!(de.long_date(&d), "2. Januar 2024");
        assert_eq!(de.short_date(&d), "2. Jan. 2024");
    }
}
