use chrono::{Datelike, Duration, Month, NaiveDate};

use super::cursor::MonthCursor;
use crate::locale::Locale;

pub const DAYS_PER_WEEK: usize = 7;

/// One row of the month grid, empty slots pad the first and last week.
pub type Week = [Option<NaiveDate>; DAYS_PER_WEEK];

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let cursor = MonthCursor::new(*month, year);
    cursor
        .next()
        .first_day()
        .signed_duration_since(cursor.first_day())
        .num_days() as u32
}

/// First and last day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthBounds {
    pub fn of(cursor: MonthCursor) -> Self {
        let start = cursor.first_day();
        let end = cursor.next().first_day() - Duration::days(1);
        MonthBounds { start, end }
    }

    pub fn containing(date: &NaiveDate) -> Self {
        Self::of(MonthCursor::from(*date))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn cursor(&self) -> MonthCursor {
        MonthCursor::from(self.start)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        &self.start <= date && date <= &self.end
    }
}

/// Lays the days from `start` to `end` out in week rows.
///
/// A new row begins whenever a day falls on the locale's first weekday,
/// so the number of rows depends on both the month and the locale.
pub fn build_weeks(start: &NaiveDate, end: &NaiveDate, locale: &Locale) -> Vec<Week> {
    let num_days = end.signed_duration_since(*start).num_days() + 1;
    if num_days <= 0 {
        return Vec::new();
    }

    let mut weeks: Vec<Week> = Vec::with_capacity((num_days as usize + 6) / DAYS_PER_WEEK);
    let mut week: Week = [None; DAYS_PER_WEEK];

    for date in start.iter_days().take(num_days as usize) {
        let col = locale.weekday_index(&date);
        if col == 0 && date != *start {
            weeks.push(week);
            week = [None; DAYS_PER_WEEK];
        }
        week[col] = Some(date);
    }
    weeks.push(week);

    weeks
}

/// Grid of a whole month, rebuilt only when its bounds or locale change.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    bounds: MonthBounds,
    locale: &'static Locale,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn new(bounds: MonthBounds, locale: &'static Locale) -> Self {
        MonthGrid {
            bounds,
            locale,
            weeks: build_weeks(&bounds.start(), &bounds.end(), locale),
        }
    }

    /// Returns whether the grid had to be rebuilt.
    pub fn update(&mut self, bounds: MonthBounds, locale: &'static Locale) -> bool {
        if self.bounds == bounds && self.locale == locale {
            return false;
        }

        log::debug!(
            "rebuilding grid for {}-{:02} ({})",
            bounds.start().year(),
            bounds.start().month(),
            locale
        );
        *self = MonthGrid::new(bounds, locale);
        true
    }

    pub fn locale(&self) -> &'static Locale {
        self.locale
    }

    pub fn bounds(&self) -> &MonthBounds {
        &self.bounds
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn get(&self, row: usize, col: usize) -> Option<NaiveDate> {
        self.weeks
            .get(row)
            .and_then(|week| week.get(col).copied().flatten())
    }

    /// Grid position of `date`, if it belongs to this month.
    pub fn position(&self, date: &NaiveDate) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(row, week)| {
            week.iter()
                .position(|d| d.as_ref() == Some(date))
                .map(|col| (row, col))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_of_month_handles_leap_years() {
        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 2023), 28);
        assert_eq!(days_of_month(&Month::December, 2023), 31);
        assert_eq!(days_of_month(&Month::April, 2023), 30);
    }

    #[test]
    fn february_2015_fits_four_rows_on_sunday_weeks() {
        // starts on a Sunday, 28 days
        let bounds = MonthBounds::of(MonthCursor::new(Month::February, 2015));
        let weeks = build_weeks(&bounds.start(), &bounds.end(), Locale::for_tag("en"));
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0][0], Some(date(2015, 2, 1)));

        // on monday based weeks the first sunday is alone in its row
        let weeks = build_weeks(&bounds.start(), &bounds.end(), Locale::for_tag("de"));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][6], Some(date(2015, 2, 1)));
        assert!(weeks[0][..6].iter().all(Option::is_none));
    }

    #[test]
    fn long_month_grows_to_six_rows() {
        // December 2024 starts on a Sunday, with monday first weeks it spans 6 rows
        let bounds = MonthBounds::of(MonthCursor::new(Month::December, 2024));
        let weeks = build_weeks(&bounds.start(), &bounds.end(), Locale::for_tag("de"));
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[5][1], Some(date(2024, 12, 31)));
        assert_eq!(weeks[5][2], None);
    }

    #[test]
    fn grid_update_only_rebuilds_on_change() {
        let en = Locale::for_tag("en");
        let bounds = MonthBounds::containing(&date(2024, 1, 10));
        let mut grid = MonthGrid::new(bounds, en);

        assert!(!grid.update(bounds, en));
        assert!(grid.update(bounds, Locale::for_tag("de")));
        assert!(grid.update(MonthBounds::containing(&date(2024, 2, 1)), Locale::for_tag("de")));
        assert_eq!(grid.position(&date(2024, 2, 1)), Some((0, 3)));
        assert_eq!(grid.get(0, 3), Some(date(2024, 2, 1)));
        assert_eq!(grid.get(0, 0), None);
    }

    proptest! {
        #[test]
        fn grid_holds_every_day_once_in_order(
            year in 1900i32..2200,
            month in 1u32..=12,
            locale in prop::sample::select(vec!["en", "de", "fr", "en-gb"]),
        ) {
            let month = Month::from_u32(month).unwrap();
            let bounds = MonthBounds::of(MonthCursor::new(month, year));
            let weeks = build_weeks(&bounds.start(), &bounds.end(), Locale::for_tag(locale));

            let days: Vec<NaiveDate> = weeks.iter().flat_map(|w| w.iter().flatten().copied()).collect();
            let expected: Vec<NaiveDate> = bounds
                .start()
                .iter_days()
                .take(days_of_month(&month, year) as usize)
                .collect();

            prop_assert_eq!(days, expected);
            prop_assert!(weeks.iter().all(|w| w.len() == DAYS_PER_WEEK));
            prop_assert!(weeks.len() <= 6);
        }
    }
}
