use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::ops::{Add, Sub};

/// Year and month shown by a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCursor {
    index: Month,
    year: i32,
}

impl MonthCursor {
    pub fn new(index: Month, year: i32) -> Self {
        MonthCursor { index, year }
    }

    /// Builds a cursor from a zero based month, rolling over into
    /// neighbouring years for values outside of `0..12`.
    pub fn from_month0(year: i32, month0: i32) -> Self {
        let total = year * 12 + month0;
        let index = Month::from_i32(total.rem_euclid(12) + 1).unwrap_or(Month::January);

        MonthCursor {
            index,
            year: total.div_euclid(12),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.index
    }

    /// Month in `0..=11`.
    pub fn month0(&self) -> u32 {
        self.index.number_from_month() - 1
    }

    pub fn next(&self) -> Self {
        self.shift(1)
    }

    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    pub fn shift(&self, months: i32) -> Self {
        Self::from_month0(self.year, self.month0() as i32 + months)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.index.number_from_month(), 1)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl<T: Datelike> From<T> for MonthCursor {
    fn from(m: T) -> Self {
        MonthCursor::from_month0(m.year(), m.month0() as i32)
    }
}

impl Add<i32> for MonthCursor {
    type Output = MonthCursor;
    fn add(self, rhs: i32) -> Self::Output {
        self.shift(rhs)
    }
}

impl Sub<i32> for MonthCursor {
    type Output = MonthCursor;
    fn sub(self, rhs: i32) -> Self::Output {
        self.shift(-rhs)
    }
}

impl PartialOrd for MonthCursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthCursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.year
            .cmp(&other.year)
            .then(self.month0().cmp(&other.month0()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollover() {
        let jan = MonthCursor::new(Month::January, 2024);
        assert_eq!(jan.prev(), MonthCursor::new(Month::December, 2023));
        assert_eq!(jan - 13, MonthCursor::new(Month::December, 2022));

        let dec = MonthCursor::new(Month::December, 2024);
        assert_eq!(dec.next(), MonthCursor::new(Month::January, 2025));
        assert_eq!(dec + 25, MonthCursor::new(Month::January, 2027));
    }

    #[test]
    fn from_month0_normalizes() {
        assert_eq!(
            MonthCursor::from_month0(2024, 12),
            MonthCursor::new(Month::January, 2025)
        );
        assert_eq!(
            MonthCursor::from_month0(2024, -1),
            MonthCursor::new(Month::December, 2023)
        );
        assert_eq!(MonthCursor::from_month0(2024, 5).month0(), 5);
    }

    #[test]
    fn ordering() {
        let a = MonthCursor::new(Month::December, 2023);
        let b = MonthCursor::new(Month::January, 2024);
        assert!(a < b);
        assert_eq!(a.next(), b);
    }
}
