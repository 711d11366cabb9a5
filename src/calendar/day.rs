use chrono::{Datelike, NaiveDate};
use derive_more::Constructor;
use std::fmt::Display;

use super::CalendarEvent;
use crate::period::DateRange;

/// Visual classification of a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayState {
    pub today: bool,
    pub disabled: bool,
    pub selected_first: bool,
    pub selected_last: bool,
    pub in_range: bool,
}

impl DayState {
    pub fn selected(&self) -> bool {
        self.selected_first || self.selected_last
    }

    pub fn highlighted(&self) -> bool {
        self.selected() || self.in_range
    }
}

#[derive(Debug, Clone, Copy, Constructor)]
pub struct DayCell {
    date: NaiveDate,
    today: bool,
    disabled: bool,
    highlight: Option<DateRange>,
}

impl DayCell {
    pub const CELL_HEIGHT: usize = 1;
    pub const CELL_WIDTH: usize = 4;

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn state(&self) -> DayState {
        let mut state = DayState {
            today: self.today,
            disabled: self.disabled,
            ..DayState::default()
        };

        if let Some(range) = &self.highlight {
            state.selected_first = self.date == range.start();
            state.selected_last = self.date == range.end();
            state.in_range = range.strictly_contains(&self.date);
        }

        state
    }

    /// Disabled days swallow clicks.
    pub fn click(&self) -> Option<CalendarEvent> {
        if self.disabled {
            None
        } else {
            Some(CalendarEvent::SelectDate(self.date))
        }
    }

    /// Entering a disabled day counts as leaving the calendar, so a
    /// highlight never stretches into disabled territory.
    pub fn hover(&self) -> CalendarEvent {
        if self.disabled {
            CalendarEvent::LeaveCalendar
        } else {
            CalendarEvent::HoverDate(self.date)
        }
    }
}

impl Display for DayCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();

        let left = if state.selected_first {
            '['
        } else if state.today {
            '*'
        } else {
            ' '
        };

        let right = if state.selected_last { ']' } else { ' ' };

        write!(f, "{}{:>2}{}", left, self.date.day(), right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range() -> Option<DateRange> {
        Some(DateRange::new(date(2024, 1, 10), date(2024, 1, 15)))
    }

    #[test]
    fn classification_against_highlight() {
        let first = DayCell::new(date(2024, 1, 10), false, false, range()).state();
        assert!(first.selected_first && first.selected() && !first.in_range);

        let mid = DayCell::new(date(2024, 1, 12), false, false, range()).state();
        assert!(mid.in_range && !mid.selected());

        let last = DayCell::new(date(2024, 1, 15), false, false, range()).state();
        assert!(last.selected_last && !last.in_range);

        let outside = DayCell::new(date(2024, 1, 16), true, false, range()).state();
        assert!(!outside.highlighted());
        assert!(outside.today);
    }

    #[test]
    fn single_day_highlight_is_first_and_last() {
        let d = date(2024, 1, 10);
        let state = DayCell::new(d, false, false, Some(DateRange::day(d))).state();
        assert!(state.selected_first && state.selected_last && !state.in_range);
    }

    #[test]
    fn disabled_cell_ignores_click_and_reports_leave() {
        let cell = DayCell::new(date(2024, 1, 10), false, true, None);
        assert_eq!(cell.click(), None);
        assert_eq!(cell.hover(), CalendarEvent::LeaveCalendar);

        let cell = DayCell::new(date(2024, 1, 10), false, false, None);
        assert_eq!(cell.click(), Some(CalendarEvent::SelectDate(date(2024, 1, 10))));
        assert_eq!(cell.hover(), CalendarEvent::HoverDate(date(2024, 1, 10)));
    }

    #[test]
    fn display_marks_endpoints() {
        let cell = DayCell::new(date(2024, 1, 10), false, false, range());
        assert_eq!(cell.to_string(), "[10 ");
        let cell = DayCell::new(date(2024, 1, 5), true, false, None);
        assert_eq!(cell.to_string(), "* 5 ");
    }
}
