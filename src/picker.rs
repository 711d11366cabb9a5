//! Two adjacent calendars moved by one shared month cursor.

use chrono::NaiveDate;

use crate::calendar::{Calendar, CalendarEvent, CalendarProps, MonthCursor};
use crate::locale::Locale;
use crate::period::Selection;

/// Months back from the cursor shown by each calendar, left to right.
pub const OFFSETS: [u32; 2] = [1, 0];

pub struct Picker {
    cursor: MonthCursor,
    locale: &'static Locale,
    selected: Selection,
    calendars: Vec<Calendar>,
}

impl Picker {
    pub fn new(locale: &'static Locale, today: NaiveDate) -> Self {
        let cursor = MonthCursor::from(today);
        let calendars = OFFSETS
            .iter()
            .map(|&offset| {
                Calendar::new(
                    Self::calendar_props(cursor, offset, locale, Selection::Empty),
                    today,
                )
            })
            .collect();

        Picker {
            cursor,
            locale,
            selected: Selection::Empty,
            calendars,
        }
    }

    fn calendar_props(
        cursor: MonthCursor,
        offset: u32,
        locale: &'static Locale,
        selected: Selection,
    ) -> CalendarProps {
        let shown = cursor.shift(-(offset as i32));

        CalendarProps {
            selected: selected.into(),
            locale,
            year: Some(shown.year()),
            month0: Some(shown.month0()),
            disable_future: true,
            highlight_today: false,
            listens_change_month: true,
            ..CalendarProps::default()
        }
    }

    fn refresh(&mut self) {
        let (cursor, locale, selected) = (self.cursor, self.locale, self.selected);
        for (calendar, &offset) in self.calendars.iter_mut().zip(OFFSETS.iter()) {
            calendar.set_props(Self::calendar_props(cursor, offset, locale, selected));
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    pub fn set_selected(&mut self, selected: Selection) {
        if self.selected != selected {
            self.selected = selected;
            self.refresh();
        }
    }

    pub fn set_locale(&mut self, locale: &'static Locale) {
        if self.locale != locale {
            self.locale = locale;
            self.refresh();
        }
    }

    /// A calendar reported a month change; store it shifted by that
    /// calendar's offset so both stay adjacent.
    pub fn change_month(&mut self, offset: u32, year: i32, month0: u32) {
        self.cursor = MonthCursor::from_month0(year, month0 as i32 + offset as i32);
        log::debug!(
            "picker moved to {}-{:02}",
            self.cursor.year(),
            self.cursor.month0() + 1
        );
        self.refresh();
    }

    /// Presses the prev (-1) or next (+1) button of the calendar at `index`.
    pub fn navigate(&mut self, index: usize, direction: i32) {
        let event = match self.calendars.get_mut(index) {
            Some(calendar) if direction < 0 => calendar.prev_month(),
            Some(calendar) => calendar.next_month(),
            None => None,
        };

        if let Some(CalendarEvent::ChangeMonth { year, month0 }) = event {
            self.change_month(OFFSETS[index], year, month0);
        }
    }

    /// Index of the calendar displaying `date`.
    pub fn calendar_of(&self, date: &NaiveDate) -> Option<usize> {
        self.calendars
            .iter()
            .position(|calendar| calendar.bounds().contains(date))
    }

    pub fn hover_date(&self, date: &NaiveDate) -> CalendarEvent {
        self.calendar_of(date)
            .map_or(CalendarEvent::LeaveCalendar, |idx| {
                self.calendars[idx].hover_date(date)
            })
    }

    pub fn click_date(&self, date: &NaiveDate) -> Option<CalendarEvent> {
        self.calendar_of(date)
            .and_then(|idx| self.calendars[idx].click_date(date))
    }

    pub fn first_shown(&self) -> NaiveDate {
        self.calendars[0].bounds().start()
    }

    pub fn last_shown(&self) -> NaiveDate {
        self.calendars[self.calendars.len() - 1].bounds().end()
    }
}
