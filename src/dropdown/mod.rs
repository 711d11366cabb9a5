//! Range selection state machine behind the period picker dropdown.
//!
//! The dropdown owns two values of the same shape: the selection, which
//! only changes through clicks, and the highlight, which follows the
//! pointer and is dropped on every selection change. Calendars only report
//! raw clicks and hovers; all interpretation happens here.

pub mod link;
pub mod options;

pub use link::{DropdownLink, HOVER_DELAY};
pub use options::{PredefinedOption, PredefinedOptions};

use chrono::NaiveDate;
use std::time::{Duration, Instant};

use crate::calendar::CalendarEvent;
use crate::locale::Locale;
use crate::period::Selection;
use crate::picker::Picker;

/// Outcome of an interaction that ends the picking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEvent {
    Choose(Selection),
    Cancel,
}

/// Cells kept free between a dropdown and the viewport's right edge.
pub const EDGE_MARGIN: u16 = 1;
/// Distance from the right edge below which a shifted dropdown is left alone.
const EDGE_SLACK: i32 = 1;

/// Horizontal offset for a freshly opened dropdown placed at `left`.
///
/// If its right edge sticks out of the viewport, or it was shifted left
/// before and now has room again, returns the new (never positive) offset.
pub fn clamp_left(left: i32, width: u16, viewport_width: u16, margin: u16) -> Option<i32> {
    let right = left + i32::from(width);
    let limit = i32::from(viewport_width) - i32::from(margin);

    if right > limit || (left < 0 && right + EDGE_SLACK < limit) {
        Some((left + limit - right).min(0))
    } else {
        None
    }
}

pub struct Dropdown {
    initial: Selection,
    value: Selection,
    highlight: Selection,
    options: PredefinedOptions,
    links: Vec<DropdownLink>,
    picker: Picker,
    locale: &'static Locale,
    open: bool,
}

impl Dropdown {
    pub fn new(
        initial: Selection,
        locale: &'static Locale,
        today: NaiveDate,
        overall_from: Option<NaiveDate>,
        overall_to: Option<NaiveDate>,
        hover_delay: Duration,
    ) -> Self {
        let options = PredefinedOptions::new(today, overall_from, overall_to);
        let links = options
            .iter()
            .map(|(option, _)| DropdownLink::new(*option, hover_delay))
            .collect();

        let mut dropdown = Dropdown {
            initial,
            value: initial,
            highlight: Selection::Empty,
            options,
            links,
            picker: Picker::new(locale, today),
            locale,
            open: false,
        };
        dropdown.sync_picker();
        dropdown
    }

    fn set_state(&mut self, value: Selection, highlight: Selection) {
        if value != self.value {
            log::debug!("selection {:?} -> {:?}", self.value, value);
        }
        self.value = value;
        self.highlight = highlight;
        self.sync_picker();
    }

    fn set_highlight(&mut self, highlight: Selection) {
        self.highlight = highlight;
        self.sync_picker();
    }

    fn sync_picker(&mut self) {
        self.picker.set_selected(self.displayed());
    }

    fn leave_options(&mut self) {
        for link in self.links.iter_mut() {
            link.leave();
        }
    }

    /// Takes over new values from the owner.
    ///
    /// The selection falls back to `initial` if it changed or the dropdown
    /// is being closed. Opening or closing drops any pending option hover
    /// and any highlight. Returns `true` if the dropdown was just opened.
    pub fn receive(&mut self, initial: Selection, open: bool) -> bool {
        let closing = self.open && !open;
        let opening = !self.open && open;

        if closing || opening {
            self.leave_options();
        }
        if initial != self.initial || closing {
            self.initial = initial;
            self.set_state(initial, Selection::Empty);
        } else if opening {
            self.set_highlight(Selection::Empty);
        }
        self.open = open;

        opening
    }

    pub fn set_locale(&mut self, locale: &'static Locale) {
        self.locale = locale;
        self.picker.set_locale(locale);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn value(&self) -> Selection {
        self.value
    }

    pub fn highlight(&self) -> Selection {
        self.highlight
    }

    pub fn initial(&self) -> Selection {
        self.initial
    }

    /// What the calendars show: the highlight if there is one, else the selection.
    pub fn displayed(&self) -> Selection {
        self.highlight.or(self.value)
    }

    pub fn options(&self) -> &PredefinedOptions {
        &self.options
    }

    pub fn links(&self) -> &[DropdownLink] {
        &self.links
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut Picker {
        &mut self.picker
    }

    /// Apply is only possible with something selected.
    pub fn can_confirm(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn summary(&self) -> Option<String> {
        self.displayed().summary(self.locale)
    }

    pub fn click_date(&mut self, date: NaiveDate) {
        let value = match self.value {
            Selection::Empty => Selection::Single(date),
            Selection::Single(v) if date == v => Selection::Empty,
            Selection::Single(v) => Selection::range(v, date),
            Selection::Range(range) if date == range.start() => Selection::Single(range.end()),
            Selection::Range(range) if date == range.end() => Selection::Single(range.start()),
            Selection::Range(_) => Selection::Single(date),
        };

        self.set_state(value, Selection::Empty);
    }

    pub fn hover_date(&mut self, date: NaiveDate) {
        match self.value {
            Selection::Empty => self.set_highlight(Selection::Single(date)),
            Selection::Single(v) => self.set_highlight(Selection::range(v, date)),
            // picking is complete, nothing to preview
            Selection::Range(_) => {}
        }
    }

    /// The pointer left the area where dates can be picked.
    pub fn leave(&mut self) {
        self.set_highlight(Selection::Empty);
    }

    /// A click on the dropdown outside of anything clickable deselects all.
    pub fn click_outside(&mut self) {
        self.set_state(Selection::Empty, Selection::Empty);
    }

    pub fn handle_calendar(&mut self, event: CalendarEvent) {
        match event {
            CalendarEvent::SelectDate(date) => self.click_date(date),
            CalendarEvent::HoverDate(date) => self.hover_date(date),
            CalendarEvent::LeaveCalendar => self.leave(),
            // month changes are kept by the picker itself
            CalendarEvent::ChangeMonth { .. } => {}
        }
    }

    /// Picking a predefined option finalizes right away.
    pub fn pick_option(&mut self, option: PredefinedOption) -> Option<DropdownEvent> {
        let value = self.options.get(option)?;
        if let Some(link) = self.links.iter_mut().find(|l| l.option() == option) {
            link.click();
        }

        self.set_state(value, Selection::Empty);
        log::info!("picked '{}': {}", option, value);
        Some(DropdownEvent::Choose(value))
    }

    pub fn hover_option(&mut self, option: PredefinedOption) {
        if let Some(value) = self.options.get(option) {
            self.set_highlight(value);
        }
    }

    pub fn enter_option(&mut self, option: PredefinedOption, now: Instant) {
        if let Some(link) = self.links.iter_mut().find(|l| l.option() == option) {
            link.enter(now);
        }
    }

    pub fn leave_option(&mut self, option: PredefinedOption) {
        if let Some(link) = self.links.iter_mut().find(|l| l.option() == option) {
            link.leave();
        }
    }

    /// Fires option hovers whose delay has passed. A closed dropdown has
    /// nothing to highlight.
    pub fn tick(&mut self, now: Instant) {
        if !self.open {
            return;
        }

        let fired: Vec<PredefinedOption> = self
            .links
            .iter_mut()
            .filter_map(|link| link.poll(now))
            .collect();

        for option in fired {
            self.hover_option(option);
        }
    }

    pub fn confirm(&mut self) -> Option<DropdownEvent> {
        if !self.can_confirm() {
            return None;
        }

        self.leave_options();
        self.set_highlight(Selection::Empty);
        log::info!("confirmed {}", self.value);
        Some(DropdownEvent::Choose(self.value))
    }

    pub fn cancel(&mut self) -> DropdownEvent {
        let initial = self.initial;
        self.leave_options();
        self.set_state(initial, Selection::Empty);
        DropdownEvent::Cancel
    }
}
