use chrono::{Duration, NaiveDate};
use std::time::Instant;

use crate::calendar::DayCell;
use crate::dropdown::{clamp_left, DropdownEvent, PredefinedOption, EDGE_MARGIN};
use crate::field::{FieldEvent, PeriodField};

use unsegen::base::style::*;

/// Columns taken by the predefined option list.
pub const SIDEBAR_WIDTH: usize = 16;
/// Columns taken by a single month.
pub const MONTH_WIDTH: usize = 7 * DayCell::CELL_WIDTH;
pub const DROPDOWN_WIDTH: usize = SIDEBAR_WIDTH + 2 * MONTH_WIDTH + 2;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Focus {
    Calendar,
    Sidebar,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub today_style: StyleModifier,
    pub today_text_style: TextFormatModifier,
    pub disabled_style: StyleModifier,
    pub selected_style: StyleModifier,
    pub range_style: StyleModifier,
    pub pointer_style: StyleModifier,
    pub title_style: StyleModifier,
    pub title_text_style: TextFormatModifier,
    pub weekday_style: StyleModifier,
    pub option_style: StyleModifier,
    pub option_focus_style: StyleModifier,
    pub button_style: StyleModifier,
    pub button_disabled_style: StyleModifier,
    pub summary_style: StyleModifier,
    pub toggle_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: StyleModifier::default(),
            today_style: StyleModifier::default().invert(true),
            today_text_style: TextFormatModifier::default().italic(true),
            disabled_style: StyleModifier::default().fg_color(Color::LightBlack),
            selected_style: StyleModifier::default().bg_color(Color::Blue),
            range_style: StyleModifier::default().fg_color(Color::Blue),
            pointer_style: StyleModifier::default().invert(true),
            title_style: StyleModifier::default().fg_color(Color::Yellow),
            title_text_style: TextFormatModifier::default().bold(true),
            weekday_style: StyleModifier::default().fg_color(Color::Yellow),
            option_style: StyleModifier::default(),
            option_focus_style: StyleModifier::default().invert(true),
            button_style: StyleModifier::default().bg_color(Color::Blue),
            button_disabled_style: StyleModifier::default().fg_color(Color::LightBlack),
            summary_style: StyleModifier::default().fg_color(Color::LightRed),
            toggle_style: StyleModifier::default().invert(true),
        }
    }
}

/// State of the interactive field, with the keyboard standing in for the
/// pointer: `pointer` is the day the pointer rests on while the calendars
/// have focus.
pub struct Context {
    pub theme: Theme,
    field: PeriodField,
    focus: Focus,
    pointer: NaiveDate,
    option_index: usize,
    offset: i32,
    today: NaiveDate,
    last_change: Option<FieldEvent>,
}

impl Context {
    pub fn new(field: PeriodField, today: NaiveDate) -> Self {
        Context {
            theme: Theme::default(),
            field,
            focus: Focus::Calendar,
            pointer: today,
            option_index: 0,
            offset: 0,
            today,
            last_change: None,
        }
    }

    pub fn field(&self) -> &PeriodField {
        &self.field
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn pointer(&self) -> NaiveDate {
        self.pointer
    }

    pub fn option_index(&self) -> usize {
        self.option_index
    }

    /// Column of the dropdown relative to the toggle, fixed on open.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Column of the toggle. A `pull_right` field sits at the right edge of
    /// the viewport, anything else at the left.
    pub fn anchor(&self, viewport_width: u16) -> usize {
        if self.field.pull_right() {
            usize::from(viewport_width)
                .saturating_sub(self.toggle_width() + usize::from(EDGE_MARGIN))
        } else {
            0
        }
    }

    pub fn last_change(&self) -> Option<&FieldEvent> {
        self.last_change.as_ref()
    }

    pub fn toggle_width(&self) -> usize {
        self.field.toggle_text().chars().count() + 4
    }

    /// Fires pending option hovers.
    pub fn update(&mut self, now: Instant) {
        self.field.dropdown_mut().tick(now);
    }

    pub fn open(&mut self, viewport_width: u16) {
        if !self.field.set_open(true) {
            return;
        }

        let anchor = self.anchor(viewport_width) as i32;
        let natural = if self.field.pull_right() {
            anchor + self.toggle_width() as i32 - DROPDOWN_WIDTH as i32
        } else {
            anchor
        };
        let left = clamp_left(natural, DROPDOWN_WIDTH as u16, viewport_width, EDGE_MARGIN)
            .unwrap_or(natural);
        self.offset = left - anchor;

        self.focus = Focus::Calendar;
        self.option_index = 0;
        self.pointer = self
            .field
            .value()
            .as_range()
            .map_or(self.today, |range| range.end());
        self.hover_pointer();
    }

    fn finish(&mut self, event: DropdownEvent) {
        if let Some(option) = self.current_option() {
            self.field.dropdown_mut().leave_option(option);
        }
        self.focus = Focus::Calendar;

        if let Some(change) = self.field.handle(event) {
            log::info!("period changed: {:?}", change);
            self.last_change = Some(change);
        }
    }

    pub fn cancel(&mut self) {
        let event = self.field.dropdown_mut().cancel();
        self.finish(event);
    }

    pub fn apply(&mut self) {
        if let Some(event) = self.field.dropdown_mut().confirm() {
            self.finish(event);
        }
    }

    pub fn click_outside(&mut self) {
        self.field.dropdown_mut().click_outside();
    }

    fn hover_pointer(&mut self) {
        let event = self.field.dropdown().picker().hover_date(&self.pointer);
        self.field.dropdown_mut().handle_calendar(event);
    }

    /// Moves the pointer by `days`, turning the months if it leaves them.
    pub fn move_pointer(&mut self, days: i64) {
        if self.focus != Focus::Calendar {
            return;
        }

        self.pointer = self.pointer + Duration::days(days);

        let picker = self.field.dropdown_mut().picker_mut();
        if self.pointer < picker.first_shown() {
            picker.navigate(0, -1);
        } else if self.pointer > picker.last_shown() {
            picker.navigate(1, 1);
        }

        self.hover_pointer();
    }

    pub fn click_pointer(&mut self) {
        if self.focus != Focus::Calendar {
            return;
        }

        if let Some(event) = self.field.dropdown().picker().click_date(&self.pointer) {
            self.field.dropdown_mut().handle_calendar(event);
        }
    }

    fn keep_pointer_shown(&mut self) {
        let picker = self.field.dropdown().picker();
        let (first, last) = (picker.first_shown(), picker.last_shown());
        self.pointer = self.pointer.max(first).min(last);
        if self.focus == Focus::Calendar {
            self.hover_pointer();
        }
    }

    pub fn prev_month(&mut self) {
        self.field.dropdown_mut().picker_mut().navigate(0, -1);
        self.keep_pointer_shown();
    }

    pub fn next_month(&mut self) {
        let last = self.field.dropdown().picker().calendars().len() - 1;
        self.field.dropdown_mut().picker_mut().navigate(last, 1);
        self.keep_pointer_shown();
    }

    fn current_option(&self) -> Option<PredefinedOption> {
        self.field
            .dropdown()
            .links()
            .get(self.option_index)
            .map(|link| link.option())
    }

    pub fn toggle_focus(&mut self, now: Instant) {
        match self.focus {
            Focus::Calendar => {
                self.field.dropdown_mut().leave();
                self.focus = Focus::Sidebar;
                if let Some(option) = self.current_option() {
                    self.field.dropdown_mut().enter_option(option, now);
                }
            }
            Focus::Sidebar => {
                if let Some(option) = self.current_option() {
                    self.field.dropdown_mut().leave_option(option);
                }
                self.focus = Focus::Calendar;
                self.hover_pointer();
            }
        }
    }

    /// Moves the sidebar focus by `delta` rows.
    pub fn move_option(&mut self, delta: isize, now: Instant) {
        if self.focus != Focus::Sidebar {
            return;
        }

        let count = self.field.dropdown().links().len();
        let target = self.option_index as isize + delta;
        if target < 0 || target as usize >= count {
            return;
        }

        if let Some(option) = self.current_option() {
            self.field.dropdown_mut().leave_option(option);
        }
        self.option_index = target as usize;
        if let Some(option) = self.current_option() {
            self.field.dropdown_mut().enter_option(option, now);
        }
    }

    pub fn pick_option(&mut self) {
        if self.focus != Focus::Sidebar {
            return;
        }

        let event = self
            .current_option()
            .and_then(|option| self.field.dropdown_mut().pick_option(option));
        if let Some(event) = event {
            self.finish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dropdown::HOVER_DELAY;
    use crate::field::FieldProps;
    use crate::period::Selection;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context() -> Context {
        let today = date(2024, 3, 15);
        let field = PeriodField::new(FieldProps::from(&Config::default()), today, HOVER_DELAY);
        let mut ctx = Context::new(field, today);
        ctx.open(120);
        ctx
    }

    #[test]
    fn keyboard_range_selection() {
        let mut ctx = context();
        assert_eq!(ctx.pointer(), date(2024, 3, 15));

        ctx.move_pointer(-5);
        ctx.click_pointer();
        ctx.move_pointer(2);
        assert_eq!(
            ctx.field().dropdown().highlight(),
            Selection::range(date(2024, 3, 10), date(2024, 3, 12))
        );

        ctx.click_pointer();
        ctx.apply();
        assert!(!ctx.field().is_open());
        assert_eq!(
            ctx.last_change(),
            Some(&FieldEvent::Change {
                from: "2024-03-10".to_owned(),
                to: "2024-03-12".to_owned()
            })
        );
    }

    #[test]
    fn pointer_into_future_leaves_calendar() {
        let mut ctx = context();
        ctx.click_pointer();
        ctx.move_pointer(-1);
        assert!(!ctx.field().dropdown().highlight().is_empty());

        ctx.move_pointer(3);
        assert_eq!(ctx.field().dropdown().highlight(), Selection::Empty);
    }

    #[test]
    fn pointer_turns_months() {
        let mut ctx = context();
        ctx.move_pointer(-45);
        assert_eq!(ctx.pointer(), date(2024, 1, 30));
        assert_eq!(ctx.field().dropdown().picker().calendars()[0].title(), "January 2024");
    }

    #[test]
    fn month_buttons_keep_pointer_visible() {
        let mut ctx = context();
        ctx.prev_month();
        ctx.prev_month();
        assert_eq!(ctx.pointer(), date(2024, 1, 31));

        ctx.next_month();
        assert_eq!(ctx.field().dropdown().picker().calendars()[1].title(), "February 2024");
        assert_eq!(ctx.pointer(), date(2024, 1, 31));
    }

    #[test]
    fn sidebar_hover_is_delayed_and_pick_finalizes() {
        let start = Instant::now();
        let mut ctx = context();

        ctx.toggle_focus(start);
        assert_eq!(ctx.focus(), Focus::Sidebar);
        ctx.move_option(2, start);
        assert_eq!(ctx.option_index(), 2);

        ctx.update(start + HOVER_DELAY);
        assert_eq!(
            ctx.field().dropdown().highlight(),
            Selection::range(date(2024, 3, 9), date(2024, 3, 15))
        );

        ctx.pick_option();
        assert!(!ctx.field().is_open());
        assert_eq!(ctx.field().toggle_text(), "Mar 9, 2024 - Mar 15, 2024");
    }

    #[test]
    fn cancel_keeps_previous_value() {
        let mut ctx = context();
        ctx.click_pointer();
        ctx.cancel();
        assert!(!ctx.field().is_open());
        assert_eq!(ctx.field().value(), Selection::Empty);
        assert_eq!(ctx.last_change(), None);
    }

    #[test]
    fn pull_right_is_clamped_on_screen() {
        let today = date(2024, 3, 15);
        let mut config = Config::default();
        config.dropdown.insert("pull_right".to_owned(), true.into());

        let field = PeriodField::new(FieldProps::from(&config), today, HOVER_DELAY);
        let mut ctx = Context::new(field, today);
        ctx.open(120);

        // " Select period ▾ " is 17 columns wide
        assert_eq!(ctx.anchor(120), 102);
        // right edges of toggle and dropdown line up
        assert_eq!(ctx.offset(), 17 - DROPDOWN_WIDTH as i32);
    }

    #[test]
    fn wide_dropdown_is_shifted_left() {
        let mut ctx = context();
        ctx.cancel();

        ctx.open(60);
        assert_eq!(ctx.anchor(60), 0);
        assert_eq!(ctx.offset(), 59 - DROPDOWN_WIDTH as i32);
    }

    #[test]
    fn closing_from_sidebar_drops_pending_hover() {
        let start = Instant::now();
        let mut ctx = context();
        ctx.move_pointer(-3);
        ctx.click_pointer();
        ctx.move_pointer(2);
        ctx.click_pointer();
        ctx.apply();
        let value = ctx.field().value();

        ctx.open(120);
        ctx.toggle_focus(start);
        ctx.cancel();
        assert_eq!(ctx.focus(), Focus::Calendar);

        ctx.update(start + HOVER_DELAY);
        ctx.open(120);
        ctx.update(start + HOVER_DELAY * 2);
        assert_eq!(ctx.field().dropdown().highlight(), Selection::Empty);
        assert_eq!(ctx.field().dropdown().displayed(), value);
    }
}
