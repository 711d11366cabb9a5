//! Single month calendar with optional month navigation.

pub mod cursor;
pub mod day;
pub mod grid;
pub mod header;
pub mod month;

pub use cursor::MonthCursor;
pub use day::{DayCell, DayState};
pub use grid::{days_of_month, MonthBounds, MonthGrid, Week};
pub use month::{CellContext, CellRow, MonthView};

use chrono::NaiveDate;
use std::fmt;
use std::rc::Rc;

use crate::locale::Locale;
use crate::period::{parse_date, DateRange, Selection};

/// Events a calendar reports to whoever owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    ChangeMonth { year: i32, month0: u32 },
    SelectDate(NaiveDate),
    HoverDate(NaiveDate),
    LeaveCalendar,
}

/// Who decides which month is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// The parent listens for `ChangeMonth` and feeds year/month back in.
    Controlled,
    /// Year/month are fixed by the parent and nobody listens: navigating
    /// does nothing, so display and parent can not disagree.
    Pinned,
    /// The calendar moves its own month.
    Free,
}

impl NavigationMode {
    /// A listener always wins; pinned fields without a listener freeze the
    /// calendar; otherwise it navigates on its own.
    pub fn resolve(listens_change_month: bool, pinned: bool) -> Self {
        match (listens_change_month, pinned) {
            (true, _) => NavigationMode::Controlled,
            (false, true) => NavigationMode::Pinned,
            (false, false) => NavigationMode::Free,
        }
    }
}

/// A date handed in by a parent, either parsed already or as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl DateInput {
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Date(date) => Some(*date),
            DateInput::Text(text) => match parse_date(text) {
                Ok(date) => Some(date),
                Err(e) => {
                    log::warn!("ignoring selected date: {}", e);
                    None
                }
            },
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_owned())
    }
}

/// Selected value as handed to a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selected {
    One(DateInput),
    Pair(DateInput, DateInput),
}

impl Selected {
    /// Both ends of the selection, a single day being `[d, d]`.
    pub fn to_range(&self) -> Option<DateRange> {
        match self {
            Selected::One(input) => input.to_date().map(DateRange::day),
            Selected::Pair(a, b) => Some(DateRange::new(a.to_date()?, b.to_date()?)),
        }
    }
}

impl From<Selection> for Option<Selected> {
    fn from(sel: Selection) -> Self {
        match sel {
            Selection::Empty => None,
            Selection::Single(date) => Some(Selected::One(date.into())),
            Selection::Range(range) => Some(Selected::Pair(
                range.start().into(),
                range.end().into(),
            )),
        }
    }
}

pub type DatePredicate = Rc<dyn Fn(&NaiveDate) -> bool>;

#[derive(Clone)]
pub struct CalendarProps {
    pub selected: Option<Selected>,
    pub locale: &'static Locale,
    pub year: Option<i32>,
    pub month0: Option<u32>,
    pub render_prev_button: bool,
    pub render_next_button: bool,
    pub highlight_today: bool,
    pub disable_future: bool,
    pub disable_past: bool,
    pub is_date_disabled: Option<DatePredicate>,
    /// Whether the owner handles `ChangeMonth` events.
    pub listens_change_month: bool,
}

impl Default for CalendarProps {
    fn default() -> Self {
        CalendarProps {
            selected: None,
            locale: Locale::fallback(),
            year: None,
            month0: None,
            render_prev_button: true,
            render_next_button: true,
            highlight_today: true,
            disable_future: false,
            disable_past: false,
            is_date_disabled: None,
            listens_change_month: false,
        }
    }
}

impl fmt::Debug for CalendarProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarProps")
            .field("selected", &self.selected)
            .field("locale", &self.locale.tag())
            .field("year", &self.year)
            .field("month0", &self.month0)
            .field("disable_future", &self.disable_future)
            .field("disable_past", &self.disable_past)
            .field("is_date_disabled", &self.is_date_disabled.is_some())
            .field("listens_change_month", &self.listens_change_month)
            .finish()
    }
}

impl CalendarProps {
    pub fn pinned(&self) -> bool {
        self.year.is_some() || self.month0.is_some()
    }

    pub fn navigation_mode(&self) -> NavigationMode {
        NavigationMode::resolve(self.listens_change_month, self.pinned())
    }

    /// Month to show, missing fields are taken from `today`.
    fn bounds(&self, today: &NaiveDate) -> MonthBounds {
        let fallback = MonthCursor::from(*today);
        let year = self.year.unwrap_or_else(|| fallback.year());
        let month0 = self.month0.unwrap_or_else(|| fallback.month0());
        MonthBounds::of(MonthCursor::from_month0(year, month0 as i32))
    }
}

pub struct Calendar {
    props: CalendarProps,
    today: NaiveDate,
    bounds: MonthBounds,
    view: MonthView,
}

impl Calendar {
    pub fn new(props: CalendarProps, today: NaiveDate) -> Self {
        let bounds = props.bounds(&today);
        let view = MonthView::new(bounds, props.locale);
        Calendar {
            props,
            today,
            bounds,
            view,
        }
    }

    /// Replaces the props. The shown month is only recomputed if year, month
    /// or locale differ from before; otherwise a self navigated month stays.
    pub fn set_props(&mut self, props: CalendarProps) {
        if props.year != self.props.year
            || props.month0 != self.props.month0
            || props.locale != self.props.locale
        {
            self.bounds = props.bounds(&self.today);
        }
        self.view.update(self.bounds, props.locale);
        self.props = props;
    }

    pub fn props(&self) -> &CalendarProps {
        &self.props
    }

    pub fn bounds(&self) -> &MonthBounds {
        &self.bounds
    }

    pub fn view(&self) -> &MonthView {
        &self.view
    }

    /// `January 2024`
    pub fn title(&self) -> String {
        self.props.locale.month_title(&self.bounds.start())
    }

    /// Moves the shown month by `direction` (-1 or +1).
    ///
    /// Returns the event for the owner in controlled mode, `None` otherwise.
    pub fn navigate(&mut self, direction: i32) -> Option<CalendarEvent> {
        let target = self.bounds.cursor().shift(direction);

        match self.props.navigation_mode() {
            NavigationMode::Controlled => Some(CalendarEvent::ChangeMonth {
                year: target.year(),
                month0: target.month0(),
            }),
            NavigationMode::Pinned => {
                log::debug!("calendar is pinned to {}, ignoring navigation", self.title());
                None
            }
            NavigationMode::Free => {
                self.bounds = MonthBounds::of(target);
                self.view.update(self.bounds, self.props.locale);
                None
            }
        }
    }

    pub fn prev_month(&mut self) -> Option<CalendarEvent> {
        if self.props.render_prev_button {
            self.navigate(-1)
        } else {
            None
        }
    }

    pub fn next_month(&mut self) -> Option<CalendarEvent> {
        if self.props.render_next_button {
            self.navigate(1)
        } else {
            None
        }
    }

    /// A day is disabled if any of the configured rules says so.
    pub fn is_date_disabled(&self, date: &NaiveDate) -> bool {
        if self.props.disable_future && date > &self.today {
            return true;
        }

        if self.props.disable_past && date < &self.today {
            return true;
        }

        match &self.props.is_date_disabled {
            Some(predicate) => predicate(date),
            None => false,
        }
    }

    pub fn selected_range(&self) -> Option<DateRange> {
        self.props.selected.as_ref().and_then(Selected::to_range)
    }

    fn with_context<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&MonthView, &CellContext) -> T,
    {
        let is_disabled = |date: &NaiveDate| self.is_date_disabled(date);
        let ctx = CellContext {
            today: self.today,
            highlight_today: self.props.highlight_today,
            selected: self.selected_range(),
            is_disabled: &is_disabled,
        };
        f(&self.view, &ctx)
    }

    pub fn cells(&self) -> Vec<CellRow> {
        self.with_context(|view, ctx| view.cells(ctx))
    }

    pub fn hover(&self, row: usize, col: usize) -> CalendarEvent {
        self.with_context(|view, ctx| view.hover(row, col, ctx))
    }

    pub fn click(&self, row: usize, col: usize) -> Option<CalendarEvent> {
        self.with_context(|view, ctx| view.click(row, col, ctx))
    }

    pub fn leave(&self) -> CalendarEvent {
        CalendarEvent::LeaveCalendar
    }

    /// Hover event for a date, whether or not it is shown in this month.
    pub fn hover_date(&self, date: &NaiveDate) -> CalendarEvent {
        match self.view.grid().position(date) {
            Some((row, col)) => self.hover(row, col),
            None => CalendarEvent::LeaveCalendar,
        }
    }

    pub fn click_date(&self, date: &NaiveDate) -> Option<CalendarEvent> {
        self.view
            .grid()
            .position(date)
            .and_then(|(row, col)| self.click(row, col))
    }
}
