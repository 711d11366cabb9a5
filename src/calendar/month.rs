use chrono::NaiveDate;

use super::day::DayCell;
use super::grid::{MonthBounds, MonthGrid, DAYS_PER_WEEK};
use super::header::weekday_labels;
use super::CalendarEvent;
use crate::locale::Locale;
use crate::period::DateRange;

/// What a month needs to know from its calendar to classify its days.
pub struct CellContext<'a> {
    pub today: NaiveDate,
    pub highlight_today: bool,
    pub selected: Option<DateRange>,
    pub is_disabled: &'a dyn Fn(&NaiveDate) -> bool,
}

pub type CellRow = [Option<DayCell>; DAYS_PER_WEEK];

/// Header plus day grid of one month.
#[derive(Debug, Clone)]
pub struct MonthView {
    grid: MonthGrid,
}

impl MonthView {
    pub fn new(bounds: MonthBounds, locale: &'static Locale) -> Self {
        MonthView {
            grid: MonthGrid::new(bounds, locale),
        }
    }

    /// Rebuilds the grid if the displayed month or the locale changed.
    pub fn update(&mut self, bounds: MonthBounds, locale: &'static Locale) -> bool {
        self.grid.update(bounds, locale)
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.weeks().len()
    }

    /// Weekday labels matching the grid's columns.
    pub fn header(&self) -> [&'static str; 7] {
        weekday_labels(self.grid.locale())
    }

    pub fn cell(&self, row: usize, col: usize, ctx: &CellContext) -> Option<DayCell> {
        self.grid.get(row, col).map(|date| {
            DayCell::new(
                date,
                ctx.highlight_today && date == ctx.today,
                (ctx.is_disabled)(&date),
                ctx.selected,
            )
        })
    }

    pub fn cells(&self, ctx: &CellContext) -> Vec<CellRow> {
        (0..self.rows())
            .map(|row| {
                let mut cells: CellRow = [None; DAYS_PER_WEEK];
                for (col, cell) in cells.iter_mut().enumerate() {
                    *cell = self.cell(row, col, ctx);
                }
                cells
            })
            .collect()
    }

    /// Padding slots outside of the month behave like leaving the calendar.
    pub fn hover(&self, row: usize, col: usize, ctx: &CellContext) -> CalendarEvent {
        self.cell(row, col, ctx)
            .map_or(CalendarEvent::LeaveCalendar, |cell| cell.hover())
    }

    pub fn click(&self, row: usize, col: usize, ctx: &CellContext) -> Option<CalendarEvent> {
        self.cell(row, col, ctx).and_then(|cell| cell.click())
    }
}
