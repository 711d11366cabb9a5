use chrono::NaiveDate;
use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use crate::calendar::{Calendar, DayCell, DayState};

use super::{Focus, Theme, MONTH_WIDTH};

/// One calendar of the picker: title with month buttons, weekday header
/// and up to six weeks of days.
pub struct MonthPane<'a> {
    calendar: &'a Calendar,
    pointer: Option<NaiveDate>,
    theme: &'a Theme,
}

impl<'a> MonthPane<'a> {
    const ROWS: usize = 6;
    const HEADER_ROWS: usize = 2;

    pub fn new(calendar: &'a Calendar, theme: &'a Theme) -> Self {
        MonthPane {
            calendar,
            pointer: None,
            theme,
        }
    }

    pub fn pointer(mut self, pointer: NaiveDate, focus: Focus) -> Self {
        if focus == Focus::Calendar {
            self.pointer = Some(pointer);
        }
        self
    }

    fn day_style(&self, state: &DayState) -> StyleModifier {
        if state.disabled {
            self.theme.disabled_style
        } else if state.selected() {
            self.theme.selected_style
        } else if state.in_range {
            self.theme.range_style
        } else if state.today {
            self.theme.today_style.format(self.theme.today_text_style)
        } else {
            self.theme.day_style
        }
    }

    fn title_line(&self) -> String {
        let props = self.calendar.props();
        let prev = if props.render_prev_button { '«' } else { ' ' };
        let next = if props.render_next_button { '»' } else { ' ' };

        format!(
            "{}{:^width$}{}",
            prev,
            self.calendar.title(),
            next,
            width = MONTH_WIDTH - 2
        )
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(MONTH_WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::ROWS * DayCell::CELL_HEIGHT),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.theme;

        let mut cursor = Cursor::new(&mut window)
            .wrapping_mode(WrappingMode::Wrap)
            .style_modifier(theme.title_style.format(theme.title_text_style));

        if let Err(e) = write!(&mut cursor, "{}", self.title_line()) {
            log::warn!("Error while writing month title: {}", e);
        }

        cursor.set_style_modifier(theme.weekday_style);
        for label in self.calendar.view().header().iter() {
            let short: String = label.chars().take(DayCell::CELL_WIDTH - 1).collect();
            if let Err(e) = write!(&mut cursor, "{:>width$}", short, width = DayCell::CELL_WIDTH) {
                log::warn!("Error while writing weekday: {}", e);
            }
        }

        for row in self.calendar.cells() {
            for cell in row.iter() {
                match cell {
                    Some(cell) => {
                        cursor.set_style_modifier(self.day_style(&cell.state()));
                        if self.pointer == Some(cell.date()) {
                            cursor.apply_style_modifier(theme.pointer_style);
                        }
                        if let Err(e) = write!(&mut cursor, "{}", cell) {
                            log::warn!("Error while writing day: {}", e);
                        }
                    }
                    None => {
                        cursor.set_style_modifier(theme.day_style);
                        if let Err(e) = write!(&mut cursor, "{:w$}", "", w = DayCell::CELL_WIDTH) {
                            log::warn!("Error while writing padding: {}", e);
                        }
                    }
                }
            }
        }
    }
}
