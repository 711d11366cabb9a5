use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use super::{Context, Focus, MonthPane, DROPDOWN_WIDTH, SIDEBAR_WIDTH};

/// Predefined options, one per row.
pub struct OptionList<'a> {
    context: &'a Context,
}

impl<'a> OptionList<'a> {
    pub fn new(context: &'a Context) -> Self {
        OptionList { context }
    }
}

impl Widget for OptionList<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(SIDEBAR_WIDTH),
            height: RowDemand::at_least(self.context.field().dropdown().links().len()),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let field = self.context.field();
        let mut cursor = Cursor::new(&mut window);

        for (idx, link) in field.dropdown().links().iter().enumerate() {
            let focused = self.context.focus() == Focus::Sidebar && idx == self.context.option_index();
            cursor.set_style_modifier(if focused {
                theme.option_focus_style
            } else {
                theme.option_style
            });

            let label = field.translate(link.option().label());
            if let Err(e) = write!(&mut cursor, " {}", label) {
                log::warn!("Error while writing option: {}", e);
            }
            cursor.fill_and_wrap_line();
        }
    }
}

/// Summary of the shown period plus the close and apply buttons.
pub struct Footer<'a> {
    context: &'a Context,
}

impl<'a> Footer<'a> {
    pub fn new(context: &'a Context) -> Self {
        Footer { context }
    }
}

impl Widget for Footer<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(DROPDOWN_WIDTH),
            height: RowDemand::exact(2),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let field = self.context.field();
        let dropdown = field.dropdown();
        let mut cursor = Cursor::new(&mut window);

        cursor.set_style_modifier(theme.summary_style);
        if let Err(e) = write!(&mut cursor, "{}", dropdown.summary().unwrap_or_default()) {
            log::warn!("Error while writing summary: {}", e);
        }
        cursor.fill_and_wrap_line();

        cursor.set_style_modifier(theme.button_style);
        if let Err(e) = write!(&mut cursor, "[ {} ]", field.translate("Close")) {
            log::warn!("Error while writing button: {}", e);
        }

        cursor.set_style_modifier(StyleModifier::default());
        if let Err(e) = write!(&mut cursor, " ") {
            log::warn!("Error while writing button: {}", e);
        }

        cursor.set_style_modifier(if dropdown.can_confirm() {
            theme.button_style
        } else {
            theme.button_disabled_style
        });
        if let Err(e) = write!(&mut cursor, "[ {} ]", field.translate("Apply")) {
            log::warn!("Error while writing button: {}", e);
        }
    }
}

/// The open dropdown: option list and both months above the footer.
pub fn dropdown_window<'a>(context: &'a Context) -> impl Widget + 'a {
    let theme = &context.theme;
    let picker = context.field().dropdown().picker();

    let mut months = HLayout::new()
        .separator(GraphemeCluster::space())
        .widget(OptionList::new(context));
    for calendar in picker.calendars() {
        months = months.widget(
            MonthPane::new(calendar, theme).pointer(context.pointer(), context.focus()),
        );
    }

    VLayout::new().widget(months).widget(Footer::new(context))
}
