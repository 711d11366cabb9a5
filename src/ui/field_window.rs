use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use super::{dropdown_window, Context};

/// Button showing the chosen period, or the placeholder.
pub struct Toggle<'a> {
    context: &'a Context,
}

impl<'a> Toggle<'a> {
    pub fn new(context: &'a Context) -> Self {
        Toggle { context }
    }
}

impl Widget for Toggle<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(self.context.toggle_width()),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let field = self.context.field();

        let mut cursor = Cursor::new(&mut window).style_modifier(if field.is_disabled() {
            theme.button_disabled_style
        } else {
            theme.toggle_style
        });

        let caret = if field.is_open() { '▴' } else { '▾' };
        if let Err(e) = write!(&mut cursor, " {} {} ", field.toggle_text(), caret) {
            log::warn!("Error while writing toggle: {}", e);
        }
    }
}

fn spacer(width: usize) -> impl Widget {
    " ".with_demand(move |_| Demand2D {
        width: ColDemand::exact(width),
        height: RowDemand::exact(1),
    })
}

fn indented<'a, W: Widget + 'a>(indent: usize, widget: W) -> HLayout<'a> {
    let mut row = HLayout::new();
    if indent > 0 {
        row = row.widget(spacer(indent));
    }
    row.widget(widget)
}

/// Toggle with the dropdown below it, if open. Parts of the dropdown left
/// of the viewport are cut off.
pub fn field_window<'a>(context: &'a Context, viewport_width: u16) -> impl Widget + 'a {
    let anchor = context.anchor(viewport_width);
    let mut layout = VLayout::new().widget(indented(anchor, Toggle::new(context)));

    if context.field().is_open() {
        let left = (anchor as i32 + context.offset()).max(0) as usize;
        layout = layout.widget(indented(left, dropdown_window(context)));
    }

    layout
}
