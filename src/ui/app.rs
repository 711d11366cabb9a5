use std::time::Instant;

use crate::events::{Dispatcher, Event};

use super::{field_window, Context, Focus};

use unsegen::base::Terminal;
use unsegen::input::{
    Behavior, Event as InputEvent, Input, Key, Navigatable, NavigateBehavior, OperationResult,
};
use unsegen::widget::*;

const CLOSED_HELP: &str = "enter: open  q: quit";
const OPEN_HELP: &str =
    "hjkl: move  enter: pick  </>: month  tab: options  x: clear  a: apply  esc: close";

pub struct App {
    context: Context,
    viewport_width: u16,
}

impl App {
    pub fn new(context: Context) -> App {
        App {
            context,
            viewport_width: 0,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let help = if self.context.field().is_open() {
            OPEN_HELP
        } else {
            CLOSED_HELP
        };

        help.with_demand(|_| Demand2D {
            width: ColDemand::at_least(1),
            height: RowDemand::exact(1),
        })
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(field_window(&self.context, self.viewport_width))
            .widget(self.bottom_bar())
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        while run {
            // Handle events
            if let Ok(event) = dispatcher.next() {
                match event {
                    Event::Update => self.context.update(Instant::now()),
                    Event::Input(input) => {
                        let now = Instant::now();

                        if self.context.field().is_open() {
                            input
                                .chain(
                                    NavigateBehavior::new(&mut PointerBehaviour(
                                        &mut self.context,
                                        now,
                                    ))
                                    .down_on(Key::Char('j'))
                                    .down_on(Key::Down)
                                    .up_on(Key::Char('k'))
                                    .up_on(Key::Up)
                                    .left_on(Key::Char('h'))
                                    .left_on(Key::Left)
                                    .right_on(Key::Char('l'))
                                    .right_on(Key::Right),
                                )
                                .chain(PickerBehaviour::new(&mut self.context, now))
                                .finish();
                        } else {
                            let viewport_width = self.viewport_width;
                            let context = &mut self.context;
                            input
                                .chain((Key::Char('q'), || run = false))
                                .chain((Key::Char('\n'), || context.open(viewport_width)))
                                .chain((Key::Char(' '), || context.open(viewport_width)))
                                .finish();
                        }
                    }
                }
            }

            // Draw
            let root = term.create_root_window();
            self.viewport_width = root.get_width().raw_value() as u16;
            self.as_widget().draw(root, RenderingHints::new());

            term.present();
        }

        Ok(())
    }
}

/// Arrow keys move the day pointer on the calendars, or the focused row in
/// the option list.
struct PointerBehaviour<'a>(&'a mut Context, Instant);

impl Navigatable for PointerBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        match self.0.focus() {
            Focus::Calendar => self.0.move_pointer(7),
            Focus::Sidebar => self.0.move_option(1, self.1),
        }
        Ok(())
    }

    fn move_left(&mut self) -> OperationResult {
        match self.0.focus() {
            Focus::Calendar => {
                self.0.move_pointer(-1);
                Ok(())
            }
            Focus::Sidebar => Err(()),
        }
    }

    fn move_right(&mut self) -> OperationResult {
        match self.0.focus() {
            Focus::Calendar => {
                self.0.move_pointer(1);
                Ok(())
            }
            Focus::Sidebar => Err(()),
        }
    }

    fn move_up(&mut self) -> OperationResult {
        match self.0.focus() {
            Focus::Calendar => self.0.move_pointer(-7),
            Focus::Sidebar => self.0.move_option(-1, self.1),
        }
        Ok(())
    }
}

/// Everything else the open dropdown reacts to.
struct PickerBehaviour<'a> {
    context: &'a mut Context,
    now: Instant,
}

impl<'a> PickerBehaviour<'a> {
    fn new(context: &'a mut Context, now: Instant) -> Self {
        PickerBehaviour { context, now }
    }
}

impl Behavior for PickerBehaviour<'_> {
    fn input(self, input: Input) -> Option<Input> {
        if let InputEvent::Key(key) = input.event {
            match key {
                Key::Char('\n') | Key::Char(' ') => match self.context.focus() {
                    Focus::Calendar => self.context.click_pointer(),
                    Focus::Sidebar => self.context.pick_option(),
                },
                Key::Char('<') => self.context.prev_month(),
                Key::Char('>') => self.context.next_month(),
                Key::Char('\t') => self.context.toggle_focus(self.now),
                Key::Char('x') => self.context.click_outside(),
                Key::Char('a') => self.context.apply(),
                Key::Esc => self.context.cancel(),
                _ => return Some(input),
            }
            None
        } else {
            Some(input)
        }
    }
}
