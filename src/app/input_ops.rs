use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::input::{HostAction, KeyContext, map_key_with_preset};
use crate::selector::{SelectorEvent, SelectorOutcome};
use crate::ui;

use super::core::App;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub redraw: bool,
    pub quit_requested: bool,
}

impl InputOutcome {
    pub(crate) fn redraw() -> Self {
        Self {
            redraw: true,
            quit_requested: false,
        }
    }

    fn quit() -> Self {
        Self {
            redraw: false,
            quit_requested: true,
        }
    }
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        let ctx = self.key_context();
        let Some(action) = map_key_with_preset(key, ctx, self.keymap) else {
            return InputOutcome::default();
        };

        match action {
            HostAction::Quit => InputOutcome::quit(),
            HostAction::Clear => {
                self.selector.clear();
                self.sync_input();
                self.status.message = "selection cleared".to_string();
                InputOutcome::redraw()
            }
            HostAction::Reset => {
                self.status.message = match self.selector.reset() {
                    Ok(()) => "selector reset".to_string(),
                    Err(err) => {
                        tracing::error!(error = %err, "selector reset failed");
                        err.to_string()
                    }
                };
                self.sync_input();
                InputOutcome::redraw()
            }
            HostAction::Selector(event) => self.dispatch(event),
            HostAction::Edit(key) => self.edit_input(key),
        }
    }

    /// Left clicks only; `area` is the full frame the selector is drawn in.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> InputOutcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return InputOutcome::default();
        }
        let view = self.selector.view();
        let hit = ui::hit_test(
            area,
            &view,
            self.config.ui.debug_status_visible,
            mouse.column,
            mouse.row,
        );
        match hit {
            Some(event) => self.dispatch(event),
            None => InputOutcome::default(),
        }
    }

    pub(crate) fn dispatch(&mut self, event: SelectorEvent) -> InputOutcome {
        let outcome = self.selector.handle(event);
        self.sync_input();

        match &outcome {
            SelectorOutcome::Committed { value } => {
                self.status.message = format!("selected -> {value}");
            }
            SelectorOutcome::Deleted { value } => {
                self.status.message = format!("removed -> {value}");
            }
            SelectorOutcome::Rejected => {
                let max = self.selector.max_data().unwrap_or_default();
                self.status.message = format!("at most {max} items can be selected");
            }
            SelectorOutcome::Ignored | SelectorOutcome::Redraw => {}
        }

        InputOutcome {
            redraw: outcome.needs_redraw(),
            quit_requested: false,
        }
    }

    fn edit_input(&mut self, key: KeyEvent) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        if !self.selector.phase().has_focus() {
            outcome = self.dispatch(SelectorEvent::Focus);
        }

        let before = self.input.value().to_string();
        self.input.handle_event(&Event::Key(key));
        if self.input.value() == before {
            return outcome;
        }
        let text = self.input.value().to_string();
        self.dispatch(SelectorEvent::Input(text))
    }

    fn key_context(&self) -> KeyContext {
        KeyContext {
            focused: self.selector.phase().has_focus(),
            input_empty: self.input.value().is_empty(),
            cursor: self.selector.cursor(),
            chips: self.selector.selected().len(),
        }
    }

    /// The selector owns the text; the buffer only follows it.
    fn sync_input(&mut self) {
        if self.input.value() != self.selector.input() {
            self.input = Input::new(self.selector.input().to_string());
        }
    }
}
