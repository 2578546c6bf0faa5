use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;

use crate::error::{SelectorError, SelectorResult};
use crate::ui;

use super::core::App;
use super::input_ops::InputOutcome;
use super::terminal_session::{TerminalSession, TerminalSurface};

impl App {
    pub fn run(&mut self) -> SelectorResult<()> {
        let mut session = TerminalSession::enter()?;
        let result = self.run_on(&mut session, event::read);
        session.restore()?;
        result
    }

    pub(crate) fn run_on<S, R>(&mut self, surface: &mut S, mut next_event: R) -> SelectorResult<()>
    where
        S: TerminalSurface,
        R: FnMut() -> io::Result<Event>,
    {
        self.draw(surface)?;
        loop {
            let event = next_event().map_err(|source| {
                SelectorError::io_with_context(source, "failed to read terminal event")
            })?;
            let outcome = match event {
                Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
                Event::Mouse(mouse) => {
                    let size = surface.size()?;
                    self.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height))
                }
                Event::Resize(..) => {
                    surface.clear()?;
                    InputOutcome::redraw()
                }
                _ => InputOutcome::default(),
            };

            if outcome.quit_requested {
                break;
            }
            if outcome.redraw {
                self.draw(surface)?;
            }
        }

        tracing::info!(value = %self.value(), "selector closed");
        Ok(())
    }

    pub(crate) fn draw<S: TerminalSurface>(&self, surface: &mut S) -> SelectorResult<()> {
        let view = self.selector.view();
        let title = self.config.ui.title.as_str();
        let message = self.status.message.as_str();
        let debug_status_visible = self.config.ui.debug_status_visible;
        surface.draw(|frame| {
            ui::draw_selector(frame, title, &view, message, debug_status_visible);
        })?;
        Ok(())
    }
}
