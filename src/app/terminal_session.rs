use std::io::{self, Stdout, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;

use crate::error::{SelectorError, SelectorResult};

pub(crate) trait TerminalSurface {
    fn size(&self) -> io::Result<Size>;

    fn clear(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>);
}

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalSession {
    pub(crate) fn enter() -> SelectorResult<Self> {
        enable_raw_mode()
            .map_err(|source| SelectorError::io_with_context(source, "failed to enable raw mode"))?;

        match open_screen() {
            Ok(terminal) => Ok(Self {
                terminal,
                restored: false,
            }),
            Err(source) => {
                let _ = leave_screen(&mut io::stdout());
                let _ = disable_raw_mode();
                Err(SelectorError::io_with_context(
                    source,
                    "failed to prepare the terminal",
                ))
            }
        }
    }

    /// Undoes every mode switch even when one of them fails; the first error wins.
    pub(crate) fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let screen = leave_screen(self.terminal.backend_mut());
        let raw = disable_raw_mode();
        let cursor = self.terminal.show_cursor();
        screen.and(raw).and(cursor)
    }
}

impl TerminalSurface for TerminalSession {
    fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(error = %err, "terminal restore failed");
        }
    }
}

fn open_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)
}
