use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::selector::{ArrowDirection, DeleteDirection, SelectorEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

/// What the host should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    Selector(SelectorEvent),
    /// Forward to the text buffer, then report the new text.
    Edit(KeyEvent),
    Clear,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub focused: bool,
    pub input_empty: bool,
    pub cursor: usize,
    pub chips: usize,
}

pub fn map_key_with_preset(
    key: KeyEvent,
    ctx: KeyContext,
    preset: KeymapPreset,
) -> Option<HostAction> {
    if let Some(action) = map_global_key(key, ctx) {
        return Some(action);
    }
    if preset == KeymapPreset::Emacs
        && let Some(action) = map_emacs_key(key, ctx)
    {
        return Some(action);
    }
    if !ctx.focused {
        return map_idle_key(key);
    }
    map_focused_key(key, ctx)
}

fn map_global_key(key: KeyEvent, ctx: KeyContext) -> Option<HostAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(HostAction::Quit),
            KeyCode::Char('u') => Some(HostAction::Clear),
            KeyCode::Char('r') => Some(HostAction::Reset),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc if ctx.focused => Some(HostAction::Selector(SelectorEvent::Blur)),
        KeyCode::Esc => Some(HostAction::Quit),
        KeyCode::Tab if ctx.focused => Some(HostAction::Selector(SelectorEvent::Blur)),
        KeyCode::Tab => Some(HostAction::Selector(SelectorEvent::Focus)),
        _ => None,
    }
}

fn map_emacs_key(key: KeyEvent, ctx: KeyContext) -> Option<HostAction> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) || !ctx.focused {
        return None;
    }
    match key.code {
        KeyCode::Char('p') => Some(HostAction::Selector(SelectorEvent::Arrow(
            ArrowDirection::Up,
        ))),
        KeyCode::Char('n') => Some(HostAction::Selector(SelectorEvent::Arrow(
            ArrowDirection::Down,
        ))),
        KeyCode::Char('g') => Some(HostAction::Selector(SelectorEvent::Blur)),
        KeyCode::Char('d') if ctx.input_empty => Some(HostAction::Selector(
            SelectorEvent::Delete(DeleteDirection::Forward),
        )),
        _ => None,
    }
}

fn map_idle_key(key: KeyEvent) -> Option<HostAction> {
    match key.code {
        KeyCode::Enter => Some(HostAction::Selector(SelectorEvent::Focus)),
        KeyCode::Char(_) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HostAction::Edit(key))
        }
        _ => None,
    }
}

fn map_focused_key(key: KeyEvent, ctx: KeyContext) -> Option<HostAction> {
    match key.code {
        KeyCode::Up => Some(HostAction::Selector(SelectorEvent::Arrow(
            ArrowDirection::Up,
        ))),
        KeyCode::Down => Some(HostAction::Selector(SelectorEvent::Arrow(
            ArrowDirection::Down,
        ))),
        KeyCode::Enter => Some(HostAction::Selector(SelectorEvent::Enter)),
        KeyCode::Backspace if ctx.input_empty => Some(HostAction::Selector(
            SelectorEvent::Delete(DeleteDirection::Backward),
        )),
        KeyCode::Delete if ctx.input_empty => Some(HostAction::Selector(SelectorEvent::Delete(
            DeleteDirection::Forward,
        ))),
        // Chip hopping stands in for clicking a chip: the input lands after it.
        KeyCode::Left if ctx.input_empty => ctx
            .cursor
            .checked_sub(2)
            .map(|chip| HostAction::Selector(SelectorEvent::FocusChip(chip))),
        KeyCode::Right if ctx.input_empty => (ctx.cursor < ctx.chips)
            .then(|| HostAction::Selector(SelectorEvent::FocusChip(ctx.cursor))),
        _ => Some(HostAction::Edit(key)),
    }
}
