use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub field: Rect,
    pub dropdown: Rect,
    pub status: Rect,
}

pub fn split_layout(area: Rect, debug_status_visible: bool) -> UiLayout {
    let status_height = if debug_status_visible { 2 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(status_height),
        ])
        .split(area);

    UiLayout {
        field: chunks[0],
        dropdown: chunks[1],
        status: chunks[2],
    }
}

/// Rect anchored at `x` inside `area`, shifted left when it would overflow.
pub(crate) fn anchored_rect(area: Rect, x: u16, width: u16, height: u16) -> Rect {
    let width = width.max(1).min(area.width);
    let height = height.max(1).min(area.height);
    let max_x = area.x + area.width.saturating_sub(width);
    let x = x.clamp(area.x, max_x);
    Rect::new(x, area.y, width, height)
}
