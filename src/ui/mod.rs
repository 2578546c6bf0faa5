mod chrome;
mod dropdown;
mod field;
mod layout;

pub use chrome::{KEY_HELP, draw_chrome};
pub use dropdown::{
    EMPTY_RESULT_TEXT, build_candidate_line, draw_dropdown, dropdown_popup, row_at, visible_rows,
};
pub use field::{build_field_line, chip_at, draw_field, input_column};
pub use layout::{UiLayout, split_layout};

use ratatui::Frame;
use ratatui::layout::{Margin, Position, Rect};

use crate::selector::{SelectorEvent, SelectorView};

pub fn draw_selector(
    frame: &mut Frame<'_>,
    title: &str,
    view: &SelectorView,
    message: &str,
    debug_status_visible: bool,
) {
    let layout = split_layout(frame.area(), debug_status_visible);
    draw_field(frame, layout.field, title, view);
    draw_dropdown(frame, dropdown_area(&layout), view);
    draw_chrome(frame, layout, view, message, debug_status_visible);
}

/// Maps a left click to the selector event it stands for.
pub fn hit_test(
    area: Rect,
    view: &SelectorView,
    debug_status_visible: bool,
    column: u16,
    row: u16,
) -> Option<SelectorEvent> {
    let layout = split_layout(area, debug_status_visible);
    let position = Position::new(column, row);

    if let Some(popup) = dropdown_popup(dropdown_area(&layout), view)
        && popup.contains(position)
    {
        let inner = popup.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        if !inner.contains(position) {
            return None;
        }
        return row_at(view, usize::from(row - inner.y)).map(SelectorEvent::Commit);
    }

    if layout.field.contains(position) {
        let inner = layout.field.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        if inner.contains(position)
            && let Some(chip) = chip_at(view, usize::from(column - inner.x))
        {
            return Some(SelectorEvent::FocusChip(chip));
        }
        return Some(SelectorEvent::Focus);
    }

    view.phase.has_focus().then_some(SelectorEvent::Blur)
}

fn dropdown_area(layout: &UiLayout) -> Rect {
    layout.dropdown.inner(Margin {
        horizontal: 1,
        vertical: 0,
    })
}
