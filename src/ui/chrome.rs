use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::selector::SelectorView;

use super::layout::UiLayout;

pub const KEY_HELP: &str =
    "tab focus | enter pick | up/down move | bksp/del remove | ^u clear | ^r reset | esc quit";

pub fn draw_chrome(
    frame: &mut Frame<'_>,
    layout: UiLayout,
    view: &SelectorView,
    message: &str,
    debug_status_visible: bool,
) {
    let status_text = format!(
        "{}={} | {} | {}",
        view.field_name,
        view.value,
        view.phase.as_str().to_uppercase(),
        if message.is_empty() { "-" } else { message }
    );
    let status = Paragraph::new(status_text)
        .style(Style::default())
        .wrap(Wrap { trim: true });

    if debug_status_visible && layout.status.height >= 2 {
        let top = Rect::new(layout.status.x, layout.status.y, layout.status.width, 1);
        frame.render_widget(status, top);

        let bottom = Rect::new(
            layout.status.x,
            layout.status.y + 1,
            layout.status.width,
            layout.status.height.saturating_sub(1).max(1),
        );
        let help = Paragraph::new(KEY_HELP)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(help, bottom);
        return;
    }

    frame.render_widget(status, layout.status);
}
