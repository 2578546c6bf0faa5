use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::selector::SelectorView;

const CHIP_GAP: &str = " ";

pub fn draw_field(frame: &mut Frame<'_>, area: Rect, title: &str, view: &SelectorView) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let border = if view.phase.has_focus() {
        Color::White
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(build_field_line(view)), inner);
}

pub fn build_field_line(view: &SelectorView) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, chip) in view.chips.iter().enumerate() {
        if idx == view.cursor {
            push_input(&mut spans, view);
        }
        spans.push(Span::styled(
            format!(" {} ", chip.label),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::raw(CHIP_GAP));
    }
    if view.cursor >= view.chips.len() {
        push_input(&mut spans, view);
    }
    Line::from(spans)
}

/// Column where the input box starts, relative to the field's inner area.
pub fn input_column(view: &SelectorView) -> usize {
    view.chips
        .iter()
        .take(view.cursor)
        .map(|chip| chip.label.width() + 2 + CHIP_GAP.len())
        .sum()
}

pub fn chip_at(view: &SelectorView, column: usize) -> Option<usize> {
    let mut x = 0;
    for (idx, chip) in view.chips.iter().enumerate() {
        if idx == view.cursor {
            x += input_width(view);
        }
        let width = chip.label.width() + 2;
        if (x..x + width).contains(&column) {
            return Some(idx);
        }
        x += width + CHIP_GAP.len();
    }
    None
}

fn input_width(view: &SelectorView) -> usize {
    if !view.phase.has_focus() {
        return 0;
    }
    view.input.width() + 1 + CHIP_GAP.len()
}

fn push_input(spans: &mut Vec<Span<'static>>, view: &SelectorView) {
    if !view.phase.has_focus() {
        return;
    }
    if !view.input.is_empty() {
        spans.push(Span::raw(view.input.clone()));
    }
    spans.push(Span::raw(" ").reversed());
    spans.push(Span::raw(CHIP_GAP));
}
