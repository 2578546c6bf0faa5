use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::selector::{CandidateView, DropdownView, SCROLL_WINDOW_ROWS, SelectorView};
use crate::template::Segment;

use super::field::input_column;
use super::layout::anchored_rect;

pub const EMPTY_RESULT_TEXT: &str = "No data";
const MIN_DROPDOWN_WIDTH: u16 = 16;
const ROW_PREFIX_WIDTH: usize = 3;

pub fn draw_dropdown(frame: &mut Frame<'_>, area: Rect, view: &SelectorView) {
    let Some(lines) = dropdown_lines(view) else {
        return;
    };
    let Some(popup) = popup_rect(area, view, &lines) else {
        return;
    };
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let padded = lines
        .into_iter()
        .map(|line| pad_line(line, inner.width as usize))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(padded), inner);
}

pub fn dropdown_popup(area: Rect, view: &SelectorView) -> Option<Rect> {
    let lines = dropdown_lines(view)?;
    popup_rect(area, view, &lines)
}

/// Candidate row under a popup-relative line, accounting for scrolling.
pub fn row_at(view: &SelectorView, line: usize) -> Option<usize> {
    match &view.dropdown {
        DropdownView::Hidden => None,
        DropdownView::Empty => (line == 0).then_some(0),
        DropdownView::Items {
            items,
            scroll_offset,
            scrollable,
            ..
        } => {
            let visible = visible_rows(items, *scroll_offset, *scrollable).len();
            if line >= visible {
                return None;
            }
            Some(if *scrollable {
                scroll_offset + line
            } else {
                line
            })
        }
    }
}

fn dropdown_lines(view: &SelectorView) -> Option<Vec<Line<'static>>> {
    match &view.dropdown {
        DropdownView::Hidden => None,
        DropdownView::Empty => Some(vec![Line::from(Span::styled(
            format!("   {EMPTY_RESULT_TEXT}"),
            Style::default().fg(Color::DarkGray),
        ))]),
        DropdownView::Items {
            items,
            scroll_offset,
            scrollable,
            ..
        } => Some(
            visible_rows(items, *scroll_offset, *scrollable)
                .iter()
                .map(build_candidate_line)
                .collect(),
        ),
    }
}

fn popup_rect(area: Rect, view: &SelectorView, lines: &[Line<'_>]) -> Option<Rect> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = u16::try_from(content_width + 2)
        .unwrap_or(u16::MAX)
        .max(MIN_DROPDOWN_WIDTH);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let column = u16::try_from(input_column(view)).unwrap_or(u16::MAX);
    Some(anchored_rect(
        area,
        area.x.saturating_add(column),
        width,
        height,
    ))
}

pub fn visible_rows(items: &[CandidateView], offset: usize, scrollable: bool) -> &[CandidateView] {
    if !scrollable {
        return items;
    }
    let start = offset.min(items.len());
    let end = (start + SCROLL_WINDOW_ROWS).min(items.len());
    &items[start..end]
}

pub fn build_candidate_line(item: &CandidateView) -> Line<'static> {
    let mut spans = Vec::with_capacity(item.segments.len() + 1);
    if item.active {
        spans.push(Span::styled(" ┃ ", Style::default().fg(Color::White)));
    } else {
        spans.push(Span::raw(" ".repeat(ROW_PREFIX_WIDTH)));
    }

    for segment in &item.segments {
        match segment {
            Segment::Plain(text) => spans.push(Span::raw(text.clone())),
            Segment::Highlight(text) => spans.push(Span::styled(
                text.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        }
    }

    let line = Line::from(spans);
    if item.active {
        line.style(Style::default().bg(Color::Rgb(45, 45, 50)))
    } else {
        line
    }
}

/// Pads with spaces so the active row background covers the full width.
fn pad_line(mut line: Line<'static>, width: usize) -> Line<'static> {
    let used: usize = line.spans.iter().map(|span| span.content.width()).sum();
    if used < width {
        line.spans.push(Span::raw(" ".repeat(width - used)));
    }
    line
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use crate::selector::{CandidateView, DropdownView, Phase, SelectorView};
    use crate::template::Segment;

    use super::{
        EMPTY_RESULT_TEXT, build_candidate_line, draw_dropdown, dropdown_popup, row_at,
        visible_rows,
    };

    fn row(text: &str, active: bool) -> CandidateView {
        CandidateView {
            segments: vec![Segment::Plain(text.to_string())],
            active,
        }
    }

    fn view(dropdown: DropdownView) -> SelectorView {
        SelectorView {
            field_name: "data-selector".to_string(),
            chips: Vec::new(),
            cursor: 0,
            input: "x".to_string(),
            input_width: 1,
            phase: Phase::Typing,
            dropdown,
            value: String::new(),
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn visible_rows_respects_scroll_window_only_when_scrollable() {
        let items: Vec<CandidateView> = (0..8).map(|idx| row(&idx.to_string(), false)).collect();
        assert_eq!(visible_rows(&items, 3, false).len(), 8);

        let window = visible_rows(&items, 3, true);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].segments[0].text(), "3");
        assert_eq!(visible_rows(&items, 20, true).len(), 0);
    }

    #[test]
    fn candidate_line_styles_highlight_and_active_row() {
        let item = CandidateView {
            segments: vec![
                Segment::Highlight("Al".to_string()),
                Segment::Plain("ice".to_string()),
            ],
            active: true,
        };
        let line = build_candidate_line(&item);
        assert_eq!(line.spans[0].content.as_ref(), " ┃ ");
        assert_eq!(line.spans[1].style.fg, Some(Color::Yellow));
        assert_eq!(line.spans[2].content.as_ref(), "ice");
        assert_eq!(line.style.bg, Some(Color::Rgb(45, 45, 50)));
    }

    #[test]
    fn dropdown_draws_placeholder_for_empty_result() {
        let mut terminal =
            Terminal::new(TestBackend::new(30, 6)).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                draw_dropdown(frame, Rect::new(0, 0, 30, 6), &view(DropdownView::Empty));
            })
            .expect("draw should pass");
        assert!(buffer_text(&terminal).contains(EMPTY_RESULT_TEXT));
    }

    #[test]
    fn dropdown_draws_nothing_when_hidden() {
        let mut terminal =
            Terminal::new(TestBackend::new(30, 6)).expect("test terminal should initialize");
        terminal
            .draw(|frame| {
                draw_dropdown(frame, Rect::new(0, 0, 30, 6), &view(DropdownView::Hidden));
            })
            .expect("draw should pass");
        assert!(buffer_text(&terminal).trim().is_empty());
    }

    #[test]
    fn dropdown_handles_multibyte_rows_in_narrow_area() {
        let mut terminal =
            Terminal::new(TestBackend::new(8, 4)).expect("test terminal should initialize");
        let items = vec![row("あいうえおかきく", true), row("さしすせそ", false)];
        terminal
            .draw(|frame| {
                draw_dropdown(
                    frame,
                    Rect::new(0, 0, 8, 4),
                    &view(DropdownView::Items {
                        items,
                        active: 0,
                        scroll_offset: 0,
                        scrollable: false,
                    }),
                );
            })
            .expect("draw should pass");
    }

    #[test]
    fn row_at_maps_popup_lines_through_scroll_offset() {
        let items: Vec<CandidateView> = (0..8).map(|idx| row(&idx.to_string(), idx == 6)).collect();
        let scrolled = view(DropdownView::Items {
            items: items.clone(),
            active: 6,
            scroll_offset: 3,
            scrollable: true,
        });
        assert_eq!(row_at(&scrolled, 0), Some(3));
        assert_eq!(row_at(&scrolled, 4), Some(7));
        assert_eq!(row_at(&scrolled, 5), None);

        let flat = view(DropdownView::Items {
            items,
            active: 0,
            scroll_offset: 0,
            scrollable: false,
        });
        assert_eq!(row_at(&flat, 7), Some(7));
        assert_eq!(row_at(&view(DropdownView::Empty), 0), Some(0));
        assert_eq!(row_at(&view(DropdownView::Hidden), 0), None);
    }

    #[test]
    fn dropdown_popup_is_absent_while_hidden() {
        let area = Rect::new(0, 3, 40, 10);
        assert_eq!(dropdown_popup(area, &view(DropdownView::Hidden)), None);

        let popup = dropdown_popup(area, &view(DropdownView::Empty)).expect("popup should show");
        assert_eq!(popup.y, 3);
        assert_eq!(popup.height, 3);
    }
}
