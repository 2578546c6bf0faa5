use unicode_width::UnicodeWidthStr;

use super::core::Selector;
use super::types::{CandidateView, ChipView, DropdownView, SelectorView};

pub const COLLAPSED_INPUT_WIDTH: usize = 1;

impl Selector {
    pub fn view(&self) -> SelectorView {
        let chips = self
            .selected
            .records()
            .iter()
            .map(|record| ChipView {
                label: record.field_or_empty(&self.keys.show).into_owned(),
            })
            .collect();

        SelectorView {
            field_name: self.field.name.clone(),
            chips,
            cursor: self.state.cursor.min(self.selected.len()),
            input: self.state.input.clone(),
            input_width: input_width(&self.state.input),
            phase: self.state.phase,
            dropdown: self.dropdown_view(),
            value: self.field.value.clone(),
        }
    }

    fn dropdown_view(&self) -> DropdownView {
        if !self.state.dropdown_visible {
            return DropdownView::Hidden;
        }
        if self.state.candidates.is_empty() {
            return DropdownView::Empty;
        }

        let items = self
            .state
            .candidates
            .iter()
            .enumerate()
            .filter_map(|(row, idx)| {
                let record = self.data.get(*idx)?;
                Some(CandidateView {
                    segments: self.template.render(record, &self.state.input),
                    active: row == self.state.active,
                })
            })
            .collect();
        DropdownView::Items {
            items,
            active: self.state.active,
            scroll_offset: self.state.scroll_offset,
            scrollable: self.result_scroll,
        }
    }
}

fn input_width(input: &str) -> usize {
    if input.is_empty() {
        COLLAPSED_INPUT_WIDTH
    } else {
        input.width().max(COLLAPSED_INPUT_WIDTH)
    }
}
