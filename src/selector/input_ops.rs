use super::core::Selector;
use super::nav::{scroll_after_step, wrap_step};
use super::selection::InsertRejection;
use super::types::{ArrowDirection, DeleteDirection, Phase, SelectorEvent, SelectorOutcome};

impl Selector {
    pub fn handle(&mut self, event: SelectorEvent) -> SelectorOutcome {
        let outcome = match event {
            SelectorEvent::Focus => self.on_focus(None),
            SelectorEvent::FocusChip(chip) => self.on_focus(Some(chip)),
            SelectorEvent::Input(text) => self.on_input(text),
            SelectorEvent::Arrow(dir) => self.on_arrow(dir),
            SelectorEvent::Enter => self.on_enter(),
            SelectorEvent::Commit(row) => self.on_commit(row),
            SelectorEvent::Delete(dir) => self.on_delete(dir),
            SelectorEvent::Blur => self.on_blur(),
        };
        tracing::debug!(phase = self.state.phase.as_str(), ?outcome, "selector event handled");
        outcome
    }

    fn on_focus(&mut self, chip: Option<usize>) -> SelectorOutcome {
        if let Some(chip) = chip
            && chip < self.selected.len()
        {
            self.state.cursor = chip + 1;
        }
        if self.state.phase == Phase::Idle {
            self.state.phase = Phase::Focused;
        }
        SelectorOutcome::Redraw
    }

    fn on_input(&mut self, text: String) -> SelectorOutcome {
        if self.at_capacity() {
            self.state.input.clear();
            self.state.hide_dropdown();
            return SelectorOutcome::Rejected;
        }

        self.state.input = text;
        if self.state.input.is_empty() {
            self.state.phase = Phase::Focused;
            self.state.hide_dropdown();
            return SelectorOutcome::Redraw;
        }

        self.state.phase = Phase::Typing;
        self.refresh_candidates();
        SelectorOutcome::Redraw
    }

    fn on_arrow(&mut self, dir: ArrowDirection) -> SelectorOutcome {
        let len = self.state.candidates.len();
        if !self.state.dropdown_visible || len == 0 {
            return SelectorOutcome::Ignored;
        }

        let from = self.state.active;
        self.state.active = wrap_step(from, len, dir);
        if self.result_scroll {
            self.state.scroll_offset = scroll_after_step(from, len, dir);
        }
        SelectorOutcome::Redraw
    }

    fn on_enter(&mut self) -> SelectorOutcome {
        if self.state.input.is_empty() || !self.state.dropdown_visible {
            return SelectorOutcome::Ignored;
        }
        if self.state.candidates.is_empty() {
            self.state.hide_dropdown();
            return SelectorOutcome::Redraw;
        }
        self.on_commit(self.state.active)
    }

    fn on_commit(&mut self, row: usize) -> SelectorOutcome {
        if !self.state.dropdown_visible {
            return SelectorOutcome::Ignored;
        }
        if self.state.candidates.is_empty() {
            self.state.hide_dropdown();
            return SelectorOutcome::Redraw;
        }
        let Some(record) = self
            .state
            .candidates
            .get(row)
            .and_then(|idx| self.data.get(*idx))
            .cloned()
        else {
            return SelectorOutcome::Ignored;
        };

        match self.selected.insert(self.state.cursor, record.clone()) {
            Ok(saved) => {
                tracing::debug!(value = %saved, position = self.state.cursor, "candidate committed");
                self.state.cursor += 1;
            }
            Err(InsertRejection::Duplicate(saved)) => {
                tracing::debug!(value = %saved, "candidate already selected");
                self.reset_after_commit();
                return SelectorOutcome::Redraw;
            }
            Err(InsertRejection::MissingSavedKey) => {
                tracing::warn!(
                    saved_key = %self.keys.saved,
                    "candidate has no saved-key value; commit skipped"
                );
                return SelectorOutcome::Ignored;
            }
        }

        self.reset_after_commit();
        self.sync_field();
        if let Some(on_select) = &self.on_select {
            on_select(&record);
        }
        SelectorOutcome::Committed {
            value: self.field.value.clone(),
        }
    }

    fn reset_after_commit(&mut self) {
        self.state.input.clear();
        self.state.phase = Phase::Focused;
        self.state.hide_dropdown();
    }

    fn on_delete(&mut self, dir: DeleteDirection) -> SelectorOutcome {
        if !self.state.input.is_empty() {
            return SelectorOutcome::Ignored;
        }

        let cursor = self.state.cursor.min(self.selected.len());
        let position = match dir {
            DeleteDirection::Backward if cursor > 0 => cursor - 1,
            DeleteDirection::Forward if cursor < self.selected.len() => cursor,
            DeleteDirection::Backward | DeleteDirection::Forward => {
                return SelectorOutcome::Ignored;
            }
        };

        if self.selected.remove(position).is_none() {
            return SelectorOutcome::Ignored;
        }
        self.state.cursor = position;
        self.sync_field();
        tracing::debug!(position, value = %self.field.value, "chip deleted");
        SelectorOutcome::Deleted {
            value: self.field.value.clone(),
        }
    }

    fn on_blur(&mut self) -> SelectorOutcome {
        if self.state.phase == Phase::Idle && !self.state.dropdown_visible {
            return SelectorOutcome::Ignored;
        }
        self.state.input.clear();
        self.state.phase = Phase::Idle;
        self.state.hide_dropdown();
        SelectorOutcome::Redraw
    }
}
