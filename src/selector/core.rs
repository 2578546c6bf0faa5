use crate::config::{SelectCallback, SelectorOptions};
use crate::error::{SelectorError, SelectorResult};
use crate::filter::{CandidateFilter, FilterQuery, TieredFilter};
use crate::record::Record;
use crate::template::Template;

use super::selection::SelectedSet;
use super::types::{HiddenField, Phase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorKeys {
    pub filter: Vec<String>,
    pub saved: String,
    pub show: String,
}

impl SelectorKeys {
    pub fn resolve(options: &SelectorOptions, template: &Template) -> SelectorResult<Self> {
        let filter: Vec<String> = if options.filter_key.is_empty() {
            template.fields()
        } else {
            options.filter_key.clone()
        };
        let Some(first) = filter.first() else {
            return Err(SelectorError::configuration(
                "template has no %:field% placeholders and no filter keys are configured",
            ));
        };

        let saved = options.saved_key_name().unwrap_or(first).to_string();
        let show = options.show_key_name().unwrap_or(&saved).to_string();
        Ok(Self {
            filter,
            saved,
            show,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TransientState {
    pub(crate) phase: Phase,
    pub(crate) input: String,
    /// Input position among the chips, `0..=selected.len()`.
    pub(crate) cursor: usize,
    pub(crate) dropdown_visible: bool,
    /// Indices into `Selector::data`.
    pub(crate) candidates: Vec<usize>,
    pub(crate) active: usize,
    pub(crate) scroll_offset: usize,
}

impl TransientState {
    pub(crate) fn hide_dropdown(&mut self) {
        self.dropdown_visible = false;
        self.candidates.clear();
        self.active = 0;
        self.scroll_offset = 0;
    }
}

pub struct Selector {
    pub(crate) initial: SelectorOptions,
    pub(crate) field: HiddenField,
    pub(crate) template: Template,
    pub(crate) keys: SelectorKeys,
    pub(crate) data: Vec<Record>,
    pub(crate) max_data: Option<usize>,
    pub(crate) max_result: usize,
    pub(crate) result_scroll: bool,
    pub(crate) on_select: Option<SelectCallback>,
    pub(crate) filter: Box<dyn CandidateFilter>,
    pub(crate) selected: SelectedSet,
    pub(crate) state: TransientState,
}

impl Selector {
    pub fn new(options: SelectorOptions) -> SelectorResult<Self> {
        Self::with_filter(options, Box::new(TieredFilter))
    }

    pub fn with_filter(
        options: SelectorOptions,
        filter: Box<dyn CandidateFilter>,
    ) -> SelectorResult<Self> {
        match Self::build(options, filter) {
            Ok(selector) => {
                tracing::info!(
                    field = %selector.field.name,
                    records = selector.data.len(),
                    filter_keys = ?selector.keys.filter,
                    saved_key = %selector.keys.saved,
                    "selector initialized"
                );
                Ok(selector)
            }
            Err(err) => {
                tracing::error!(error = %err, "selector initialization failed");
                Err(err)
            }
        }
    }

    fn build(options: SelectorOptions, filter: Box<dyn CandidateFilter>) -> SelectorResult<Self> {
        let template = Template::parse(&options.template)?;
        let keys = SelectorKeys::resolve(&options, &template)?;

        Ok(Self {
            field: HiddenField {
                name: options.el.clone(),
                value: String::new(),
            },
            data: options.data.clone(),
            max_data: options.max_data_limit(),
            max_result: options.max_result_limit(),
            result_scroll: options.result_scroll,
            on_select: options.on_select.clone(),
            selected: SelectedSet::new(keys.saved.clone()),
            state: TransientState::default(),
            template,
            keys,
            filter,
            initial: options,
        })
    }

    pub fn reset(&mut self) -> SelectorResult<()> {
        let filter = std::mem::replace(&mut self.filter, Box::new(TieredFilter));
        let rebuilt = Self::build(self.initial.clone(), filter)?;
        *self = rebuilt;
        tracing::info!(field = %self.field.name, "selector reset");
        Ok(())
    }

    pub fn destroy(self) -> HiddenField {
        tracing::info!(field = %self.field.name, value = %self.field.value, "selector destroyed");
        self.field
    }

    pub fn keys(&self) -> &SelectorKeys {
        &self.keys
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn field(&self) -> &HiddenField {
        &self.field
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn active_index(&self) -> Option<usize> {
        if self.state.candidates.is_empty() {
            None
        } else {
            Some(self.state.active)
        }
    }

    pub fn max_data(&self) -> Option<usize> {
        self.max_data
    }

    pub fn data(&self) -> &[Record] {
        &self.data
    }

    pub fn selected(&self) -> &[Record] {
        self.selected.records()
    }

    pub fn candidates(&self) -> Vec<&Record> {
        self.state
            .candidates
            .iter()
            .filter_map(|idx| self.data.get(*idx))
            .collect()
    }

    pub(crate) fn at_capacity(&self) -> bool {
        self.max_data.is_some_and(|max| self.selected.len() >= max)
    }

    pub(crate) fn run_filter(&self, input: &str) -> Vec<usize> {
        self.filter.select(
            &self.data,
            &FilterQuery {
                keys: &self.keys.filter,
                saved_key: &self.keys.saved,
                selected: self.selected.saved_values(),
                input,
                max_result: self.max_result,
            },
        )
    }

    /// Recomputes the dropdown for the current input; active row resets to 0.
    pub(crate) fn refresh_candidates(&mut self) {
        let candidates = self.run_filter(&self.state.input);
        self.state.candidates = candidates;
        self.state.active = 0;
        self.state.scroll_offset = 0;
        self.state.dropdown_visible = true;
    }

    pub(crate) fn refresh_if_typing(&mut self) {
        if self.state.phase == Phase::Typing && !self.state.input.is_empty() {
            self.refresh_candidates();
        }
    }

    pub(crate) fn sync_field(&mut self) {
        self.field.value = self.selected.serialize();
    }
}
