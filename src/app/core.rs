use tui_input::Input;

use crate::config::Config;
use crate::error::SelectorResult;
use crate::input::KeymapPreset;
use crate::record::load_records;
use crate::selector::Selector;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusState {
    pub message: String,
}

/// Terminal host around one [`Selector`]: owns the text buffer of the input
/// box and turns key and mouse input into selector events.
pub struct App {
    pub selector: Selector,
    pub input: Input,
    pub status: StatusState,
    pub config: Config,
    pub(crate) keymap: KeymapPreset,
}

impl App {
    pub fn new_with_config(mut config: Config) -> SelectorResult<Self> {
        if let Some(path) = config.source.data_path.as_deref() {
            let records = load_records(path)?;
            tracing::info!(path = %path.display(), records = records.len(), "records loaded");
            config.selector.data.extend(records);
        }
        let selector = Selector::new(config.selector.clone())?;
        Ok(Self::with_selector(selector, config))
    }

    pub fn with_selector(selector: Selector, config: Config) -> Self {
        let keymap = KeymapPreset::parse(&config.keymap.preset);
        Self {
            input: Input::new(selector.input().to_string()),
            selector,
            status: StatusState::default(),
            config,
            keymap,
        }
    }

    pub fn value(&self) -> &str {
        self.selector.value()
    }

    pub fn finish(self) -> String {
        self.selector.destroy().value
    }
}
