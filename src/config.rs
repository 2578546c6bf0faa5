use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{SelectorError, SelectorResult};
use crate::record::Record;

pub const DEFAULT_FIELD_NAME: &str = "data-selector";
pub const DEFAULT_MAX_RESULT: usize = 5;

pub type SelectCallback = Arc<dyn Fn(&Record) + Send + Sync>;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    pub el: String,
    pub template: String,
    pub data: Vec<Record>,
    /// `-1` (or any value <= 0) leaves the selection unbounded.
    pub max_data: i64,
    pub max_result: usize,
    pub result_scroll: bool,
    pub filter_key: Vec<String>,
    pub saved_key: Option<String>,
    pub show_key: Option<String>,
    #[serde(skip)]
    pub on_select: Option<SelectCallback>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            el: DEFAULT_FIELD_NAME.to_string(),
            template: String::new(),
            data: Vec::new(),
            max_data: -1,
            max_result: DEFAULT_MAX_RESULT,
            result_scroll: false,
            filter_key: Vec::new(),
            saved_key: None,
            show_key: None,
            on_select: None,
        }
    }
}

impl fmt::Debug for SelectorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorOptions")
            .field("el", &self.el)
            .field("template", &self.template)
            .field("data", &self.data.len())
            .field("max_data", &self.max_data)
            .field("max_result", &self.max_result)
            .field("result_scroll", &self.result_scroll)
            .field("filter_key", &self.filter_key)
            .field("saved_key", &self.saved_key)
            .field("show_key", &self.show_key)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl PartialEq for SelectorOptions {
    fn eq(&self, other: &Self) -> bool {
        let callbacks_match = match (&self.on_select, &other.on_select) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        callbacks_match
            && self.el == other.el
            && self.template == other.template
            && self.data == other.data
            && self.max_data == other.max_data
            && self.max_result == other.max_result
            && self.result_scroll == other.result_scroll
            && self.filter_key == other.filter_key
            && self.saved_key == other.saved_key
            && self.show_key == other.show_key
    }
}

impl SelectorOptions {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Vec<Record>) -> Self {
        self.data = data;
        self
    }

    pub fn with_saved_key(mut self, key: impl Into<String>) -> Self {
        self.saved_key = Some(key.into());
        self
    }

    pub fn with_show_key(mut self, key: impl Into<String>) -> Self {
        self.show_key = Some(key.into());
        self
    }

    pub fn with_filter_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_key = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_data(mut self, max_data: i64) -> Self {
        self.max_data = max_data;
        self
    }

    pub fn with_max_result(mut self, max_result: usize) -> Self {
        self.max_result = max_result;
        self
    }

    pub fn with_result_scroll(mut self, enabled: bool) -> Self {
        self.result_scroll = enabled;
        self
    }

    pub fn on_select(mut self, callback: impl Fn(&Record) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(callback));
        self
    }

    pub fn max_data_limit(&self) -> Option<usize> {
        usize::try_from(self.max_data).ok().filter(|max| *max > 0)
    }

    pub fn max_result_limit(&self) -> usize {
        if self.max_result == 0 {
            DEFAULT_MAX_RESULT
        } else {
            self.max_result
        }
    }

    /// Only the first whitespace-separated word of `saved_key` is honored.
    pub fn saved_key_name(&self) -> Option<&str> {
        self.saved_key
            .as_deref()
            .and_then(|key| key.split_whitespace().next())
    }

    pub fn show_key_name(&self) -> Option<&str> {
        self.show_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub selector: SelectorOptions,
    pub source: SourceConfig,
    pub keymap: KeymapConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// JSON file with an array of records, appended to `selector.data`.
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub debug_status_visible: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Select".to_string(),
            debug_status_visible: false,
        }
    }
}

impl Config {
    pub fn load() -> SelectorResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> SelectorResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(SelectorError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            SelectorError::io_with_context(
                source,
                format!("failed to read config: {}", path.display()),
            )
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            SelectorError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.selector.max_result = self.selector.max_result_limit();
        if self.selector.max_data <= 0 {
            self.selector.max_data = -1;
        }
        self.selector.saved_key = self.selector.saved_key_name().map(str::to_string);
        self.selector.show_key = self.selector.show_key_name().map(str::to_string);
        self.selector.filter_key.retain(|key| !key.trim().is_empty());
        if self.selector.el.trim().is_empty() {
            self.selector.el = DEFAULT_FIELD_NAME.to_string();
        }
        if self.ui.title.trim().is_empty() {
            self.ui.title = UiConfig::default().title;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("DSEL_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("dsel").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("dsel")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("dsel").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{Config, DEFAULT_MAX_RESULT, SelectorOptions};

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("dsel_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [selector]
            template = "[[%:name%]] <%:email%>"
            saved_key = "id email"
            max_data = 0
            max_result = 0
            result_scroll = true

            [[selector.data]]
            name = "Alice"
            id = 1

            [[selector.data]]
            name = "Alan"
            id = 2

            [ui]
            title = "  "
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.selector.template, "[[%:name%]] <%:email%>");
        assert_eq!(config.selector.saved_key.as_deref(), Some("id"));
        assert_eq!(config.selector.max_data, -1);
        assert_eq!(config.selector.max_result, DEFAULT_MAX_RESULT);
        assert!(config.selector.result_scroll);
        assert_eq!(config.selector.data.len(), 2);
        assert_eq!(config.selector.data[1].field("id").as_deref(), Some("2"));
        assert_eq!(config.selector.el, "data-selector");
        assert_eq!(config.ui.title, "Select");
        assert_eq!(config.keymap.preset, "default");

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[selector\ntemplate = 1").expect("config file should be written");

        let err = Config::load_from_path(&path).expect_err("broken config should fail");
        assert!(err.to_string().contains("failed to parse config"));

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn option_limits_fall_back_for_unbounded_and_zero_values() {
        let options = SelectorOptions::new("%:name%");
        assert_eq!(options.max_data_limit(), None);
        assert_eq!(options.max_result_limit(), DEFAULT_MAX_RESULT);

        let options = options.with_max_data(3).with_max_result(0);
        assert_eq!(options.max_data_limit(), Some(3));
        assert_eq!(options.max_result_limit(), DEFAULT_MAX_RESULT);

        let options = options.with_max_data(0).with_max_result(8);
        assert_eq!(options.max_data_limit(), None);
        assert_eq!(options.max_result_limit(), 8);
    }

    #[test]
    fn options_compare_callbacks_by_identity() {
        let base = SelectorOptions::new("%:name%");
        let with_callback = base.clone().on_select(|_| {});
        assert_ne!(base, with_callback);
        assert_eq!(with_callback, with_callback.clone());
    }
}
