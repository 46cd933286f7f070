//! Session configuration: validated construction options plus an optional
//! TOML file layer.
//!
//! `SessionConfig` is the typed, immutable-after-construction option set a
//! session is built from. The CRLF delay is clamped into `[100ms, 2000ms]`
//! whenever it is set, so no stored value is ever outside that range. Values
//! that cannot be repaired by clamping (a zero tab size, a zero escape
//! timeout, a negative history size from a file) are rejected with
//! `ConfigError`.
//!
//! The file layer reads `oxline.toml` (working directory first, then the
//! platform config dir):
//!
//! ```toml
//! [session]
//! crlf_delay_ms = 100
//! history_size = 30
//! remove_history_duplicates = false
//! tab_size = 8
//! escape_code_timeout_ms = 500
//! prompt = "> "
//! ```
//!
//! Unknown fields are ignored. `load_from` falls back to defaults when the file
//! is missing or malformed; `read_file` reports those failures instead.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub const MIN_CRLF_DELAY: Duration = Duration::from_millis(100);
pub const MAX_CRLF_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_CRLF_DELAY: Duration = MIN_CRLF_DELAY;
pub const DEFAULT_HISTORY_SIZE: usize = 30;
pub const DEFAULT_TAB_SIZE: usize = 8;
pub const DEFAULT_ESCAPE_CODE_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_PROMPT: &str = "> ";
pub const CONFIG_FILE_NAME: &str = "oxline.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tab_size must be at least 1 (got {0})")]
    InvalidTabSize(i64),
    #[error("escape_code_timeout must be greater than zero (got {0}ms)")]
    InvalidEscapeTimeout(i64),
    #[error("history_size must not be negative (got {0})")]
    NegativeHistorySize(i64),
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Clamp a requested CRLF delay into `[MIN_CRLF_DELAY, MAX_CRLF_DELAY]`.
pub fn clamp_crlf_delay(requested: Duration) -> Duration {
    let clamped = requested.clamp(MIN_CRLF_DELAY, MAX_CRLF_DELAY);
    if clamped != requested {
        info!(
            target: "config",
            requested_ms = requested.as_millis() as u64,
            clamped_ms = clamped.as_millis() as u64,
            min_ms = MIN_CRLF_DELAY.as_millis() as u64,
            max_ms = MAX_CRLF_DELAY.as_millis() as u64,
            "crlf_delay_clamped"
        );
    }
    clamped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    crlf_delay: Duration,
    history_size: usize,
    remove_history_duplicates: bool,
    tab_size: usize,
    escape_code_timeout: Duration,
    prompt: String,
    columns: Option<usize>,
    history: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            crlf_delay: DEFAULT_CRLF_DELAY,
            history_size: DEFAULT_HISTORY_SIZE,
            remove_history_duplicates: false,
            tab_size: DEFAULT_TAB_SIZE,
            escape_code_timeout: DEFAULT_ESCAPE_CODE_TIMEOUT,
            prompt: DEFAULT_PROMPT.to_string(),
            columns: None,
            history: Vec::new(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed file, validating every field.
    pub fn from_file(file: &ConfigFile) -> Result<Self, ConfigError> {
        let s = &file.session;
        if s.history_size < 0 {
            return Err(ConfigError::NegativeHistorySize(s.history_size));
        }
        if s.tab_size < 1 {
            return Err(ConfigError::InvalidTabSize(s.tab_size));
        }
        if s.escape_code_timeout_ms < 1 {
            return Err(ConfigError::InvalidEscapeTimeout(s.escape_code_timeout_ms));
        }
        let crlf_ms = u64::try_from(s.crlf_delay_ms).unwrap_or(0);
        Ok(Self::default()
            .with_crlf_delay(Duration::from_millis(crlf_ms))
            .with_history_size(s.history_size as usize)
            .with_remove_history_duplicates(s.remove_history_duplicates)
            .with_tab_size(s.tab_size as usize)
            .with_escape_code_timeout(Duration::from_millis(s.escape_code_timeout_ms as u64))
            .with_prompt(s.prompt.clone()))
    }

    pub fn with_crlf_delay(mut self, delay: Duration) -> Self {
        self.crlf_delay = clamp_crlf_delay(delay);
        self
    }

    /// `0` disables history recording.
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    pub fn with_remove_history_duplicates(mut self, remove: bool) -> Self {
        self.remove_history_duplicates = remove;
        self
    }

    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_escape_code_timeout(mut self, timeout: Duration) -> Self {
        self.escape_code_timeout = timeout;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Terminal width used for wrap-aware cursor math.
    pub fn with_columns(mut self, columns: Option<usize>) -> Self {
        self.columns = columns.filter(|c| *c > 0);
        self
    }

    /// Initial history, most recent first.
    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    /// Reject values that cannot be repaired by clamping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_size < 1 {
            return Err(ConfigError::InvalidTabSize(self.tab_size as i64));
        }
        if self.escape_code_timeout.is_zero() {
            return Err(ConfigError::InvalidEscapeTimeout(0));
        }
        Ok(())
    }

    pub fn crlf_delay(&self) -> Duration {
        self.crlf_delay
    }

    pub fn history_size(&self) -> usize {
        self.history_size
    }

    pub fn remove_history_duplicates(&self) -> bool {
        self.remove_history_duplicates
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    pub fn escape_code_timeout(&self) -> Duration {
        self.escape_code_timeout
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn columns(&self) -> Option<usize> {
        self.columns
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSection {
    #[serde(default = "SessionSection::default_crlf_delay_ms")]
    pub crlf_delay_ms: i64,
    #[serde(default = "SessionSection::default_history_size")]
    pub history_size: i64,
    #[serde(default)]
    pub remove_history_duplicates: bool,
    #[serde(default = "SessionSection::default_tab_size")]
    pub tab_size: i64,
    #[serde(default = "SessionSection::default_escape_code_timeout_ms")]
    pub escape_code_timeout_ms: i64,
    #[serde(default = "SessionSection::default_prompt")]
    pub prompt: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            crlf_delay_ms: Self::default_crlf_delay_ms(),
            history_size: Self::default_history_size(),
            remove_history_duplicates: false,
            tab_size: Self::default_tab_size(),
            escape_code_timeout_ms: Self::default_escape_code_timeout_ms(),
            prompt: Self::default_prompt(),
        }
    }
}

impl SessionSection {
    const fn default_crlf_delay_ms() -> i64 {
        DEFAULT_CRLF_DELAY.as_millis() as i64
    }
    const fn default_history_size() -> i64 {
        DEFAULT_HISTORY_SIZE as i64
    }
    const fn default_tab_size() -> i64 {
        DEFAULT_TAB_SIZE as i64
    }
    const fn default_escape_code_timeout_ms() -> i64 {
        DEFAULT_ESCAPE_CODE_TIMEOUT.as_millis() as i64
    }
    fn default_prompt() -> String {
        DEFAULT_PROMPT.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File contents as read; `None` when defaults were used.
    pub raw: Option<String>,
    pub path: Option<PathBuf>,
    /// Parsed file, or defaults.
    pub file: ConfigFile,
}

impl Config {
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::from_file(&self.file)
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxline").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Read and parse `path`, reporting IO and parse failures.
pub fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = toml::from_str::<ConfigFile>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Config {
        raw: Some(content),
        path: Some(path.to_path_buf()),
        file,
    })
}

/// Load `path` (or the discovered path); a missing or malformed file yields
/// the defaults.
pub fn load_from(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = path.unwrap_or_else(discover);
    match read_file(&path) {
        Ok(cfg) => Ok(cfg),
        Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(Config::default())
        }
        Err(err) => {
            info!(target: "config", error = %err, "config_fallback_to_defaults");
            Ok(Config::default())
        }
    }
}
