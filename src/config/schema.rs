use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or
/// `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub status: StatusSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            search: SearchSettings::default(),
            status: StatusSettings::default(),
            ui: UiSettings::default(),
            controls: ControlsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL of the jukebox backend.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Delay between the last keystroke and the lookup request
    /// (milliseconds).
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusSettings {
    /// Delay collapsing bursts of state changes into one status push
    /// (milliseconds).
    pub debounce_ms: u64,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Placeholder shown when nothing is playing.
    pub idle_text: String,
    /// Maximum rows the search-result dropdown shows at once.
    pub results_rows: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ encore! one more song ~ ".to_string(),
            idle_text: "- no song playing -".to_string(),
            results_rows: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds a keyboard seek (`H` / `L`) moves.
    pub seek_step_secs: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { seek_step_secs: 5 }
    }
}
