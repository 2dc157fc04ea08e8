//! apidex: a Zellij plugin for searching a public API directory.
//!
//! The plugin lets the user type a keyword, pick autocomplete suggestions,
//! narrow results with facets (authentication type) and open the link of a
//! result, all against a public REST backend.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← host calls
//! └─────────────────────────────────────────────────────┘
//!                        │ Event ↓   ↑ Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, modes, view model computation    │
//! └─────────────────────────────────────────────────────┘
//!            │                              │
//! ┌─────────────────────────┐   ┌───────────────────────┐
//! │ Search Layer (search/)  │   │ UI Layer (ui/)        │
//! │ - Orchestrator          │   │ - Components          │
//! │ - Suggestions, catalog  │   │ - Theming             │
//! │ - Response adapter      │   │ - Responsive layout   │
//! └─────────────────────────┘   └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Wire records, facets, result entries, errors     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library performs no I/O of its own. Web requests, timers and link
//! opening are returned as [`Action`]s and their outcomes come back as
//! [`Event`]s, so the whole flow is testable off-host.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/apidex.wasm" {
//!         backend_url "https://api.publicapis.org/"
//!         q "weather"
//!         auth "apiKey,OAuth"
//!         suggestions "5"
//!         suggest_min_chars "2"
//!         request_timeout "10"
//!         open_command "xdg-open"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!         contact "office@example.org"
//!     }
//! }
//! ```
//!
//! At runtime a search can also be started with
//! `zellij pipe --plugin apidex --args "q=weather,auth=OAuth"`.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use apidex::{handle_event, initialize, Config, Event};
//!
//! let config = Config::from_zellij(&BTreeMap::new());
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0)?;
//! // The category catalog is fetched as soon as web access is granted.
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), apidex::ApidexError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Settings};
pub use domain::{ApidexError, Result};
pub use ui::Theme;

use domain::KNOWN_FACETS;
use search::{Backend, DEFAULT_BACKEND_URL};
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST backend. Default: [`DEFAULT_BACKEND_URL`].
    pub backend_url: String,

    /// `q` and facet keys to search with once permissions are granted.
    pub initial_params: BTreeMap<String, String>,

    /// Maximum number of suggestions. Default: 5
    pub suggestion_count: usize,

    /// Minimum typed characters before suggestions are requested. Default: 2
    pub suggest_min_chars: usize,

    /// Per-request deadline in seconds. Default: 10
    pub request_timeout_secs: u64,

    /// Command used to open result links. Default: `xdg-open`
    pub open_command: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme; `~` maps to the host home directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,

    /// Contact shown when a search finds nothing, e.g. a support address.
    pub contact: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            initial_params: BTreeMap::new(),
            suggestion_count: settings.suggestion_count,
            suggest_min_chars: settings.suggest_min_chars,
            request_timeout_secs: settings.request_timeout_secs,
            open_command: "xdg-open".to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            contact: None,
        }
    }
}

impl Config {
    /// Parses the configuration map with fallback defaults.
    ///
    /// Numeric values that fail to parse (or are zero, for the timeout and
    /// suggestion count) keep their defaults. An invalid `backend_url` is
    /// replaced by the default backend.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use apidex::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("q".to_string(), "weather".to_string());
    /// map.insert("auth".to_string(), "OAuth".to_string());
    /// map.insert("suggestions".to_string(), "3".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.suggestion_count, 3);
    /// assert_eq!(config.initial_params.get("q").map(String::as_str), Some("weather"));
    /// assert_eq!(config.initial_params.len(), 2);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let backend_url = config
            .get("backend_url")
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .and_then(|url| match Backend::new(url).validate() {
                Ok(()) => Some(url.to_string()),
                Err(e) => {
                    tracing::warn!(backend_url = %url, error = %e, "invalid backend_url, using default");
                    None
                }
            })
            .unwrap_or(defaults.backend_url);

        let initial_params = config
            .iter()
            .filter(|(key, _)| key.as_str() == "q" || KNOWN_FACETS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let positive = |key: &str| {
            config
                .get(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|n| *n > 0)
        };

        Self {
            backend_url,
            initial_params,
            suggestion_count: positive("suggestions")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.suggestion_count),
            suggest_min_chars: config
                .get("suggest_min_chars")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(defaults.suggest_min_chars),
            request_timeout_secs: positive("request_timeout")
                .unwrap_or(defaults.request_timeout_secs),
            open_command: config
                .get("open_command")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.open_command),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            contact: config
                .get("contact")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// The behavior subset handed to [`AppState`].
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            suggestion_count: self.suggestion_count,
            suggest_min_chars: self.suggest_min_chars,
            request_timeout_secs: self.request_timeout_secs,
            initial_params: self.initial_params.clone(),
            contact: self.contact.clone(),
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    /// Load failures are logged and fall back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the application state for `config`.
///
/// No request is issued here: the initial search (if `q` is configured) and
/// the category fetch wait for the web access permission.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(backend_url = %config.backend_url, "initializing apidex plugin");
    AppState::new(
        config.settings(),
        Backend::new(&config.backend_url),
        config.theme(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.backend_url, "https://api.publicapis.org/");
        assert_eq!(config.suggestion_count, 5);
        assert_eq!(config.suggest_min_chars, 2);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.open_command, "xdg-open");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("backend_url", "ftp://example.com"),
            ("suggestions", "0"),
            ("request_timeout", "soon"),
            ("open_command", "  "),
        ]));
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.suggestion_count, 5);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.open_command, "xdg-open");
    }

    #[test]
    fn custom_backend_and_timeout() {
        let config = Config::from_zellij(&map(&[
            ("backend_url", "http://localhost:8080/api"),
            ("request_timeout", "3"),
            ("suggest_min_chars", "0"),
            ("open_command", "open"),
        ]));
        assert_eq!(config.backend_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.suggest_min_chars, 0);
        assert_eq!(config.open_command, "open");
    }

    #[test]
    fn contact_is_optional_and_trimmed() {
        assert_eq!(Config::from_zellij(&map(&[("contact", "   ")])).contact, None);

        let config = Config::from_zellij(&map(&[("contact", " office@example.org ")]));
        assert_eq!(config.contact.as_deref(), Some("office@example.org"));
        assert_eq!(config.settings().contact.as_deref(), Some("office@example.org"));
    }

    #[test]
    fn only_query_and_facet_keys_become_params() {
        let config = Config::from_zellij(&map(&[
            ("q", "cats"),
            ("auth", "OAuth"),
            ("theme", "catppuccin-latte"),
        ]));
        assert_eq!(config.initial_params, map(&[("q", "cats"), ("auth", "OAuth")]));
        assert_eq!(config.settings().initial_params, config.initial_params);
    }

    #[test]
    fn theme_resolution() {
        let named = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(named.theme().name, "catppuccin-latte");

        let unknown = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(unknown.theme(), Theme::default());

        let missing_file = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some("/does/not/exist.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(missing_file.theme(), Theme::default());
    }

    #[test]
    fn initialize_uses_configured_backend() {
        let config = Config::from_zellij(&map(&[("backend_url", "http://localhost:9000")]));
        let state = initialize(&config);
        assert_eq!(state.search.backend().base(), "http://localhost:9000/");
        assert!(!state.permissions_granted);
    }
}
