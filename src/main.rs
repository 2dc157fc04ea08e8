//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the apidex library and the Zellij plugin
//! API. Host events are translated into library [`Event`]s and the returned
//! [`Action`]s are executed as host calls; nothing else lives here.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`, request
//!    `WebAccess` and `RunCommands`, subscribe to events
//! 2. **Grant**: fetch the category catalog and run the configured search
//! 3. **Update**: map host events, delegate to `handle_event`, run actions
//! 4. **Pipe**: `zellij pipe --args q=...` starts a new search
//! 5. **Render**: draw the current state
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search input and command events (see below)
//! - `WebRequestResult` → `Event::WebResponse`
//! - `Timer` → `Event::Timer` (request deadlines)
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//! - `RunCommandResult` of the open command → `Event::LinkOpened`
//!
//! # Keybindings
//!
//! In normal mode:
//! - `/` or `i`: Focus the search field
//! - `j`/`Down`, `k`/`Up`: Move in the focused pane
//! - `Tab`: Switch between results and facets
//! - `Enter`: Open the result link, or toggle the facet
//! - `Space`: Toggle the facet
//! - `r`: Reset facets
//! - `v`: Toggle list/grid view
//! - `s`: Cycle sort order
//! - `f`: Show/hide the facet panel on narrow panes
//! - `1`-`9`: Search a "did you mean" alternative
//! - `q`: Close plugin
//!
//! In search mode:
//! - Type to edit, `Backspace` to delete
//! - `Up`/`Down` or `Ctrl+p`/`Ctrl+n`: Move in suggestions
//! - `Enter`: Search
//! - `Esc`: Leave the search field

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use apidex::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Context key marking `run_command` calls issued for opening links.
const OPEN_LINK_CONTEXT: &str = "apidex_open_link";

struct State {
    app: apidex::AppState,

    /// Command used for [`Action::OpenLink`].
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: apidex::initialize(&config),
            open_command: config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds state, requests permissions and
    /// subscribes to host events. Requests wait for the permission grant.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        apidex::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            backend_url = %config.backend_url,
            initial_params = ?config.initial_params,
            "parsed configuration"
        );
        self.app = apidex::initialize(&config);
        self.open_command = config.open_command;

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
            EventType::RunCommandResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Returns `true` when the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::WebResponse {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                if !context.contains_key(OPEN_LINK_CONTEXT) {
                    return false;
                }
                if exit_code != Some(0) {
                    tracing::debug!(stderr = %String::from_utf8_lossy(&stderr), "open command stderr");
                }
                Event::LinkOpened { exit_code }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Treats pipe arguments as query parameters (`q` plus facet keys).
    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        let span = tracing::debug_span!("plugin_pipe", name = %pipe_message.name);
        let _guard = span.entered();

        if pipe_message.args.is_empty() {
            tracing::debug!("pipe message without arguments, ignoring");
            return false;
        }
        self.dispatch(&Event::QueryParams(pipe_message.args))
    }

    fn render(&mut self, rows: usize, cols: usize) {
        apidex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        let now_ms = chrono::Utc::now().timestamp_millis();
        match handle_event(&mut self.app, event, now_ms) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");
        match self.app.input_mode {
            InputMode::Search => Self::map_search_key(key),
            InputMode::Normal => Self::map_normal_key(key),
        }
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::SuggestionDown),
                BareKey::Char('p') => Some(Event::SuggestionUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::SuggestionDown,
            BareKey::Up => Event::SuggestionUp,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Char('/' | 'i') => Event::SearchMode,
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Tab => Event::SwitchFocus,
            BareKey::Enter => Event::Activate,
            BareKey::Char(' ') => Event::ToggleFacet,
            BareKey::Char('r') => Event::ResetFacets,
            BareKey::Char('v') => Event::ToggleViewType,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('f') => Event::ToggleFacetPanel,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
                Event::DidYouMean(index - 1)
            }
            _ => return None,
        })
    }

    /// Translates a library action into the matching host call.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::WebRequest { url, context } => {
                web_request(
                    url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    Vec::new(),
                    context.clone(),
                );
            }
            Action::ScheduleTimeout { seconds } => {
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*seconds as f64);
            }
            Action::OpenLink { url } => {
                let context = BTreeMap::from([(OPEN_LINK_CONTEXT.to_string(), url.clone())]);
                run_command(&[self.open_command.as_str(), url.as_str()], context);
            }
            Action::CloseFocus => hide_self(),
        }
    }
}
