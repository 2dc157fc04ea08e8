//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for user input and host events.
//! It mutates [`AppState`], collects [`Action`]s for the runtime and finally
//! pulls changed stream values into the view cache, so the returned render flag
//! covers both UI changes and newly committed search state.
//!
//! # Event Types
//!
//! - **Navigation**: `MoveDown`, `MoveUp`, `SwitchFocus`, `ToggleFacetPanel`
//! - **Search field**: `SearchMode`, `Char`, `Backspace`, `SuggestionDown`,
//!   `SuggestionUp`, `Submit`, `ExitSearch`
//! - **Search commands**: `Activate`, `ToggleFacet`, `ResetFacets`, `DidYouMean`
//! - **Presentation**: `ToggleViewType`, `CycleSort`
//! - **Host**: `PermissionsResult`, `QueryParams`, `WebResponse`, `Timer`,
//!   `LinkOpened`
//!
//! Facet selection is handled per call site: submitting a keyword or picking an
//! alternative resets the selection, toggling a facet keeps it, and query
//! parameters replace it.

use crate::app::{Action, AppState, Focus, InputMode};
use crate::domain::error::Result;
use crate::search::{RequestKind, RequestTicket};
use std::collections::BTreeMap;

/// Events triggered by user input or the plugin host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the cursor of the focused pane down (wraps to top).
    MoveDown,
    /// Moves the cursor of the focused pane up (wraps to bottom).
    MoveUp,
    /// Switches navigation between results and facets.
    SwitchFocus,
    /// Opens the selected result, or toggles the selected facet.
    Activate,
    /// Toggles the facet under the cursor and searches again.
    ToggleFacet,
    /// Clears the facet selection and searches again.
    ResetFacets,
    /// Switches between list and grid view.
    ToggleViewType,
    /// Cycles the result sort option.
    CycleSort,
    /// Shows or hides the facet panel on narrow layouts.
    ToggleFacetPanel,
    /// Hides the plugin pane.
    CloseFocus,

    /// Focuses the search field.
    SearchMode,
    /// Appends a character to the search field.
    Char(char),
    /// Removes the last character from the search field.
    Backspace,
    /// Moves the suggestion highlight down.
    SuggestionDown,
    /// Moves the suggestion highlight up.
    SuggestionUp,
    /// Searches the highlighted suggestion, or the typed text.
    Submit,
    /// Leaves the search field without searching.
    ExitSearch,
    /// Searches the n-th alternative keyword (zero based).
    DidYouMean(usize),

    /// Result of the permission request.
    PermissionsResult { granted: bool },

    /// Query parameters (`q` and facet keys) delivered at runtime.
    QueryParams(BTreeMap<String, String>),

    /// A web request completed.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },

    /// A scheduled timer fired; expired requests resolve as timeouts.
    Timer,

    /// The open command for a link finished.
    LinkOpened { exit_code: Option<i32> },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// `now_ms` is the current unix time in milliseconds; it stamps request
/// deadlines and resolves expired ones on [`Event::Timer`].
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed by the runtime in order.
///
/// # Errors
///
/// Currently every event is handled; the `Result` is kept so that the runtime
/// has a single place to log failures.
///
/// # Example
///
/// ```rust
/// use apidex::app::{handle_event, AppState, Event, Settings};
/// use apidex::search::Backend;
/// use apidex::Theme;
///
/// let mut state = AppState::new(Settings::default(), Backend::default(), Theme::default());
/// let (render, actions) = handle_event(&mut state, &Event::SearchMode, 0)?;
/// assert!(render);
/// assert!(actions.is_empty());
/// # Ok::<(), apidex::ApidexError>(())
/// ```
pub fn handle_event(
    state: &mut AppState,
    event: &Event,
    now_ms: i64,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    let (should_render, actions) = dispatch_event(state, event, now_ms);
    let synced = state.sync();

    Ok((should_render || synced, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch_event(state: &mut AppState, event: &Event, now_ms: i64) -> (bool, Vec<Action>) {
    match event {
        Event::MoveDown => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::MoveUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::SwitchFocus => {
            if state.focus == Focus::Results && state.facet_rows().is_empty() {
                tracing::debug!("no facets to focus");
                return (false, vec![]);
            }
            state.focus = state.focus.toggled();
            (true, vec![])
        }
        Event::ToggleFacetPanel => {
            state.facet_panel_open = !state.facet_panel_open;
            state.focus = if state.facet_panel_open && !state.facet_rows().is_empty() {
                Focus::Facets
            } else {
                Focus::Results
            };
            (true, vec![])
        }
        Event::Activate => match state.focus {
            Focus::Results => open_selected_result(state),
            Focus::Facets => toggle_selected_facet(state, now_ms),
        },
        Event::ToggleFacet => {
            if state.focus == Focus::Facets {
                toggle_selected_facet(state, now_ms)
            } else {
                (false, vec![])
            }
        }
        Event::ResetFacets => {
            state.search.reset_facets();
            if state.search.generation() == 0 {
                return (true, vec![]);
            }
            let keyword = state.search.keyword().to_string();
            (true, state.start_search(&keyword, now_ms))
        }
        Event::ToggleViewType => {
            state.view_type = state.view_type.toggled();
            (true, vec![])
        }
        Event::CycleSort => {
            state.sort = state.sort.next();
            state.result_index = 0;
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.suggestion_index = None;
            (true, vec![])
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return (false, vec![]);
            }
            state.search_input.push(*c);
            tracing::trace!(input = %state.search_input, "search input updated");
            (true, state.refresh_suggestions(now_ms))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return (false, vec![]);
            }
            state.search_input.pop();
            (true, state.refresh_suggestions(now_ms))
        }
        Event::SuggestionDown => {
            state.move_suggestion_down();
            (true, vec![])
        }
        Event::SuggestionUp => {
            state.move_suggestion_up();
            (true, vec![])
        }
        Event::Submit => {
            let keyword = state
                .selected_suggestion()
                .unwrap_or(&state.search_input)
                .trim()
                .to_string();
            tracing::debug!(keyword = %keyword, "keyword submitted");

            state.search_input.clone_from(&keyword);
            state.input_mode = InputMode::Normal;
            state.focus = Focus::Results;
            state.suggester.clear();
            state.search.reset_facets();

            if keyword.is_empty() {
                return (true, vec![]);
            }
            (true, state.start_search(&keyword, now_ms))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            state.search_input = state.search.keyword().to_string();
            state.suggester.clear();
            (true, vec![])
        }
        Event::DidYouMean(index) => {
            if !state.offers_alternatives() {
                return (false, vec![]);
            }
            let Some(keyword) = state.alternatives().into_iter().nth(*index) else {
                return (false, vec![]);
            };
            tracing::debug!(keyword = %keyword, "alternative keyword chosen");

            state.search_input.clone_from(&keyword);
            state.search.reset_facets();
            (true, state.start_search(&keyword, now_ms))
        }

        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("web access denied - searches are unavailable");
                return (false, vec![]);
            }
            tracing::debug!("permissions granted");
            state.permissions_granted = true;

            let mut actions = state.request_categories(now_ms);
            let params = std::mem::take(&mut state.settings.initial_params);
            actions.extend(state.apply_query_params(&params, now_ms));
            (true, actions)
        }
        Event::QueryParams(params) => {
            tracing::debug!(params = ?params, "query parameters received");
            (true, state.apply_query_params(params, now_ms))
        }
        Event::WebResponse {
            status,
            body,
            context,
        } => {
            let Some(ticket) = RequestTicket::from_context(context) else {
                tracing::debug!("ignoring web response without request ticket");
                return (false, vec![]);
            };
            if !state.deadlines.resolve(ticket) {
                tracing::debug!(kind = ?ticket.kind, generation = ticket.generation, "ignoring late response");
                return (false, vec![]);
            }
            route_response(state, ticket, *status, body, now_ms);
            (false, vec![])
        }
        Event::Timer => {
            for ticket in state.deadlines.expire(now_ms) {
                route_timeout(state, ticket);
            }
            // Keep a timer armed while any request is outstanding.
            let actions = state
                .deadlines
                .seconds_until_next(now_ms)
                .map(|seconds| Action::ScheduleTimeout { seconds })
                .into_iter()
                .collect();
            (false, actions)
        }
        Event::LinkOpened { exit_code } => {
            if *exit_code == Some(0) {
                tracing::debug!("link opened");
            } else {
                tracing::warn!(exit_code = ?exit_code, "open command failed");
            }
            (false, vec![])
        }
    }
}

fn open_selected_result(state: &AppState) -> (bool, Vec<Action>) {
    let Some(entry) = state.selected_result() else {
        return (false, vec![]);
    };
    match entry.link() {
        Some(url) => {
            tracing::debug!(title = %entry.title, url = %url, "opening result link");
            (false, vec![Action::OpenLink { url: url.to_string() }])
        }
        None => {
            tracing::debug!(title = %entry.title, "result has no valid link");
            (false, vec![])
        }
    }
}

fn toggle_selected_facet(state: &mut AppState, now_ms: i64) -> (bool, Vec<Action>) {
    let Some(facet) = state.selected_facet_row() else {
        return (false, vec![]);
    };
    state.search.toggle_facet(facet);
    let keyword = state.search.keyword().to_string();
    (true, state.start_search(&keyword, now_ms))
}

fn route_response(state: &mut AppState, ticket: RequestTicket, status: u16, body: &[u8], now_ms: i64) {
    let _span = tracing::debug_span!("route_response", kind = ?ticket.kind, status, bytes = body.len()).entered();
    match ticket.kind {
        RequestKind::Search => {
            state.search.on_response(ticket.generation, status, body, now_ms);
        }
        RequestKind::Suggest => {
            state.suggester.on_response(ticket.generation, status, body);
        }
        RequestKind::Categories => {
            state.catalog.on_response(ticket.generation, status, body);
        }
    }
}

fn route_timeout(state: &mut AppState, ticket: RequestTicket) {
    match ticket.kind {
        RequestKind::Search => {
            let seconds = state.settings.request_timeout_secs;
            state.search.on_timeout(ticket.generation, seconds);
        }
        RequestKind::Suggest => {
            state.suggester.on_timeout(ticket.generation);
        }
        RequestKind::Categories => {
            state.catalog.on_timeout(ticket.generation);
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::MoveDown => "MoveDown",
        Event::MoveUp => "MoveUp",
        Event::SwitchFocus => "SwitchFocus",
        Event::Activate => "Activate",
        Event::ToggleFacet => "ToggleFacet",
        Event::ResetFacets => "ResetFacets",
        Event::ToggleViewType => "ToggleViewType",
        Event::CycleSort => "CycleSort",
        Event::ToggleFacetPanel => "ToggleFacetPanel",
        Event::CloseFocus => "CloseFocus",
        Event::SearchMode => "SearchMode",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::SuggestionDown => "SuggestionDown",
        Event::SuggestionUp => "SuggestionUp",
        Event::Submit => "Submit",
        Event::ExitSearch => "ExitSearch",
        Event::DidYouMean(_) => "DidYouMean",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::QueryParams(_) => "QueryParams",
        Event::WebResponse { .. } => "WebResponse",
        Event::Timer => "Timer",
        Event::LinkOpened { .. } => "LinkOpened",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Settings;
    use crate::domain::SelectedFacet;
    use crate::search::Backend;
    use crate::ui::Theme;

    const CATS: &[u8] = br#"{"count":2,"entries":[
        {"API":"Cat Facts","Description":"Daily cat facts","Auth":"","HTTPS":true,"Cors":"no","Link":"https://catfact.ninja","Category":"Animals"},
        {"API":"Cataas","Description":"Cat as a service","Auth":"apiKey","HTTPS":true,"Cors":"no","Link":"https://cataas.com","Category":"Animals"}
    ]}"#;

    fn granted() -> AppState {
        let mut state = AppState::new(Settings::default(), Backend::default(), Theme::default());
        let _ = handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();
        state
    }

    fn context_of(actions: &[Action]) -> BTreeMap<String, String> {
        actions
            .iter()
            .find_map(|action| match action {
                Action::WebRequest { context, .. } => Some(context.clone()),
                _ => None,
            })
            .unwrap()
    }

    fn respond(state: &mut AppState, actions: &[Action], body: &[u8], now_ms: i64) -> bool {
        let event = Event::WebResponse {
            status: 200,
            body: body.to_vec(),
            context: context_of(actions),
        };
        handle_event(state, &event, now_ms).unwrap().0
    }

    fn requests_in(actions: &[Action]) -> Vec<&Action> {
        actions
            .iter()
            .filter(|action| matches!(action, Action::WebRequest { .. }))
            .collect()
    }

    fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
        let _ = handle_event(state, &Event::SearchMode, 0).unwrap();
        state.search_input.clear();
        let mut last = vec![];
        for c in text.chars() {
            last = handle_event(state, &Event::Char(c), 0).unwrap().1;
        }
        last
    }

    fn submit(state: &mut AppState, keyword: &str) -> Vec<Action> {
        type_text(state, keyword);
        handle_event(state, &Event::Submit, 0).unwrap().1
    }

    #[test]
    fn grant_fetches_categories() {
        let mut state = AppState::new(Settings::default(), Backend::default(), Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }, 0).unwrap();
        assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("/categories")));
    }

    #[test]
    fn suggestions_start_at_min_chars() {
        let mut state = granted();
        assert!(type_text(&mut state, "c").is_empty());
        let actions = handle_event(&mut state, &Event::Char('a'), 0).unwrap().1;
        assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("title=ca")));

        respond(&mut state, &actions, CATS, 5);
        assert_eq!(state.suggestions(), ["Cat Facts", "Cataas"]);
    }

    #[test]
    fn submit_uses_highlighted_suggestion() {
        let mut state = granted();
        let actions = type_text(&mut state, "cat");
        respond(&mut state, &actions, CATS, 5);

        let _ = handle_event(&mut state, &Event::SuggestionDown, 0).unwrap();
        let _ = handle_event(&mut state, &Event::SuggestionDown, 0).unwrap();
        let actions = handle_event(&mut state, &Event::Submit, 0).unwrap().1;

        assert_eq!(state.search_input, "Cataas");
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("title=Cataas")));
    }

    #[test]
    fn submit_resets_facets_but_toggle_keeps_them() {
        let mut state = granted();
        let actions = submit(&mut state, "cat");
        respond(&mut state, &actions, CATS, 5);

        let _ = handle_event(&mut state, &Event::SwitchFocus, 0).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ToggleFacet, 0).unwrap();
        assert!(state.search.selected_facets().contains("auth", "apiKey"));
        assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("title=cat&auth=apiKey")));

        let _ = submit(&mut state, "dog");
        assert!(state.search.selected_facets().is_empty());
    }

    #[test]
    fn enter_opens_result_link() {
        let mut state = granted();
        let actions = submit(&mut state, "cat");
        respond(&mut state, &actions, CATS, 5);

        let _ = handle_event(&mut state, &Event::MoveDown, 0).unwrap();
        let (render, actions) = handle_event(&mut state, &Event::Activate, 0).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::OpenLink { url: "https://cataas.com/".to_string() }]);
    }

    #[test]
    fn timer_fails_search_after_deadline() {
        let mut state = granted();
        let actions = submit(&mut state, "slow");
        assert!(state.is_loading());

        let (render, rearm) = handle_event(&mut state, &Event::Timer, 5_000).unwrap();
        assert!(!render);
        assert!(state.is_loading());
        assert_eq!(rearm, vec![Action::ScheduleTimeout { seconds: 5 }]);

        let (render, rearm) = handle_event(&mut state, &Event::Timer, 10_000).unwrap();
        assert!(render);
        assert!(rearm.is_empty());
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("Request timed out after 10s"));

        assert!(!respond(&mut state, &actions, CATS, 11_000));
        assert!(state.results().is_empty());
    }

    #[test]
    fn empty_submit_after_toggle_unmarks_facets() {
        let mut state = granted();
        let actions = submit(&mut state, "cat");
        respond(&mut state, &actions, CATS, 5);

        let _ = handle_event(&mut state, &Event::SwitchFocus, 0).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ToggleFacet, 0).unwrap();
        respond(&mut state, &actions, CATS, 10);
        assert!(state.facets()[0].entries[0].selected);

        let actions = submit(&mut state, "");
        assert!(requests_in(&actions).is_empty());
        assert!(state.search.selected_facets().is_empty());
        assert!(state.facets()[0]
            .entries
            .iter()
            .all(|entry| !entry.selected));

        let _ = handle_event(&mut state, &Event::SwitchFocus, 0).unwrap();
        let _ = handle_event(&mut state, &Event::ToggleFacet, 20).unwrap();
        assert!(state.search.selected_facets().contains("auth", "apiKey"));
    }

    #[test]
    fn reset_searches_again_without_facets() {
        let mut state = granted();
        let actions = submit(&mut state, "cat");
        respond(&mut state, &actions, CATS, 5);
        state.search.toggle_facet(SelectedFacet::new("auth", "OAuth"));

        let (_, actions) = handle_event(&mut state, &Event::ResetFacets, 10).unwrap();
        assert!(state.search.selected_facets().is_empty());
        assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("entries?title=cat")));
    }

    #[test]
    fn did_you_mean_only_on_no_results() {
        let mut state = granted();
        let actions = submit(&mut state, "cat");
        respond(&mut state, &actions, CATS, 5);
        assert!(handle_event(&mut state, &Event::DidYouMean(0), 10).unwrap().1.is_empty());

        let actions = submit(&mut state, "xyzzy");
        respond(&mut state, &actions, br#"{"count":0,"entries":null}"#, 20);
        let (_, actions) = handle_event(&mut state, &Event::DidYouMean(1), 30).unwrap();
        assert_eq!(state.search_input, "Jobs");
        assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("title=Jobs")));
    }

    #[test]
    fn foreign_responses_are_ignored() {
        let mut state = granted();
        let event = Event::WebResponse {
            status: 200,
            body: CATS.to_vec(),
            context: BTreeMap::new(),
        };
        assert_eq!(handle_event(&mut state, &event, 0).unwrap(), (false, vec![]));
    }
}
