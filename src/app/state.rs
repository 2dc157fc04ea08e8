//! Application state management and view model computation.
//!
//! [`AppState`] owns the search layer (orchestrator, suggestion provider and
//! category catalog), the outstanding request deadlines and all transient UI
//! state. It is the explicit container the shell works against; nothing in the
//! crate keeps search state in a global.
//!
//! # Subscriptions
//!
//! The shell reads shared search state through [`Subscription`] handles created
//! in [`AppState::new`]. [`AppState::sync`] pulls whatever changed into a local
//! view cache, which is what rendering reads. [`AppState::teardown`] releases
//! every handle; dropping the state does the same.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns the cache and UI state into a
//! [`UIViewModel`] for the given pane size: it picks the breakpoint, decides
//! whether the facet panel is visible, windows the result cards around the
//! cursor and computes keyword highlight ranges.

use super::actions::Action;
use super::modes::{Breakpoint, Focus, InputMode, ResultViewType, SortOption};
use crate::domain::{FacetGroup, ResultEntry, SearchResultMeta, SelectedFacet, SelectedFacets};
use crate::search::{
    Backend, CategoryCatalog, Deadlines, OutboundRequest, SearchOrchestrator, Subscription,
    SuggestionProvider,
};
use crate::ui::helpers::highlight_ranges;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FacetGroupInfo, FacetPanelInfo, FacetRow, FooterInfo, HeaderInfo, ResultCard,
    ResultListInfo, SearchBarInfo, SuggestionItem, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeMap;

/// Keywords offered on the no-results panel when no category resembles the
/// searched keyword.
pub const DEFAULT_ALTERNATIVES: [&str; 4] = ["Sports", "Jobs", "News", "Books"];

const MAX_ALTERNATIVES: usize = 4;

/// Rows used by header, borders, search box and footer.
const CHROME_ROWS: usize = 9;

/// Meta line plus the blank line below it.
const RESULT_HEADER_ROWS: usize = 2;

/// Behavior settings taken from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Maximum number of suggestions shown while typing.
    pub suggestion_count: usize,

    /// Minimum input length before suggestions are requested.
    pub suggest_min_chars: usize,

    /// Deadline applied to every backend request.
    pub request_timeout_secs: u64,

    /// Query parameters applied once permissions are granted (`q` and facet
    /// keys).
    pub initial_params: BTreeMap<String, String>,

    /// Contact line shown under the "did you mean" choices.
    pub contact: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            suggestion_count: 5,
            suggest_min_chars: 2,
            request_timeout_secs: 10,
            initial_params: BTreeMap::new(),
            contact: None,
        }
    }
}

/// Last values pulled from the shared streams.
#[derive(Debug, Clone, Default)]
struct ViewCache {
    facets: Vec<FacetGroup>,
    results: Vec<ResultEntry>,
    meta: SearchResultMeta,
    loading: bool,
    error: Option<String>,
    suggestions: Vec<String>,
    categories: Vec<String>,
}

/// Subscription handles held by the shell for its lifetime.
#[derive(Debug)]
struct ShellSubscriptions {
    facets: Subscription<Vec<FacetGroup>>,
    results: Subscription<Vec<ResultEntry>>,
    meta: Subscription<SearchResultMeta>,
    loading: Subscription<bool>,
    error: Subscription<Option<String>>,
    suggestions: Subscription<Vec<String>>,
    categories: Subscription<Vec<String>>,
}

/// Which cached streams changed during a pull.
#[derive(Debug, Default)]
struct Changes {
    any: bool,
    results: bool,
    suggestions: bool,
}

impl ShellSubscriptions {
    fn attach(
        search: &SearchOrchestrator,
        suggester: &SuggestionProvider,
        catalog: &CategoryCatalog,
    ) -> Self {
        Self {
            facets: search.facets().subscribe(),
            results: search.results().subscribe(),
            meta: search.meta().subscribe(),
            loading: search.loading().subscribe(),
            error: search.error().subscribe(),
            suggestions: suggester.suggestions().subscribe(),
            categories: catalog.categories().subscribe(),
        }
    }

    fn pull(&mut self, cache: &mut ViewCache) -> Changes {
        let mut changes = Changes::default();
        if let Some(facets) = self.facets.changed() {
            cache.facets = facets;
            changes.any = true;
        }
        if let Some(results) = self.results.changed() {
            cache.results = results;
            changes.any = true;
            changes.results = true;
        }
        if let Some(meta) = self.meta.changed() {
            cache.meta = meta;
            changes.any = true;
        }
        if let Some(loading) = self.loading.changed() {
            cache.loading = loading;
            changes.any = true;
        }
        if let Some(error) = self.error.changed() {
            cache.error = error;
            changes.any = true;
        }
        if let Some(suggestions) = self.suggestions.changed() {
            cache.suggestions = suggestions;
            changes.any = true;
            changes.suggestions = true;
        }
        if let Some(categories) = self.categories.changed() {
            cache.categories = categories;
            changes.any = true;
        }
        changes
    }
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Keyword, facet selection and result streams.
    pub search: SearchOrchestrator,

    /// Autocomplete for the search field.
    pub suggester: SuggestionProvider,

    /// Categories used for "did you mean" alternatives.
    pub catalog: CategoryCatalog,

    /// Deadlines of outstanding web requests.
    pub deadlines: Deadlines,

    pub settings: Settings,

    /// Set once the host granted web access. Requests before that are
    /// deferred.
    pub permissions_granted: bool,

    pub input_mode: InputMode,

    /// Text in the search field.
    pub search_input: String,

    /// Highlighted suggestion, if the user moved into the dropdown.
    pub suggestion_index: Option<usize>,

    pub focus: Focus,

    /// Cursor within the sorted results.
    pub result_index: usize,

    /// Cursor within the flattened facet entries.
    pub facet_index: usize,

    pub view_type: ResultViewType,

    pub sort: SortOption,

    /// Facet panel toggled open on mobile layouts.
    pub facet_panel_open: bool,

    pub theme: Theme,

    view: ViewCache,
    subscriptions: Option<ShellSubscriptions>,
}

impl AppState {
    /// Creates the state and subscribes the shell to the shared streams.
    #[must_use]
    pub fn new(settings: Settings, backend: Backend, theme: Theme) -> Self {
        let search = SearchOrchestrator::new(backend);
        let suggester = SuggestionProvider::new();
        let catalog = CategoryCatalog::new();
        let subscriptions = Some(ShellSubscriptions::attach(&search, &suggester, &catalog));

        let mut state = Self {
            search,
            suggester,
            catalog,
            deadlines: Deadlines::new(),
            settings,
            permissions_granted: false,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            suggestion_index: None,
            focus: Focus::Results,
            result_index: 0,
            facet_index: 0,
            view_type: ResultViewType::Grid,
            sort: SortOption::Relevance,
            facet_panel_open: false,
            theme,
            view: ViewCache::default(),
            subscriptions,
        };
        state.sync();
        state
    }

    /// Releases every subscription handle. Later publications no longer reach
    /// the view cache.
    pub fn teardown(&mut self) {
        if self.subscriptions.take().is_some() {
            tracing::debug!("shell subscriptions released");
        }
    }

    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Pulls changed stream values into the view cache.
    ///
    /// Returns `true` if anything changed and the UI should re-render.
    pub fn sync(&mut self) -> bool {
        let Some(subscriptions) = self.subscriptions.as_mut() else {
            return false;
        };
        let changes = subscriptions.pull(&mut self.view);

        if changes.results {
            self.result_index = 0;
        }
        if changes.suggestions {
            self.suggestion_index = None;
        }
        let facet_count = self.facet_rows().len();
        self.facet_index = self.facet_index.min(facet_count.saturating_sub(1));
        if facet_count == 0 && self.focus == Focus::Facets {
            self.focus = Focus::Results;
        }

        changes.any
    }

    #[must_use]
    pub fn results(&self) -> &[ResultEntry] {
        &self.view.results
    }

    #[must_use]
    pub fn facets(&self) -> &[FacetGroup] {
        &self.view.facets
    }

    #[must_use]
    pub const fn meta(&self) -> &SearchResultMeta {
        &self.view.meta
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.view.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.view.error.as_deref()
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.view.suggestions
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.view.categories
    }

    /// Tracks the request deadline and returns the actions that send it.
    pub fn dispatch(&mut self, request: OutboundRequest, now_ms: i64) -> Vec<Action> {
        let timeout = self.settings.request_timeout_secs;
        let timeout_ms = i64::try_from(timeout.saturating_mul(1000)).unwrap_or(i64::MAX);
        let deadline = now_ms.saturating_add(timeout_ms);
        self.deadlines.track(request.ticket, deadline);

        tracing::debug!(
            kind = ?request.ticket.kind,
            generation = request.ticket.generation,
            timeout_secs = timeout,
            "request dispatched"
        );

        vec![
            Action::WebRequest {
                url: request.url.to_string(),
                context: request.ticket.to_context(),
            },
            Action::ScheduleTimeout { seconds: timeout },
        ]
    }

    /// Searches `keyword` with the current facet selection. Nothing is sent
    /// without web access.
    pub fn start_search(&mut self, keyword: &str, now_ms: i64) -> Vec<Action> {
        if !self.permissions_granted {
            tracing::warn!(keyword = %keyword, "no web access, search skipped");
            return vec![];
        }
        self.result_index = 0;
        match self.search.search(keyword, now_ms) {
            Some(request) => self.dispatch(request, now_ms),
            None => vec![],
        }
    }

    /// Requests suggestions for the current input, or clears them when the
    /// input is too short.
    pub fn refresh_suggestions(&mut self, now_ms: i64) -> Vec<Action> {
        let partial = self.search_input.trim().to_string();
        if !self.permissions_granted || partial.chars().count() < self.settings.suggest_min_chars {
            self.suggester.clear();
            return vec![];
        }
        let max = self.settings.suggestion_count;
        match self.suggester.suggest(self.search.backend(), &partial, max) {
            Some(request) => self.dispatch(request, now_ms),
            None => vec![],
        }
    }

    pub fn request_categories(&mut self, now_ms: i64) -> Vec<Action> {
        match self.catalog.request(self.search.backend()) {
            Some(request) => self.dispatch(request, now_ms),
            None => vec![],
        }
    }

    /// Applies query parameters: if `q` is non-empty, the facet selection is
    /// rebuilt from the parameters and a search is issued.
    ///
    /// Parameters arriving before permissions are granted are kept and applied
    /// on grant.
    pub fn apply_query_params(
        &mut self,
        params: &BTreeMap<String, String>,
        now_ms: i64,
    ) -> Vec<Action> {
        if !self.permissions_granted {
            tracing::debug!("deferring query parameters until permissions are granted");
            self.settings.initial_params.clone_from(params);
            return vec![];
        }

        let keyword = params.get("q").map_or("", |q| q.trim());
        if keyword.is_empty() {
            tracing::debug!("query parameters without keyword, ignoring");
            return vec![];
        }

        let keyword = keyword.to_string();
        self.search
            .set_selected_facets(SelectedFacets::from_params(params));
        self.search_input.clone_from(&keyword);
        self.start_search(&keyword, now_ms)
    }

    /// Results in display order.
    #[must_use]
    pub fn sorted_results(&self) -> Vec<&ResultEntry> {
        let mut results: Vec<&ResultEntry> = self.view.results.iter().collect();
        if self.sort == SortOption::Title {
            results.sort_by_cached_key(|entry| entry.title.to_lowercase());
        }
        results
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&ResultEntry> {
        self.sorted_results().get(self.result_index).copied()
    }

    /// Facet entries flattened across groups, in panel order.
    #[must_use]
    pub fn facet_rows(&self) -> Vec<SelectedFacet> {
        self.view
            .facets
            .iter()
            .flat_map(|group| {
                group
                    .entries
                    .iter()
                    .map(|entry| SelectedFacet::new(&group.name, &entry.name))
            })
            .collect()
    }

    #[must_use]
    pub fn selected_facet_row(&self) -> Option<SelectedFacet> {
        self.facet_rows().into_iter().nth(self.facet_index)
    }

    /// Whether the no-results panel with "did you mean" choices is showing.
    #[must_use]
    pub fn offers_alternatives(&self) -> bool {
        self.view.results.is_empty()
            && self.view.meta.has_searched()
            && self.view.error.is_none()
            && !self.view.loading
    }

    /// Alternative keywords for an unsuccessful search.
    ///
    /// Categories resembling the keyword come first, best match first. Without
    /// any, the fixed [`DEFAULT_ALTERNATIVES`] are offered.
    #[must_use]
    pub fn alternatives(&self) -> Vec<String> {
        let keyword = self.search.keyword().trim();
        let mut alternatives = Vec::new();

        if !keyword.is_empty() {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, &String)> = self
                .view
                .categories
                .iter()
                .filter_map(|category| {
                    matcher
                        .fuzzy_match(category, keyword)
                        .map(|score| (score, category))
                })
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            alternatives = scored
                .into_iter()
                .take(MAX_ALTERNATIVES)
                .map(|(_, category)| category.clone())
                .collect();
        }

        if alternatives.is_empty() {
            alternatives = DEFAULT_ALTERNATIVES.iter().map(ToString::to_string).collect();
        }
        alternatives
    }

    /// Moves the cursor of the focused pane down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let (index, len) = self.focused_cursor();
        if len == 0 {
            return;
        }
        *index = (*index + 1) % len;
    }

    /// Moves the cursor of the focused pane up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let (index, len) = self.focused_cursor();
        if len == 0 {
            return;
        }
        *index = if *index == 0 { len - 1 } else { *index - 1 };
    }

    fn focused_cursor(&mut self) -> (&mut usize, usize) {
        match self.focus {
            Focus::Results => (&mut self.result_index, self.view.results.len()),
            Focus::Facets => {
                let len = self.facet_rows().len();
                (&mut self.facet_index, len)
            }
        }
    }

    pub fn move_suggestion_down(&mut self) {
        let len = self.view.suggestions.len();
        if len == 0 {
            return;
        }
        self.suggestion_index = Some(self.suggestion_index.map_or(0, |i| (i + 1) % len));
    }

    pub fn move_suggestion_up(&mut self) {
        let len = self.view.suggestions.len();
        if len == 0 {
            return;
        }
        self.suggestion_index = Some(match self.suggestion_index {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }

    /// Highlighted suggestion text, if any.
    #[must_use]
    pub fn selected_suggestion(&self) -> Option<&str> {
        self.suggestion_index
            .and_then(|i| self.view.suggestions.get(i))
            .map(String::as_str)
    }

    /// Query-string form of the current search, as it would appear in a
    /// shareable location.
    ///
    /// # Examples
    ///
    /// ```
    /// use apidex::app::{AppState, Settings};
    /// use apidex::domain::SelectedFacet;
    /// use apidex::search::Backend;
    /// use apidex::Theme;
    ///
    /// let mut state = AppState::new(Settings::default(), Backend::default(), Theme::default());
    /// state.permissions_granted = true;
    /// let _ = state.start_search("open data", 0);
    /// state.search.toggle_facet(SelectedFacet::new("auth", "OAuth"));
    /// assert_eq!(state.query_string(), "q=open+data&auth=OAuth");
    /// ```
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("q", self.search.keyword());
        for facet in self.search.selected_facets().iter() {
            query.append_pair(&facet.facet_name, &facet.facet_entry_name);
        }
        query.finish()
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let breakpoint = Breakpoint::from_cols(cols);
        let facet_panel = self.compute_facet_panel(breakpoint, cols);

        let overlay = breakpoint == Breakpoint::Mobile && facet_panel.is_some();
        let result_width = match &facet_panel {
            Some(panel) if !overlay => cols.saturating_sub(panel.width + 1),
            _ => cols,
        };

        let (results, empty_state) = if overlay {
            (None, None)
        } else if self.view.results.is_empty() {
            (None, Some(self.compute_empty_state()))
        } else {
            let body_rows = rows.saturating_sub(CHROME_ROWS);
            (
                Some(self.compute_result_list(body_rows, breakpoint, result_width)),
                None,
            )
        };

        UIViewModel {
            breakpoint,
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            facet_panel,
            results,
            empty_state,
            footer: self.compute_footer(breakpoint),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: " Public API Search ".to_string(),
            badge: self.search.selected_facets().len(),
            loading: self.view.loading,
            location: if self.search.keyword().is_empty() {
                String::new()
            } else {
                format!("?{}", self.query_string())
            },
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let active = self.input_mode == InputMode::Search;
        let suggestions = if active {
            self.view
                .suggestions
                .iter()
                .enumerate()
                .map(|(i, text)| SuggestionItem {
                    text: text.clone(),
                    highlight_ranges: highlight_ranges(text, self.search_input.trim()),
                    is_selected: self.suggestion_index == Some(i),
                })
                .collect()
        } else {
            vec![]
        };

        SearchBarInfo {
            query: self.search_input.clone(),
            active,
            suggestions,
        }
    }

    fn compute_facet_panel(&self, breakpoint: Breakpoint, cols: usize) -> Option<FacetPanelInfo> {
        if self.view.facets.is_empty() {
            return None;
        }

        let width = match breakpoint.facet_panel_width() {
            Some(width) => width,
            None if self.facet_panel_open || self.focus == Focus::Facets => cols,
            None => return None,
        };

        let mut row_index = 0;
        let groups = self
            .view
            .facets
            .iter()
            .map(|group| FacetGroupInfo {
                label: group.screen_name.clone(),
                rows: group
                    .entries
                    .iter()
                    .map(|entry| {
                        let row = FacetRow {
                            label: entry.view_name.clone(),
                            count: entry.number_of_results,
                            selected: entry.selected,
                            is_cursor: self.focus == Focus::Facets
                                && row_index == self.facet_index,
                        };
                        row_index += 1;
                        row
                    })
                    .collect(),
            })
            .collect();

        Some(FacetPanelInfo {
            groups,
            focused: self.focus == Focus::Facets && self.input_mode == InputMode::Normal,
            width,
        })
    }

    fn compute_result_list(
        &self,
        body_rows: usize,
        breakpoint: Breakpoint,
        width: usize,
    ) -> ResultListInfo {
        let sorted = self.sorted_results();
        let columns = match self.view_type {
            ResultViewType::List => 1,
            ResultViewType::Grid => breakpoint.grid_columns(),
        };

        let row_height = ResultCard::HEIGHT + 1;
        let visible_rows = (body_rows.saturating_sub(RESULT_HEADER_ROWS) / row_height).max(1);
        let total_rows = sorted.len().div_ceil(columns);
        let selected_row = self.result_index / columns;

        let mut start_row = selected_row.saturating_sub(visible_rows / 2);
        if start_row + visible_rows > total_rows {
            start_row = total_rows.saturating_sub(visible_rows);
        }
        let start = start_row * columns;
        let end = ((start_row + visible_rows) * columns).min(sorted.len());

        let keyword = self.view.meta.keyword.trim();
        let cards = sorted[start..end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| ResultCard {
                title: entry.title.clone(),
                title_highlights: highlight_ranges(&entry.title, keyword),
                description: entry.description.clone(),
                badges: entry
                    .sub_titles
                    .iter()
                    .map(|sub| sub.description.clone())
                    .collect(),
                tags: entry.tags.clone(),
                link: entry.link().map(|url| url.to_string()),
                is_selected: start + offset == self.result_index,
            })
            .collect();

        let meta = &self.view.meta;
        let meta_line = format!(
            "{} results for \"{}\" · showing {}-{} · sorted by {} · {} view",
            meta.num_found,
            meta.keyword,
            start + 1,
            end,
            self.sort.label(),
            self.view_type.label(),
        );

        tracing::trace!(width, start, end, columns, "result window computed");

        ResultListInfo {
            meta_line,
            view_type: self.view_type,
            columns,
            cards,
            focused: self.focus == Focus::Results && self.input_mode == InputMode::Normal,
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        if let Some(error) = &self.view.error {
            return EmptyState {
                message: "Search failed".to_string(),
                subtitle: error.clone(),
                alternatives: vec![],
                is_error: true,
                contact: None,
            };
        }

        if self.view.loading {
            return EmptyState {
                message: "Searching...".to_string(),
                subtitle: self.search.keyword().to_string(),
                alternatives: vec![],
                is_error: false,
                contact: None,
            };
        }

        if !self.view.meta.has_searched() {
            return EmptyState {
                message: "Search the public API directory".to_string(),
                subtitle: "Press / and type a keyword".to_string(),
                alternatives: vec![],
                is_error: false,
                contact: None,
            };
        }

        let alternatives = self.alternatives();
        EmptyState {
            message: format!("No results for \"{}\"", self.view.meta.keyword),
            subtitle: format!("Did you mean (1-{}):", alternatives.len()),
            alternatives,
            is_error: false,
            contact: self.settings.contact.clone(),
        }
    }

    fn compute_footer(&self, breakpoint: Breakpoint) -> FooterInfo {
        let keybindings = match (self.input_mode, self.focus) {
            (InputMode::Search, _) => {
                "Enter: search  Up/Down: suggestions  Esc: cancel  Type to edit".to_string()
            }
            (InputMode::Normal, Focus::Facets) => {
                "j/k: move  Space/Enter: toggle  r: reset  Tab: results  q: quit".to_string()
            }
            (InputMode::Normal, Focus::Results) => {
                let mut keys = String::from("/: search  j/k: move  Enter: open  Tab: facets");
                if breakpoint == Breakpoint::Mobile {
                    keys.push_str("  f: filters");
                }
                keys.push_str("  r: reset  v: view  s: sort");
                if self.offers_alternatives() {
                    keys.push_str("  1-9: did you mean");
                }
                keys.push_str("  q: quit");
                keys
            }
        };
        FooterInfo { keybindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE: &[u8] = br#"{"count":3,"entries":[
        {"API":"zebra","Description":"z","Auth":"OAuth","HTTPS":true,"Cors":"no","Link":"https://z.dev","Category":"Animals"},
        {"API":"Alpha","Description":"a","Auth":"","HTTPS":true,"Cors":"no","Link":"https://a.dev","Category":"Dev"},
        {"API":"mango","Description":"m","Auth":"apiKey","HTTPS":false,"Cors":"no","Link":"not a url","Category":"Food"}
    ]}"#;

    fn state() -> AppState {
        let mut state = AppState::new(Settings::default(), Backend::default(), Theme::default());
        state.permissions_granted = true;
        state
    }

    fn searched(body: &[u8]) -> AppState {
        let mut state = state();
        let _ = state.start_search("a", 0);
        let generation = state.search.generation();
        state.search.on_response(generation, 200, body, 10);
        state.sync();
        state
    }

    #[test]
    fn dispatch_tracks_deadline_and_schedules_timer() {
        let mut state = state();
        let actions = state.start_search("cats", 1_000);

        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], Action::WebRequest { url, .. } if url.ends_with("entries?title=cats")));
        assert_eq!(actions[1], Action::ScheduleTimeout { seconds: 10 });
        assert_eq!(state.deadlines.len(), 1);
    }

    #[test]
    fn contact_only_on_no_results_panel() {
        let settings = Settings {
            contact: Some("office@example.org".to_string()),
            ..Settings::default()
        };
        let mut state = AppState::new(settings, Backend::default(), Theme::default());
        state.permissions_granted = true;
        assert_eq!(state.compute_empty_state().contact, None);

        let _ = state.start_search("zzz", 0);
        let generation = state.search.generation();
        state.search.on_response(generation, 200, br#"{"count":0,"entries":null}"#, 10);
        state.sync();

        let empty = state.compute_empty_state();
        assert_eq!(empty.message, "No results for \"zzz\"");
        assert_eq!(empty.contact.as_deref(), Some("office@example.org"));
    }

    #[test]
    fn title_sort_is_case_insensitive_and_view_only() {
        let mut state = searched(THREE);
        state.sort = SortOption::Title;

        let titles: Vec<_> = state.sorted_results().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "mango", "zebra"]);
        assert_eq!(state.results()[0].title, "zebra");
    }

    #[test]
    fn cursor_wraps_in_focused_pane() {
        let mut state = searched(THREE);
        state.move_selection_up();
        assert_eq!(state.result_index, 2);
        state.move_selection_down();
        assert_eq!(state.result_index, 0);

        state.focus = Focus::Facets;
        state.move_selection_down();
        assert_eq!(state.facet_index, 1);
        assert_eq!(state.result_index, 0);
    }

    #[test]
    fn pre_grant_params_are_deferred() {
        let mut state = AppState::new(Settings::default(), Backend::default(), Theme::default());
        let params = BTreeMap::from([("q".to_string(), "cats".to_string())]);

        assert!(state.apply_query_params(&params, 0).is_empty());
        assert_eq!(state.settings.initial_params, params);
    }

    #[test]
    fn params_without_keyword_do_not_search() {
        let mut state = state();
        let params = BTreeMap::from([("auth".to_string(), "OAuth".to_string())]);
        assert!(state.apply_query_params(&params, 0).is_empty());
        assert!(state.search.selected_facets().is_empty());
    }

    #[test]
    fn params_rebuild_facets_and_search() {
        let mut state = state();
        let params = BTreeMap::from([
            ("q".to_string(), "weather".to_string()),
            ("auth".to_string(), "apiKey,null".to_string()),
        ]);
        let actions = state.apply_query_params(&params, 0);

        assert_eq!(state.search_input, "weather");
        assert_eq!(state.search.selected_facets().len(), 2);
        assert!(matches!(
            &actions[0],
            Action::WebRequest { url, .. } if url.ends_with("title=weather&auth=apiKey&auth=null")
        ));
    }

    #[test]
    fn alternatives_prefer_matching_categories() {
        let mut state = state();
        state
            .catalog
            .categories()
            .publish(vec!["Animals".to_string(), "Anime".to_string(), "Books".to_string()]);
        let _ = state.start_search("anim", 0);
        state.sync();

        let alternatives = state.alternatives();
        assert!(alternatives.contains(&"Animals".to_string()));
        assert!(!alternatives.contains(&"Books".to_string()));

        let _ = state.start_search("qqqq", 0);
        assert_eq!(state.alternatives(), DEFAULT_ALTERNATIVES);
    }

    #[test]
    fn viewmodel_windows_cards_around_cursor() {
        let entries: Vec<String> = (0..20)
            .map(|i| {
                format!(
                    r#"{{"API":"Api {i}","Description":"","Auth":"","HTTPS":true,"Cors":"no","Link":"https://{i}.dev","Category":"X"}}"#
                )
            })
            .collect();
        let body = format!(r#"{{"count":20,"entries":[{}]}}"#, entries.join(","));
        let mut state = searched(body.as_bytes());
        state.view_type = ResultViewType::List;
        state.result_index = 15;

        let vm = state.compute_viewmodel(32, 120);
        let list = vm.results.unwrap();
        assert_eq!(list.cards.len(), 4);
        assert!(list.cards.iter().any(|card| card.is_selected && card.title == "Api 15"));
    }

    #[test]
    fn mobile_facet_panel_replaces_results_when_open() {
        let mut state = searched(THREE);

        let vm = state.compute_viewmodel(30, 40);
        assert_eq!(vm.breakpoint, Breakpoint::Mobile);
        assert!(vm.facet_panel.is_none());
        assert!(vm.results.is_some());

        state.facet_panel_open = true;
        let vm = state.compute_viewmodel(30, 40);
        assert_eq!(vm.facet_panel.unwrap().width, 40);
        assert!(vm.results.is_none());
    }

    #[test]
    fn desktop_grid_has_two_columns_and_badge() {
        let mut state = searched(THREE);
        state.search.toggle_facet(SelectedFacet::new("auth", "OAuth"));

        let vm = state.compute_viewmodel(40, 140);
        assert_eq!(vm.header.badge, 1);
        assert_eq!(vm.facet_panel.unwrap().width, 28);
        assert_eq!(vm.results.unwrap().columns, 2);
    }

    #[test]
    fn invalid_links_are_not_shown() {
        let state = searched(THREE);
        let vm = state.compute_viewmodel(60, 140);
        let cards = vm.results.unwrap().cards;
        assert_eq!(cards[2].link, None);
        assert_eq!(cards[0].link.as_deref(), Some("https://z.dev/"));
    }

    #[test]
    fn teardown_releases_subscriptions() {
        let mut state = state();
        assert_eq!(state.search.results().subscriber_count(), 1);

        state.teardown();
        assert_eq!(state.search.results().subscriber_count(), 0);
        assert_eq!(state.suggester.suggestions().subscriber_count(), 0);
        assert_eq!(state.catalog.categories().subscriber_count(), 0);
        assert!(!state.sync());
    }
}
