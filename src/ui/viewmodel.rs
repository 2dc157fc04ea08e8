//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by the
//! renderer. They contain no business logic, only display-ready data: truncated
//! text, highlight ranges, selection flags and the responsive layout decision.

use crate::app::{Breakpoint, ResultViewType};

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Layout class derived from the pane width.
    pub breakpoint: Breakpoint,

    pub header: HeaderInfo,

    /// Search field, always visible.
    pub search_bar: SearchBarInfo,

    /// Facet column or overlay; `None` when hidden.
    pub facet_panel: Option<FacetPanelInfo>,

    /// Result cards; `None` when `empty_state` is shown instead.
    pub results: Option<ResultListInfo>,

    /// Placeholder shown in the result area when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Number of selected facets, drawn as a badge when non-zero.
    pub badge: usize,

    /// Whether a search is in flight.
    pub loading: bool,

    /// Query string equivalent of the current search (`q=...&auth=...`).
    pub location: String,
}

/// Search field and its suggestion dropdown.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether the field has input focus.
    pub active: bool,

    /// Dropdown entries; empty hides the dropdown.
    pub suggestions: Vec<SuggestionItem>,
}

#[derive(Debug, Clone)]
pub struct SuggestionItem {
    pub text: String,
    pub highlight_ranges: Vec<(usize, usize)>,
    pub is_selected: bool,
}

/// Facet panel content.
#[derive(Debug, Clone)]
pub struct FacetPanelInfo {
    pub groups: Vec<FacetGroupInfo>,

    /// Whether navigation keys currently move the facet cursor.
    pub focused: bool,

    /// Panel width in columns. On mobile the panel takes the whole width.
    pub width: usize,
}

#[derive(Debug, Clone)]
pub struct FacetGroupInfo {
    pub label: String,
    pub rows: Vec<FacetRow>,
}

#[derive(Debug, Clone)]
pub struct FacetRow {
    pub label: String,
    pub count: usize,
    pub selected: bool,
    pub is_cursor: bool,
}

/// The visible window of result cards.
#[derive(Debug, Clone)]
pub struct ResultListInfo {
    /// Summary line, e.g. `12 results for "cats" · sorted by Title`.
    pub meta_line: String,

    pub view_type: ResultViewType,

    /// Cards per row.
    pub columns: usize,

    pub cards: Vec<ResultCard>,

    /// Whether navigation keys currently move the result cursor.
    pub focused: bool,
}

/// One result card.
///
/// Cards render in a fixed height of [`ResultCard::HEIGHT`] lines: title,
/// badges, description and tags with the link.
#[derive(Debug, Clone)]
pub struct ResultCard {
    pub title: String,

    /// Character ranges of `title` matching the searched keyword.
    pub title_highlights: Vec<(usize, usize)>,

    pub description: String,

    /// Sub-title descriptions ("Secured via HTTPS", "Authentication via ...").
    pub badges: Vec<String>,

    pub tags: Vec<String>,

    /// Link shown on the card, if the entry has a valid one.
    pub link: Option<String>,

    pub is_selected: bool,
}

impl ResultCard {
    pub const HEIGHT: usize = 4;
}

/// Placeholder for the result area.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,

    /// Alternative keywords, offered as "did you mean" choices 1-9.
    pub alternatives: Vec<String>,

    /// Rendered with the error color.
    pub is_error: bool,

    /// Contact line for the no-results panel.
    pub contact: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}
