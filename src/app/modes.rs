//! Input, focus and layout mode types.
//!
//! These enums decide which keybindings are active and how the result area is
//! laid out:
//! - [`InputMode`]: typing into the search field or navigating
//! - [`Focus`]: which pane receives navigation keys in normal mode
//! - [`ResultViewType`] and [`SortOption`]: purely presentational choices
//! - [`Breakpoint`]: responsive layout class derived from the pane width

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command keys are active.
    ///
    /// Available keybindings: j/k (move), Tab (switch pane), / (search),
    /// Enter (open or toggle), r (reset facets), v (view), s (sort), q (quit).
    Normal,

    /// Characters edit the search field; Up/Down walk the suggestions.
    Search,
}

/// Pane receiving navigation keys in [`InputMode::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Results,
    Facets,
}

impl Focus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Results => Self::Facets,
            Self::Facets => Self::Results,
        }
    }
}

/// How result cards are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultViewType {
    List,
    Grid,
}

impl ResultViewType {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
        }
    }
}

/// Ordering applied to the displayed results.
///
/// Sorting only affects presentation; the shared result stream always keeps
/// backend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    /// Backend order.
    Relevance,
    /// Case-insensitive by title.
    Title,
}

impl SortOption {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Relevance => Self::Title,
            Self::Title => Self::Relevance,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::Title => "Title",
        }
    }
}

/// Responsive layout class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// Narrower than 60 columns: single column, facet panel on demand.
    Mobile,
    /// 60 to 99 columns: narrow facet column.
    Tablet,
    /// 100 columns and wider.
    Desktop,
}

impl Breakpoint {
    pub const TABLET_MIN_COLS: usize = 60;
    pub const DESKTOP_MIN_COLS: usize = 100;

    /// # Examples
    ///
    /// ```
    /// use apidex::app::Breakpoint;
    ///
    /// assert_eq!(Breakpoint::from_cols(40), Breakpoint::Mobile);
    /// assert_eq!(Breakpoint::from_cols(60), Breakpoint::Tablet);
    /// assert_eq!(Breakpoint::from_cols(120), Breakpoint::Desktop);
    /// ```
    #[must_use]
    pub const fn from_cols(cols: usize) -> Self {
        if cols < Self::TABLET_MIN_COLS {
            Self::Mobile
        } else if cols < Self::DESKTOP_MIN_COLS {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Width of the facet column, or `None` when it is not drawn beside the
    /// results.
    #[must_use]
    pub const fn facet_panel_width(self) -> Option<usize> {
        match self {
            Self::Mobile => None,
            Self::Tablet => Some(22),
            Self::Desktop => Some(28),
        }
    }

    /// Number of cards per row in grid view.
    #[must_use]
    pub const fn grid_columns(self) -> usize {
        match self {
            Self::Desktop => 2,
            Self::Mobile | Self::Tablet => 1,
        }
    }
}
