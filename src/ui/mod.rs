//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! - [`viewmodel`]: display-ready types with no business logic
//! - [`renderer`]: entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor positioning, keyword highlighting and truncation
//! - [`theme`]: color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    EmptyState, FacetGroupInfo, FacetPanelInfo, FacetRow, FooterInfo, HeaderInfo, ResultCard,
    ResultListInfo, SearchBarInfo, SuggestionItem, UIViewModel,
};
