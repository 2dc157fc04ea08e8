//! Composable UI component renderers.
//!
//! Each component draws one part of the interface at an absolute position:
//!
//! - [`header`]: title, query location, loading indicator and facet badge
//! - [`search`]: search box and suggestion dropdown
//! - [`facets`]: facet groups with selectable entries
//! - [`results`]: summary line and result cards in list or grid layout
//! - [`empty`]: placeholder for the result area
//! - [`footer`]: keybinding hints
//!
//! [`render_layout`] arranges them for the breakpoint carried by the view
//! model.

mod empty;
mod facets;
mod footer;
mod header;
mod results;
mod search;

use crate::app::Breakpoint;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use facets::render_facet_panel;
use footer::render_footer;
use header::render_header;
use results::render_result_list;
use search::{render_search_bar, render_suggestions};

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

fn render_separator(row: usize, col: usize, height: usize, color: &str) {
    print!("{}", Theme::fg(color));
    for offset in 0..height {
        position_cursor(row + offset, col);
        print!("│");
    }
    print!("{}", Theme::reset());
}

/// Renders a full frame.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search box - 3 lines]
/// [Facets │ Results or empty state]
/// [Border]
/// [Footer]
/// ```
///
/// On mobile the facet panel, when present, replaces the result area. The
/// suggestion dropdown is drawn last so it overlays the body.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let body_start = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let body_height = border_row.saturating_sub(body_start);

    let mut content_col = 2;
    let mut content_width = cols.saturating_sub(2);

    if let Some(panel) = &vm.facet_panel {
        render_facet_panel(body_start, 2, body_height, panel, theme);
        if vm.breakpoint == Breakpoint::Mobile {
            content_width = 0;
        } else {
            let separator_col = panel.width + 3;
            render_separator(body_start, separator_col, body_height, &theme.colors.border);
            content_col = separator_col + 2;
            content_width = cols.saturating_sub(content_col);
        }
    }

    if content_width > 0 {
        if let Some(list) = &vm.results {
            render_result_list(body_start, content_col, content_width, body_height, list, theme);
        } else if let Some(empty) = &vm.empty_state {
            render_empty_state(body_start, content_col, content_width, body_height, empty, theme);
        }
    }

    if !vm.search_bar.suggestions.is_empty() {
        render_suggestions(body_start, &vm.search_bar.suggestions, theme, cols, body_height);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
