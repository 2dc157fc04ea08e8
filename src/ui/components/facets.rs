//! Facet panel renderer.
//!
//! Each group is drawn as a bold label followed by one line per entry:
//!
//! ```text
//! Authentication
//!  [x] API Key            12
//!  [ ] No Authentication   3
//! ```

use crate::ui::helpers::{display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FacetPanelInfo, FacetRow};

/// Renders the panel in the box starting at (`row`, `col`), at most `height`
/// lines tall.
pub fn render_facet_panel(row: usize, col: usize, height: usize, panel: &FacetPanelInfo, theme: &Theme) {
    let width = panel.width;
    let last_row = row + height;
    let mut current = row;

    for group in &panel.groups {
        if current >= last_row {
            return;
        }
        position_cursor(current, col);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print!("{}", truncate(&group.label, width));
        print!("{}", Theme::reset());
        current += 1;

        for facet in &group.rows {
            if current >= last_row {
                return;
            }
            render_facet_row(current, col, width, facet, panel.focused, theme);
            current += 1;
        }
        current += 1;
    }
}

fn render_facet_row(row: usize, col: usize, width: usize, facet: &FacetRow, focused: bool, theme: &Theme) {
    let highlighted = focused && facet.is_cursor;
    let count = facet.count.to_string();
    let label_width = width.saturating_sub(display_len(&count) + 6);
    let label = truncate(&facet.label, label_width);

    position_cursor(row, col);
    if highlighted {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!(" [");
    if facet.selected {
        if !highlighted {
            print!("{}", Theme::fg(&theme.colors.facet_selected_fg));
        }
        print!("x");
        if !highlighted {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    } else {
        print!(" ");
    }
    print!("] {label}");

    let used = 5 + display_len(&label);
    print!("{}", " ".repeat(width.saturating_sub(used + display_len(&count))));
    if !highlighted {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{count}");
    print!("{}", Theme::reset());
}
