//! Search field and suggestion dropdown.

use crate::ui::helpers::{self, display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, SuggestionItem};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the 3-line search box at `row` and returns the next free row.
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// The border uses `search_bar_border` while the field has focus and the plain
/// border color otherwise.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.active {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.active { "_" } else { "" };
    let search_text = truncate(
        &format!(" Search: {}{cursor}", search.query),
        inner_width,
    );
    let padding = inner_width.saturating_sub(display_len(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Draws the suggestion dropdown starting at `row`, over whatever the body
/// rendered there. At most `max_rows` lines are used.
pub fn render_suggestions(
    row: usize,
    items: &[SuggestionItem],
    theme: &Theme,
    cols: usize,
    max_rows: usize,
) {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);
    let visible = items.len().min(max_rows.saturating_sub(1));
    if visible == 0 {
        return;
    }

    for (offset, item) in items.iter().take(visible).enumerate() {
        position_cursor(row + offset, 1);
        print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("│");

        if item.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        let text = truncate(&item.text, inner_width.saturating_sub(2));
        print!("  ");
        helpers::render_highlighted_text(&text, &item.highlight_ranges, theme, item.is_selected);
        print!(
            "{}",
            " ".repeat(inner_width.saturating_sub(display_len(&text) + 2))
        );
        print!("{}", Theme::reset());

        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("│");
        print!("{}", Theme::reset());
    }

    position_cursor(row + visible, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}
