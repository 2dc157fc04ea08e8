//! Header component renderer.
//!
//! Draws the centered title, the current query location on the left and the
//! status area (loading indicator, selected-facet badge) on the right.

use crate::ui::helpers::{display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// ```text
/// ?q=cats&auth=OAuth        Public API Search        searching  [1 filter]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = display_len(&header.title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    let status = status_text(header);
    let status_len = display_len(&status);

    let location_width = padding.saturating_sub(2);
    if !header.location.is_empty() && location_width > 3 {
        position_cursor(row, 2);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", truncate(&header.location, location_width));
        print!("{}", Theme::reset());
    }

    if status_len > 0 && status_len + 1 < padding {
        position_cursor(row, cols.saturating_sub(status_len));
        print!("{}", Theme::fg(&theme.colors.badge_fg));
        print!("{status}");
        print!("{}", Theme::reset());
    }

    row + 1
}

fn status_text(header: &HeaderInfo) -> String {
    let mut parts = Vec::new();
    if header.loading {
        parts.push("searching".to_string());
    }
    match header.badge {
        0 => {}
        1 => parts.push("[1 filter]".to_string()),
        n => parts.push(format!("[{n} filters]")),
    }
    parts.join("  ")
}
