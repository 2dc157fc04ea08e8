//! Empty state component renderer.
//!
//! Shown in the result area before the first search, while a search with no
//! results yet is in flight, after a failure, and when a search found nothing.

use crate::ui::helpers::{display_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state centered in the box starting at (`row`, `col`).
///
/// ```text
/// [2 blank lines]
///          No results for "xyz"
///          Did you mean (1-4):
///
///              1  Sports
///              2  Jobs
///
///      Still stuck? Contact office@example.org
/// ```
pub fn render_empty_state(
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    empty: &EmptyState,
    theme: &Theme,
) {
    let last_row = row + height;
    let mut current = row + 2;

    let message_color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };

    if current < last_row {
        centered(current, col, width, &empty.message, message_color, true);
        current += 1;
    }
    if current < last_row && !empty.subtitle.is_empty() {
        centered(current, col, width, &empty.subtitle, &theme.colors.text_dim, false);
        current += 1;
    }

    current += 1;
    let longest = empty
        .alternatives
        .iter()
        .map(|alt| display_len(alt) + 3)
        .max()
        .unwrap_or(0);
    let indent = col + width.saturating_sub(longest) / 2;

    for (index, alternative) in empty.alternatives.iter().enumerate() {
        if current >= last_row {
            break;
        }
        position_cursor(current, indent);
        print!("{}", Theme::fg(&theme.colors.badge_fg));
        print!("{}", index + 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  {alternative}");
        print!("{}", Theme::reset());
        current += 1;
    }

    if let Some(contact) = &empty.contact {
        current += 1;
        if current < last_row {
            let line = format!("Still stuck? Contact {contact}");
            centered(current, col, width, &line, &theme.colors.text_dim, false);
        }
    }
}

fn centered(row: usize, col: usize, width: usize, text: &str, color: &str, bold: bool) {
    let text = truncate(text, width);
    let padding = width.saturating_sub(display_len(&text)) / 2;

    position_cursor(row, col + padding);
    if bold {
        print!("{}", Theme::bold());
    }
    print!("{}", Theme::fg(color));
    print!("{text}");
    print!("{}", Theme::reset());
}
