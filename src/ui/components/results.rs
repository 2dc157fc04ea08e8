//! Result card renderer.
//!
//! The result area starts with a summary line, then lays cards out in rows of
//! `columns` cards separated by a two-column gap:
//!
//! ```text
//! 12 results for "cats" · showing 1-4 · sorted by Relevance · Grid view
//!
//! ▎Cat Facts                           Dog API
//! ▎Secured via HTTPS                   Secured via HTTPS · Authentication via apiKey
//! ▎Daily cat facts                     Random dog pictures
//! ▎animals · https://catfact.ninja     animals · https://dog.ceo
//! ```

use crate::ui::helpers::{display_len, position_cursor, render_highlighted_text, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultCard, ResultListInfo};

const CARD_GAP: usize = 2;

/// Renders the result list in the box starting at (`row`, `col`) and returns
/// the row after the last card line.
pub fn render_result_list(
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    list: &ResultListInfo,
    theme: &Theme,
) -> usize {
    if height == 0 {
        return row;
    }

    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", truncate(&list.meta_line, width));
    print!("{}", Theme::reset());

    let columns = list.columns.max(1);
    let card_width = width.saturating_sub(CARD_GAP * (columns - 1)) / columns;
    let last_row = row + height;
    let mut current = row + 2;

    for line in list.cards.chunks(columns) {
        if current + ResultCard::HEIGHT > last_row {
            break;
        }
        for (index, card) in line.iter().enumerate() {
            let card_col = col + index * (card_width + CARD_GAP);
            render_card(current, card_col, card_width, card, list.focused, theme);
        }
        current += ResultCard::HEIGHT + 1;
    }

    current
}

fn render_card(row: usize, col: usize, width: usize, card: &ResultCard, focused: bool, theme: &Theme) {
    let highlighted = focused && card.is_selected;
    let inner = width.saturating_sub(1);

    let marker = |line: usize| {
        position_cursor(row + line, col);
        if card.is_selected {
            print!("{}▎{}", Theme::fg(&theme.colors.selection_bg), Theme::reset());
        } else {
            print!(" ");
        }
    };

    marker(0);
    let title = truncate(&card.title, inner);
    print!("{}", Theme::bold());
    if highlighted {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    render_highlighted_text(&title, &card.title_highlights, theme, highlighted);
    if highlighted {
        print!("{}", " ".repeat(inner.saturating_sub(display_len(&title))));
    }
    print!("{}", Theme::reset());

    marker(1);
    print!("{}", Theme::fg(&theme.colors.badge_fg));
    print!("{}", truncate(&card.badges.join(" · "), inner));
    print!("{}", Theme::reset());

    marker(2);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", truncate(&card.description, inner));
    print!("{}", Theme::reset());

    marker(3);
    let link = card.link.as_deref().unwrap_or("no valid link");
    let footer = if card.tags.is_empty() {
        link.to_string()
    } else {
        format!("{} · {link}", card.tags.join(", "))
    };
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", truncate(&footer, inner));
    print!("{}", Theme::reset());
}
