//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used across components: cursor positioning, keyword
//! highlight computation and rendering, and width-aware truncation. All ranges
//! and widths are in characters, not bytes.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Computes character ranges of `text` that fuzzily match `query`.
///
/// Consecutive matched characters are coalesced into `(start, end)` ranges with
/// an exclusive end. An empty query or no match yields no ranges.
///
/// # Examples
///
/// ```
/// use apidex::ui::helpers::highlight_ranges;
///
/// assert_eq!(highlight_ranges("Cat Facts", "cat"), vec![(0, 3)]);
/// assert!(highlight_ranges("Weather", "").is_empty());
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }
    let matcher = SkimMatcherV2::default().ignore_case();
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Truncates `text` to at most `width` characters, marking the cut with `...`.
///
/// # Examples
///
/// ```
/// use apidex::ui::helpers::truncate;
///
/// assert_eq!(truncate("Open Library", 20), "Open Library");
/// assert_eq!(truncate("Open Library", 8), "Open ...");
/// assert_eq!(truncate("Open Library", 2), "Op");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

/// Number of characters in `text`.
#[must_use]
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Renders text with highlighted character ranges.
///
/// Highlights are suppressed on selected items so they do not fight the
/// selection background. Ranges beyond the end of `text` are clipped, which
/// allows ranges computed on a full title to be drawn over a truncated one.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scattered_matches_form_separate_ranges() {
        let ranges = highlight_ranges("Open Weather Map", "owm");
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], (0, 1));
    }

    #[test]
    fn no_match_has_no_ranges() {
        assert!(highlight_ranges("Books", "xyz").is_empty());
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Café Météo", 7), "Café...");
        assert_eq!(display_len("Météo"), 5);
    }
}
