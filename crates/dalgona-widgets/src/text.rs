//! Column-width aware string helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width in terminal columns (CJK counts as 2).
pub fn width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `max` columns, ending in `…` when something was cut.
///
/// ```
/// use dalgona_widgets::text::truncate;
///
/// assert_eq!(truncate("Select date", 8), "Select …");
/// assert_eq!(truncate("날짜 선택", 6), "날짜 …");
/// assert_eq!(truncate("short", 10), "short");
/// ```
pub fn truncate(s: &str, max: usize) -> String {
    if width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Left offset that centers `content` columns inside `available`.
pub fn center_offset(content: usize, available: usize) -> u16 {
    (available.saturating_sub(content) / 2) as u16
}

/// Case-insensitive substring match used by every searchable list.
pub fn matches_query(label: &str, query: &str) -> bool {
    query.is_empty() || label.to_lowercase().contains(&query.to_lowercase())
}
