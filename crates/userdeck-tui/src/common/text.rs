//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let next_width = width + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width = next_width;
    }
    truncated.push('…');
    truncated
}

/// Picks the part of `text` that fits in `max_width` columns and contains
/// the char position `cursor`. Shows the tail while the cursor is in it and
/// scrolls left once the cursor moves past its start. Returns the visible
/// slice and the cursor column within it.
pub fn visible_window(text: &str, cursor: usize, max_width: usize) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let width_of = |chars: &[char]| chars.iter().map(|ch| ch.width().unwrap_or(0)).sum::<usize>();

    if text.width() <= max_width {
        return (text.to_string(), width_of(&chars[..cursor]));
    }

    let mut start = chars.len();
    let mut width = 0;
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start -= 1;
    }
    let start = start.min(cursor);

    let mut end = start;
    let mut width = 0;
    while end < chars.len() {
        let w = chars[end].width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        end += 1;
    }

    (
        chars[start..end].iter().collect(),
        width_of(&chars[start..cursor]),
    )
}
