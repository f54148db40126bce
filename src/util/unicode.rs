use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to fit within `max_cells`, ending in `…` when cut
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Keep the end of the string within `max_cells`, starting with `…` when cut
pub fn tail_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut start = s.len();
    for (i, g) in s.grapheme_indices(true).rev() {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        start = i;
    }
    format!("\u{2026}{}", &s[start..])
}

/// Right-pad with spaces to exactly `cells` wide, truncating if longer
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    out.extend(std::iter::repeat_n(' ', cells.saturating_sub(w)));
    out
}

/// Remove the last grapheme cluster (backspace)
pub fn pop_grapheme(s: &mut String) {
    if let Some((i, _)) = s.grapheme_indices(true).next_back() {
        s.truncate(i);
    }
}

/// Remove trailing whitespace then the word before it (Ctrl-W)
pub fn pop_word(s: &mut String) {
    let kept = s.trim_end().len();
    s.truncate(kept);
    let start = s
        .grapheme_indices(true)
        .rev()
        .find(|(_, g)| g.chars().all(char::is_whitespace))
        .map_or(0, |(i, g)| i + g.len());
    s.truncate(start);
}
