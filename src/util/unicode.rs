use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fit `s` into exactly `cells` terminal cells: cut with `…` when too wide,
/// pad with spaces when too narrow. Never splits a grapheme cluster.
pub fn fit_to_width(s: &str, cells: usize) -> String {
    if cells == 0 {
        return String::new();
    }
    let width = display_width(s);
    if width <= cells {
        return format!("{}{}", s, " ".repeat(cells - width));
    }

    let budget = cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(g);
        if used + gw > budget {
            break;
        }
        used += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out.push_str(&" ".repeat(budget - used));
    out
}
