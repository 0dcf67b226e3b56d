use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::model::{Commit, DerivedStats};
use crate::tui::theme::Theme;
use crate::util::unicode::fit_to_width;

/// Width of the label column in the position grid
pub(super) const LABEL_WIDTH: usize = 6;

/// The numeric columns shared by group rows and rollup rows:
/// total, departing, projected, target. `need` is styled separately.
pub(super) fn number_columns(stats: &DerivedStats, departing: i64, target: u32) -> String {
    format!(
        " {:>4} {:>4} {:>5} {:>4} ",
        stats.total, departing, stats.projected, target
    )
}

/// Column titles matching `number_columns` + need
pub(super) fn header_text(label_title: &str, label_width: usize, tail: &str) -> String {
    format!(
        " {} {:>4} {:>4} {:>5} {:>4} {:>5}  {}",
        fit_to_width(label_title, label_width),
        "TOT",
        "OUT",
        "PROJ",
        "TGT",
        "NEED",
        tail
    )
}

pub(super) fn need_span(theme: &Theme, need: i64, bg: ratatui::style::Color) -> Span<'static> {
    Span::styled(
        format!("{:>5}", need),
        Style::default()
            .fg(theme.need_color(need))
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )
}

/// Pill text: star count, then `A` for athlete commits
pub(super) fn pill_text(commit: &Commit) -> String {
    format!(
        "{}\u{2605}{}",
        commit.stars,
        if commit.is_ath { "A" } else { "" }
    )
}
