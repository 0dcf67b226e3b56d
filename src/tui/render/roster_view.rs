use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::KeyValueStore;
use crate::ops::stats::group_stats;
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

use super::helpers::{LABEL_WIDTH, header_text, need_span, number_columns, pill_text};

/// Render the position grid: a header line, then one row per group
pub fn render_roster_view<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    if area.height == 0 {
        return;
    }
    let bg = app.theme.background;
    let body_height = area.height.saturating_sub(1) as usize;

    // Bring the requested row on screen before laying out
    if let Some(row_id) = app.focus.take_scroll_request() {
        let index = app.store.state().positions.iter().position(|p| p.id == row_id);
        if let Some(index) = index {
            app.scroll_to_row(index, body_height);
        }
    }
    let group_count = app.store.state().positions.len();
    if app.scroll_offset >= group_count {
        app.scroll_offset = group_count.saturating_sub(1);
    }

    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        header_text("POS", LABEL_WIDTH, "COMMITS"),
        header_style,
    ))];

    app.row_hits.clear();
    let focused_row = app.nav.focused_row_id().map(str::to_string);
    let active_pill = app.focus.active().map(|(row, idx)| (row.to_string(), idx));

    for (i, group) in app
        .store
        .state()
        .positions
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(body_height)
    {
        let is_focused = focused_row.as_deref() == Some(group.id.as_str());
        let row_bg = if is_focused { app.theme.selection_bg } else { bg };
        let stats = group_stats(group);

        let marker = if is_focused { "\u{25B8}" } else { " " };
        let label_style = if is_focused {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(fit_to_width(&group.label, LABEL_WIDTH), label_style),
            Span::styled(
                number_columns(&stats, i64::from(group.sr_tr), group.target),
                Style::default().fg(app.theme.text).bg(row_bg),
            ),
            need_span(&app.theme, stats.need, row_bg),
            Span::styled("  ", Style::default().bg(row_bg)),
        ];

        if group.commits.is_empty() {
            spans.push(Span::styled(
                "\u{00B7}",
                Style::default().fg(app.theme.dim).bg(row_bg),
            ));
        }
        for (idx, commit) in group.commits.iter().enumerate() {
            let pill_focused = active_pill
                .as_ref()
                .is_some_and(|(row, active)| *row == group.id && *active == idx);
            let mut style = Style::default()
                .fg(app.theme.star_color(commit.stars))
                .bg(row_bg);
            if pill_focused {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(pill_text(commit), style));
            spans.push(Span::styled(" ", Style::default().bg(row_bg)));
        }

        let screen_y = area.y + 1 + (i - app.scroll_offset) as u16;
        app.row_hits.push((screen_y, group.id.clone()));
        lines.push(Line::from(spans).style(Style::default().bg(row_bg)));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
