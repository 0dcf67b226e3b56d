use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::io::storage::KeyValueStore;
use crate::ops::stats::super_group_stats;
use crate::tui::app::App;
use crate::util::unicode::fit_to_width;

use super::helpers::{header_text, need_span, number_columns};

const SG_LABEL_WIDTH: usize = 14;

/// Rows needed for the rollup panel: border, header, one row per super-group
pub fn height<S: KeyValueStore>(app: &App<S>) -> u16 {
    let count = app.store.state().super_groups.len();
    if count == 0 {
        0
    } else {
        count as u16 + 2
    }
}

/// Render super-group rollups. The OUT column shows the summed departures.
pub fn render_super_groups<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    if area.height == 0 {
        return;
    }
    let bg = app.theme.background;
    let state = app.store.state();

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        header_text("GROUP", SG_LABEL_WIDTH, ""),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))];

    for sg in &state.super_groups {
        let rollup = super_group_stats(sg, &state.positions);
        lines.push(Line::from(vec![
            Span::styled(" ", Style::default().bg(bg)),
            Span::styled(
                fit_to_width(&sg.label, SG_LABEL_WIDTH),
                Style::default().fg(app.theme.cyan).bg(bg),
            ),
            Span::styled(
                number_columns(&rollup.stats, rollup.sr_tr_sum, sg.target),
                Style::default().fg(app.theme.text).bg(bg),
            ),
            need_span(&app.theme, rollup.stats.need, bg),
        ]));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .title(" Rollups ")
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
