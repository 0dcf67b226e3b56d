pub mod help_overlay;
pub mod helpers;
pub mod roster_view;
pub mod status_row;
pub mod super_groups;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::io::storage::KeyValueStore;

use super::app::App;

/// Draw the whole screen
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: grid | rollups | status row (1 row)
    let rollup_height = super_groups::height(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // position grid
            Constraint::Length(rollup_height), // super-group rollups
            Constraint::Length(1),             // status row
        ])
        .split(area);

    roster_view::render_roster_view(frame, app, chunks[0]);
    super_groups::render_super_groups(frame, app, chunks[1]);

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
