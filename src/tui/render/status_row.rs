use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::KeyValueStore;
use crate::tui::app::{App, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let (mut spans, hint) = match app.mode {
        Mode::Navigate => {
            let mut spans = Vec::new();
            if app.nav.ath_pending() {
                spans.push(Span::styled(
                    " ATH ",
                    Style::default()
                        .fg(app.theme.background)
                        .bg(app.theme.purple)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(" ", Style::default().bg(bg)));
            }
            if let Some(ref msg) = app.status_message {
                let fg = if app.status_is_error {
                    app.theme.red
                } else {
                    app.theme.text_bright
                };
                spans.push(Span::styled(msg.clone(), Style::default().fg(fg).bg(bg)));
            }
            let hint = if app.nav.focused_row_id().is_some() {
                "1-5 commit  a ATH  s/t edit  ? help"
            } else {
                "\u{2193} focus  ? help  q quit"
            };
            (spans, hint)
        }
        Mode::Edit => {
            let prompt = app.edit_target.as_ref().map_or("", |t| t.prompt());
            let spans = vec![
                Span::styled(
                    format!("{}: {}", prompt, app.edit_buffer),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                // ▌ cursor
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            (spans, "Enter save  Esc cancel")
        }
        Mode::Confirm => {
            let msg = app.status_message.clone().unwrap_or_default();
            let spans = vec![Span::styled(
                msg,
                Style::default()
                    .fg(app.theme.yellow)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )];
            (spans, "y confirm  any key cancel")
        }
    };

    if app.show_key_hints {
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
