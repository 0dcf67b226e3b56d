use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::KeyValueStore;

use super::app::{App, EditTarget, Mode};
use super::nav::{FocusTarget, KeyOutcome, KeyTarget};

/// Handle a key event in the current mode
pub fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
    app.focus.sync(app.store.state());
    app.report_persist_error();
}

/// Mouse click at screen row `y`: focus the group drawn there
pub fn handle_click<S: KeyValueStore>(app: &mut App<S>, y: u16) {
    if app.mode != Mode::Navigate {
        return;
    }
    let hit = app
        .row_hits
        .iter()
        .find(|(row_y, _)| *row_y == y)
        .map(|(_, id)| id.clone());
    if let Some(id) = hit {
        app.nav.set_focus(&mut app.focus, &id);
    }
}

fn handle_navigate<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    // Clear any transient status message on keypress
    app.status_message = None;
    app.status_is_error = false;

    app.focus.sync(app.store.state());
    let row_ids = app.store.state().position_ids();
    let outcome = app.nav.handle_key(
        key,
        KeyTarget::Grid,
        &row_ids,
        &mut app.store,
        &mut app.focus,
    );
    if outcome == KeyOutcome::Consumed {
        return;
    }

    match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (m, KeyCode::Char('r')) if m.contains(KeyModifiers::CONTROL) => {
            app.mode = Mode::Confirm;
            app.set_status("reset the whole roster to defaults? y/n");
        }
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,
        (_, KeyCode::Char('R')) => {
            app.store.reset_sr_tr();
            app.set_status("cleared all departures");
        }
        (_, KeyCode::Delete | KeyCode::Backspace) => remove_focused_pill(app),
        (_, KeyCode::Char('s')) => begin_edit(app, |pos_id| EditTarget::SrTr { pos_id }),
        (_, KeyCode::Char('t')) => begin_edit(app, |pos_id| EditTarget::Target { pos_id }),
        (_, KeyCode::Char('p')) => begin_edit(app, |pos_id| EditTarget::NewPlayer { pos_id }),
        (_, KeyCode::Char('x')) => remove_last_player(app),
        _ => {}
    }
}

/// A focused pill removes its own commit, then focus settles on the pill
/// that took its place (or the new last pill).
fn remove_focused_pill<S: KeyValueStore>(app: &mut App<S>) {
    let Some((row, idx)) = app.focus.active().map(|(r, i)| (r.to_string(), i)) else {
        return;
    };
    let Some(commit_id) = app
        .store
        .state()
        .position(&row)
        .and_then(|p| p.commits.get(idx))
        .map(|c| c.id.clone())
    else {
        return;
    };
    app.store.remove_commit(&row, &commit_id);
    app.focus.sync(app.store.state());
    let remaining = app.focus.pill_count(&row);
    if remaining == 0 {
        app.focus.blur_active();
    } else {
        app.focus.focus_pill(&row, idx.min(remaining - 1));
    }
}

fn remove_last_player<S: KeyValueStore>(app: &mut App<S>) {
    let Some(group) = app.focused_group() else {
        return;
    };
    let Some(player_id) = group.players.last().map(|p| p.id.clone()) else {
        return;
    };
    let pos_id = group.id.clone();
    app.store.remove_player(&pos_id, &player_id);
}

fn begin_edit<S: KeyValueStore>(app: &mut App<S>, make: impl FnOnce(String) -> EditTarget) {
    let Some(group) = app.focused_group() else {
        return;
    };
    let target = make(group.id.clone());
    let initial = match &target {
        EditTarget::SrTr { .. } => group.sr_tr.to_string(),
        EditTarget::Target { .. } => group.target.to_string(),
        EditTarget::NewPlayer { .. } => String::new(),
    };
    app.edit_buffer = initial;
    app.focus.blur_active();
    app.edit_target = Some(target);
    app.mode = Mode::Edit;
}

fn handle_edit<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    // Keys aimed at the field pass through the controller untouched
    let row_ids = app.store.state().position_ids();
    let outcome = app.nav.handle_key(
        key,
        KeyTarget::TextEntry,
        &row_ids,
        &mut app.store,
        &mut app.focus,
    );
    if outcome == KeyOutcome::Consumed {
        return;
    }

    match key.code {
        KeyCode::Esc => finish_edit(app),
        KeyCode::Enter => {
            commit_edit(app);
            finish_edit(app);
        }
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => app.edit_buffer.push(c),
        KeyCode::Char('-') if app.edit_buffer.is_empty() => app.edit_buffer.push('-'),
        _ => {}
    }
}

fn commit_edit<S: KeyValueStore>(app: &mut App<S>) {
    let Some(target) = app.edit_target.clone() else {
        return;
    };
    let Ok(value) = app.edit_buffer.parse::<i64>() else {
        if !app.edit_buffer.is_empty() {
            app.status_message = Some(format!("not a number: {}", app.edit_buffer));
            app.status_is_error = true;
        }
        return;
    };
    match target {
        EditTarget::SrTr { pos_id } => app.store.update_sr_tr(&pos_id, value),
        EditTarget::Target { pos_id } => app.store.update_target(&pos_id, value),
        EditTarget::NewPlayer { pos_id } => {
            let ovr = i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX });
            app.store.add_player(&pos_id, ovr);
        }
    }
}

fn finish_edit<S: KeyValueStore>(app: &mut App<S>) {
    app.edit_target = None;
    app.edit_buffer.clear();
    app.mode = Mode::Navigate;
}

fn handle_confirm<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    app.mode = Mode::Navigate;
    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        app.store.reset_to_defaults();
        app.focus.blur_active();
        app.set_status("roster reset to defaults");
    } else {
        app.status_message = None;
    }
}
