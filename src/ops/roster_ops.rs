//! In-place edits of a `RosterState`.
//!
//! A missing group or entry is never an error: the edit is skipped and the
//! function reports that nothing changed. Callers use the return value to
//! decide whether the state needs to be written back.

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::model::{Commit, DefaultData, Player, RosterState};

/// Short random opaque id for a new player or commit. Uniqueness is not checked.
pub fn make_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Clamp user input to a non-negative count
fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn miss(kind: &str, id: &str) -> bool {
    debug!(kind, id, "lookup miss; edit skipped");
    false
}

pub fn update_sr_tr(state: &mut RosterState, pos_id: &str, value: i64) -> bool {
    match state.position_mut(pos_id) {
        Some(pos) => {
            pos.sr_tr = clamp_count(value);
            true
        }
        None => miss("group", pos_id),
    }
}

pub fn update_target(state: &mut RosterState, pos_id: &str, value: i64) -> bool {
    match state.position_mut(pos_id) {
        Some(pos) => {
            pos.target = clamp_count(value);
            true
        }
        None => miss("group", pos_id),
    }
}

pub fn update_super_group_target(state: &mut RosterState, sg_id: &str, value: i64) -> bool {
    match state.super_group_mut(sg_id) {
        Some(sg) => {
            sg.target = clamp_count(value);
            true
        }
        None => miss("super-group", sg_id),
    }
}

/// Append a player. Returns the new player's id.
pub fn add_player(state: &mut RosterState, pos_id: &str, ovr: i32) -> Option<String> {
    let Some(pos) = state.position_mut(pos_id) else {
        miss("group", pos_id);
        return None;
    };
    let id = make_id();
    pos.players.push(Player { id: id.clone(), ovr });
    Some(id)
}

pub fn remove_player(state: &mut RosterState, pos_id: &str, player_id: &str) -> bool {
    let Some(pos) = state.position_mut(pos_id) else {
        return miss("group", pos_id);
    };
    let before = pos.players.len();
    pos.players.retain(|p| p.id != player_id);
    before != pos.players.len() || miss("player", player_id)
}

pub fn update_player_ovr(state: &mut RosterState, pos_id: &str, player_id: &str, ovr: i32) -> bool {
    let Some(pos) = state.position_mut(pos_id) else {
        return miss("group", pos_id);
    };
    match pos.players.iter_mut().find(|p| p.id == player_id) {
        Some(player) => {
            player.ovr = ovr;
            true
        }
        None => miss("player", player_id),
    }
}

/// Append a commit. Returns the new commit's id.
pub fn add_commit(
    state: &mut RosterState,
    pos_id: &str,
    stars: u8,
    is_ath: bool,
) -> Option<String> {
    let Some(pos) = state.position_mut(pos_id) else {
        miss("group", pos_id);
        return None;
    };
    let id = make_id();
    pos.commits.push(Commit {
        id: id.clone(),
        stars,
        is_ath,
    });
    Some(id)
}

pub fn remove_commit(state: &mut RosterState, pos_id: &str, commit_id: &str) -> bool {
    let Some(pos) = state.position_mut(pos_id) else {
        return miss("group", pos_id);
    };
    let before = pos.commits.len();
    pos.commits.retain(|c| c.id != commit_id);
    before != pos.commits.len() || miss("commit", commit_id)
}

pub fn remove_last_commit(state: &mut RosterState, pos_id: &str) -> bool {
    match state.position_mut(pos_id) {
        Some(pos) => pos.commits.pop().is_some(),
        None => miss("group", pos_id),
    }
}

pub fn reset_sr_tr(state: &mut RosterState) {
    for pos in &mut state.positions {
        pos.sr_tr = 0;
    }
}

/// Replace groups and super-groups with fresh defaults. `version` is kept.
pub fn reset_to_defaults(state: &mut RosterState, defaults: &dyn DefaultData) {
    state.positions = defaults.default_positions();
    state.super_groups = defaults.default_super_groups();
}
