use tracing::{info, warn};

use crate::io::migrate;
use crate::io::storage::KeyValueStore;
use crate::model::{DefaultData, DerivedStats, RosterState, SuperGroupDerivedStats};
use crate::ops::{roster_ops, stats};

/// Owner of the roster: every edit and every derived number goes through here.
///
/// Derived stats are computed from the live state on each call, so they can
/// never lag behind an edit. Each edit that changes something writes the full
/// state back to storage before returning.
pub struct RosterStore<S: KeyValueStore> {
    state: RosterState,
    storage: S,
    key: String,
    defaults: Box<dyn DefaultData>,
    persist_error: Option<String>,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Load the roster stored under `key`, falling back to defaults when
    /// nothing usable is stored. Migrated documents are saved right away.
    /// Text that cannot be decoded is copied to `<key>.bak` first.
    pub fn open(storage: S, key: &str, defaults: Box<dyn DefaultData>) -> Self {
        let read = storage.get(key);
        let mut store = RosterStore {
            state: defaults.default_state(),
            storage,
            key: key.to_string(),
            defaults,
            persist_error: None,
        };

        let text = match read {
            Ok(Some(text)) => text,
            Ok(None) => return store,
            Err(e) => {
                warn!(error = %e, "could not read stored roster; using defaults");
                store.back_up_stored();
                return store;
            }
        };
        match migrate::decode(&text, store.defaults.as_ref()) {
            Ok(loaded) => {
                store.state = loaded.state;
                if loaded.upgraded {
                    info!(version = store.state.version, "migrated stored roster");
                    store.persist();
                }
            }
            Err(e) => {
                warn!(error = %e, "stored roster unreadable; using defaults");
                store.back_up_stored();
            }
        }
        store
    }

    /// Keep a copy of the stored document under `<key>.bak` before the
    /// first edit overwrites it
    fn back_up_stored(&mut self) {
        let backup_key = format!("{}.bak", self.key);
        match self.storage.backup(&self.key, &backup_key) {
            Ok(()) => info!(backup = %backup_key, "backed up stored roster"),
            Err(e) => warn!(error = %e, "could not back up unreadable roster"),
        }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stats for one group, or None if the id is unknown
    pub fn group_stats(&self, pos_id: &str) -> Option<DerivedStats> {
        self.state.position(pos_id).map(stats::group_stats)
    }

    /// Rollup for one super-group, or None if the id is unknown
    pub fn super_group_stats(&self, sg_id: &str) -> Option<SuperGroupDerivedStats> {
        self.state
            .super_group(sg_id)
            .map(|sg| stats::super_group_stats(sg, &self.state.positions))
    }

    /// The most recent write failure, cleared on read
    pub fn take_persist_error(&mut self) -> Option<String> {
        self.persist_error.take()
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    pub fn update_sr_tr(&mut self, pos_id: &str, value: i64) {
        let changed = roster_ops::update_sr_tr(&mut self.state, pos_id, value);
        self.persist_if(changed);
    }

    pub fn update_target(&mut self, pos_id: &str, value: i64) {
        let changed = roster_ops::update_target(&mut self.state, pos_id, value);
        self.persist_if(changed);
    }

    pub fn update_super_group_target(&mut self, sg_id: &str, value: i64) {
        let changed = roster_ops::update_super_group_target(&mut self.state, sg_id, value);
        self.persist_if(changed);
    }

    pub fn add_player(&mut self, pos_id: &str, ovr: i32) -> Option<String> {
        let id = roster_ops::add_player(&mut self.state, pos_id, ovr);
        self.persist_if(id.is_some());
        id
    }

    pub fn remove_player(&mut self, pos_id: &str, player_id: &str) {
        let changed = roster_ops::remove_player(&mut self.state, pos_id, player_id);
        self.persist_if(changed);
    }

    pub fn update_player_ovr(&mut self, pos_id: &str, player_id: &str, ovr: i32) {
        let changed = roster_ops::update_player_ovr(&mut self.state, pos_id, player_id, ovr);
        self.persist_if(changed);
    }

    pub fn add_commit(&mut self, pos_id: &str, stars: u8, is_ath: bool) -> Option<String> {
        let id = roster_ops::add_commit(&mut self.state, pos_id, stars, is_ath);
        self.persist_if(id.is_some());
        id
    }

    pub fn remove_commit(&mut self, pos_id: &str, commit_id: &str) {
        let changed = roster_ops::remove_commit(&mut self.state, pos_id, commit_id);
        self.persist_if(changed);
    }

    pub fn remove_last_commit(&mut self, pos_id: &str) {
        let changed = roster_ops::remove_last_commit(&mut self.state, pos_id);
        self.persist_if(changed);
    }

    pub fn reset_sr_tr(&mut self) {
        roster_ops::reset_sr_tr(&mut self.state);
        self.persist();
    }

    pub fn reset_to_defaults(&mut self) {
        roster_ops::reset_to_defaults(&mut self.state, self.defaults.as_ref());
        self.persist();
    }

    // -----------------------------------------------------------------------
    // Write-through
    // -----------------------------------------------------------------------

    fn persist_if(&mut self, changed: bool) {
        if changed {
            self.persist();
        }
    }

    fn persist(&mut self) {
        let result = migrate::encode(&self.state)
            .map_err(|e| e.to_string())
            .and_then(|text| {
                self.storage
                    .set(&self.key, &text)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!(error = %e, "could not save roster");
            self.persist_error = Some(e);
        }
    }
}
