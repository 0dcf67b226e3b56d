use serde_json::{Map, Value};

use crate::model::{CURRENT_VERSION, DefaultData, RosterState};

/// Error type for decoding a persisted roster
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("could not parse roster JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("roster document is not a JSON object")]
    NotAnObject,
}

/// A decoded roster and whether any migration step ran
#[derive(Debug)]
pub struct Loaded {
    pub state: RosterState,
    pub upgraded: bool,
}

/// One schema step. Entry `i` upgrades a document from version `i + 1` to `i + 2`.
type Migration = fn(&mut Map<String, Value>, &dyn DefaultData);

const MIGRATIONS: &[Migration] = &[migrate_v1_to_v2];

/// Parse persisted text, applying migrations until the document reaches
/// `CURRENT_VERSION`. Documents from a newer build are read as-is.
pub fn decode(raw: &str, defaults: &dyn DefaultData) -> Result<Loaded, MigrateError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(mut doc) = value else {
        return Err(MigrateError::NotAnObject);
    };

    // Out-of-range versions count as newer than anything we know
    let mut version = doc
        .get("version")
        .and_then(Value::as_u64)
        .map_or(1, |v| u32::try_from(v).unwrap_or(u32::MAX).max(1));
    let mut upgraded = false;

    while version < CURRENT_VERSION {
        let Some(step) = MIGRATIONS.get((version - 1) as usize) else {
            break;
        };
        step(&mut doc, defaults);
        version += 1;
        doc.insert("version".to_string(), Value::from(version));
        upgraded = true;
    }

    let state = serde_json::from_value(Value::Object(doc))?;
    Ok(Loaded { state, upgraded })
}

/// Serialize for the persistence adapter
pub fn encode(state: &RosterState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// v1 had no super-groups and loosely typed commit/player fields.
fn migrate_v1_to_v2(doc: &mut Map<String, Value>, defaults: &dyn DefaultData) {
    if !doc.get("positions").is_some_and(Value::is_array) {
        doc.insert(
            "positions".to_string(),
            to_value_or_empty(&defaults.default_positions()),
        );
    }
    if !doc.get("superGroups").is_some_and(Value::is_array) {
        doc.insert(
            "superGroups".to_string(),
            to_value_or_empty(&defaults.default_super_groups()),
        );
    }

    let Some(Value::Array(positions)) = doc.get_mut("positions") else {
        return;
    };
    for pos in positions.iter_mut().filter_map(Value::as_object_mut) {
        for field in ["srTr", "target"] {
            let n = pos.get(field).map_or(0, loose_int).max(0);
            pos.insert(field.to_string(), Value::from(n));
        }
        if let Some(Value::Array(players)) = pos.get_mut("players") {
            for player in players.iter_mut().filter_map(Value::as_object_mut) {
                let ovr = player.get("ovr").map_or(0, loose_int);
                player.insert("ovr".to_string(), Value::from(ovr));
            }
        }
        if let Some(Value::Array(commits)) = pos.get_mut("commits") {
            for commit in commits.iter_mut().filter_map(Value::as_object_mut) {
                let stars = commit.get("stars").map_or(0, loose_int).clamp(0, 5);
                let is_ath = commit.get("isAth").and_then(Value::as_bool).unwrap_or(false);
                commit.insert("stars".to_string(), Value::from(stars));
                commit.insert("isAth".to_string(), Value::Bool(is_ath));
            }
        }
    }
}

fn to_value_or_empty<T: serde::Serialize>(v: &T) -> Value {
    serde_json::to_value(v).unwrap_or_else(|_| Value::Array(Vec::new()))
}

/// Read an integer from a number or numeric string; anything else is 0.
fn loose_int(v: &Value) -> i64 {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map_or(0, |f| f.round() as i64),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BuiltinDefaults;
    use pretty_assertions::assert_eq;

    #[test]
    fn legacy_without_super_groups_gets_defaults() {
        let raw = r#"{"version":1,"positions":[
            {"id":"qb","label":"QB","players":[{"id":"p1","ovr":80}],"srTr":1,"target":3,"commits":[]}
        ]}"#;
        let loaded = decode(raw, &BuiltinDefaults).unwrap();
        assert!(loaded.upgraded);
        assert_eq!(loaded.state.version, CURRENT_VERSION);
        assert_eq!(loaded.state.super_groups, BuiltinDefaults.default_super_groups());
        assert_eq!(loaded.state.positions.len(), 1);
        let qb = &loaded.state.positions[0];
        assert_eq!(qb.label, "QB");
        assert_eq!(qb.players[0].ovr, 80);
        assert_eq!(qb.sr_tr, 1);
        assert_eq!(qb.target, 3);
    }

    #[test]
    fn v1_with_super_groups_keeps_them() {
        let raw = r#"{"version":1,"positions":[],
            "superGroups":[{"id":"all","label":"All","memberIds":["qb"],"target":9}]}"#;
        let loaded = decode(raw, &BuiltinDefaults).unwrap();
        assert_eq!(loaded.state.super_groups.len(), 1);
        assert_eq!(loaded.state.super_groups[0].target, 9);
    }

    #[test]
    fn missing_version_is_treated_as_v1() {
        let raw = r#"{"positions":[{"id":"qb","label":"QB"}]}"#;
        let loaded = decode(raw, &BuiltinDefaults).unwrap();
        assert!(loaded.upgraded);
        assert!(!loaded.state.super_groups.is_empty());
    }

    #[test]
    fn loose_commit_fields_are_normalized() {
        let raw = r#"{"version":1,"positions":[{"id":"wr","label":"WR","commits":[
            {"id":"a","stars":"4"},
            {"id":"b","stars":3,"isAth":true},
            {"id":"c"},
            {"id":"d","stars":4.0,"isAth":"yes"}
        ]}]}"#;
        let loaded = decode(raw, &BuiltinDefaults).unwrap();
        let commits = &loaded.state.positions[0].commits;
        let summary: Vec<(u8, bool)> = commits.iter().map(|c| (c.stars, c.is_ath)).collect();
        assert_eq!(summary, vec![(4, false), (3, true), (0, false), (4, false)]);
    }

    #[test]
    fn negative_counts_clamp_during_migration() {
        let raw = r#"{"positions":[{"id":"qb","label":"QB","srTr":-2,"target":"3"}]}"#;
        let loaded = decode(raw, &BuiltinDefaults).unwrap();
        assert_eq!(loaded.state.positions[0].sr_tr, 0);
        assert_eq!(loaded.state.positions[0].target, 3);
    }

    #[test]
    fn missing_positions_are_filled_from_defaults() {
        let loaded = decode("{}", &BuiltinDefaults).unwrap();
        assert_eq!(loaded.state.positions, BuiltinDefaults.default_positions());
    }

    #[test]
    fn current_version_is_not_upgraded() {
        let state = BuiltinDefaults.default_state();
        let raw = encode(&state).unwrap();
        let loaded = decode(&raw, &BuiltinDefaults).unwrap();
        assert!(!loaded.upgraded);
        assert_eq!(loaded.state, state);
    }

    #[test]
    fn newer_version_is_read_without_downgrade() {
        let raw = r#"{"version":7,"positions":[],"superGroups":[],"extra":true}"#;
        let loaded = decode(raw, &BuiltinDefaults).unwrap();
        assert!(!loaded.upgraded);
        assert_eq!(loaded.state.version, 7);
    }

    #[test]
    fn version_beyond_u32_is_never_migrated() {
        for raw in [
            r#"{"version":4294967296,"positions":[],"superGroups":[]}"#,
            r#"{"version":4294967297,"positions":[],"superGroups":[]}"#,
        ] {
            // Not representable in the model: rejected, never downgraded
            assert!(matches!(
                decode(raw, &BuiltinDefaults),
                Err(MigrateError::Parse(_))
            ));
        }
    }

    #[test]
    fn largest_u32_version_is_read_as_is() {
        let raw = r#"{"version":4294967295,"positions":[],"superGroups":[]}"#;
        let loaded = decode(raw, &BuiltinDefaults).unwrap();
        assert!(!loaded.upgraded);
        assert_eq!(loaded.state.version, u32::MAX);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            decode("not json {{{", &BuiltinDefaults),
            Err(MigrateError::Parse(_))
        ));
        assert!(matches!(
            decode("[1,2]", &BuiltinDefaults),
            Err(MigrateError::NotAnObject)
        ));
    }
}
