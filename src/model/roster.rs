use serde::{Deserialize, Serialize};

/// Schema version written by this build. Older documents are migrated on load.
pub const CURRENT_VERSION: u32 = 2;

/// An existing roster member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    /// Overall rating
    #[serde(default)]
    pub ovr: i32,
}

/// A pending addition to a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: String,
    /// Quality rating, 1..=5 for anything created here; 0 for legacy records
    /// that never carried one
    #[serde(default)]
    pub stars: u8,
    /// Athlete flag (position undecided)
    #[serde(default)]
    pub is_ath: bool,
}

/// A labeled bucket of roster slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionGroup {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub players: Vec<Player>,
    /// Members expected to depart (seniors and transfers)
    #[serde(default)]
    pub sr_tr: u32,
    #[serde(default)]
    pub target: u32,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl PositionGroup {
    pub fn new(id: &str, label: &str, target: u32) -> Self {
        PositionGroup {
            id: id.to_string(),
            label: label.to_string(),
            players: Vec::new(),
            sr_tr: 0,
            target,
            commits: Vec::new(),
        }
    }
}

/// A named rollup over several position groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSuperGroup {
    pub id: String,
    pub label: String,
    /// Ids of member `PositionGroup`s. Ids with no matching group are skipped
    /// during aggregation.
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub target: u32,
}

/// The whole persisted document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterState {
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default)]
    pub positions: Vec<PositionGroup>,
    #[serde(default)]
    pub super_groups: Vec<PositionSuperGroup>,
}

/// Documents written before versioning was tracked are version 1
fn legacy_version() -> u32 {
    1
}

impl RosterState {
    pub fn position(&self, id: &str) -> Option<&PositionGroup> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub fn position_mut(&mut self, id: &str) -> Option<&mut PositionGroup> {
        self.positions.iter_mut().find(|p| p.id == id)
    }

    pub fn super_group(&self, id: &str) -> Option<&PositionSuperGroup> {
        self.super_groups.iter().find(|sg| sg.id == id)
    }

    pub fn super_group_mut(&mut self, id: &str) -> Option<&mut PositionSuperGroup> {
        self.super_groups.iter_mut().find(|sg| sg.id == id)
    }

    /// Row order for keyboard navigation
    pub fn position_ids(&self) -> Vec<String> {
        self.positions.iter().map(|p| p.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_camel_case_field_names() {
        let group = PositionGroup {
            id: "qb".into(),
            label: "QB".into(),
            players: vec![Player {
                id: "p1".into(),
                ovr: 80,
            }],
            sr_tr: 1,
            target: 3,
            commits: vec![Commit {
                id: "c1".into(),
                stars: 4,
                is_ath: true,
            }],
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["srTr"], 1);
        assert_eq!(json["commits"][0]["isAth"], true);
        assert_eq!(json["players"][0]["ovr"], 80);
    }

    #[test]
    fn missing_fields_default() {
        let state: RosterState = serde_json::from_str(
            r#"{"positions":[{"id":"qb","label":"QB","commits":[{"id":"c1"}]}]}"#,
        )
        .unwrap();
        assert_eq!(state.version, 1);
        assert!(state.super_groups.is_empty());
        let qb = state.position("qb").unwrap();
        assert_eq!(qb.sr_tr, 0);
        assert_eq!(qb.target, 0);
        assert_eq!(qb.commits[0].stars, 0);
        assert!(!qb.commits[0].is_ath);
    }

    #[test]
    fn lookups_by_id() {
        let mut state = RosterState {
            version: CURRENT_VERSION,
            positions: vec![PositionGroup::new("qb", "QB", 3)],
            super_groups: vec![],
        };
        assert!(state.position("qb").is_some());
        assert!(state.position("rb").is_none());
        state.position_mut("qb").unwrap().target = 4;
        assert_eq!(state.position("qb").unwrap().target, 4);
        assert_eq!(state.position_ids(), vec!["qb".to_string()]);
    }
}
