use super::roster::{CURRENT_VERSION, PositionGroup, PositionSuperGroup, RosterState};

/// Source of the initial roster layout.
///
/// Every call returns freshly owned values, so callers may mutate what they
/// get back without affecting later calls.
pub trait DefaultData {
    fn default_positions(&self) -> Vec<PositionGroup>;
    fn default_super_groups(&self) -> Vec<PositionSuperGroup>;

    /// A complete state at the current schema version
    fn default_state(&self) -> RosterState {
        RosterState {
            version: CURRENT_VERSION,
            positions: self.default_positions(),
            super_groups: self.default_super_groups(),
        }
    }
}

/// The built-in 85-man football roster template
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDefaults;

/// (id, label, target)
const POSITIONS: &[(&str, &str, u32)] = &[
    ("qb", "QB", 4),
    ("rb", "RB", 5),
    ("wr", "WR", 10),
    ("te", "TE", 5),
    ("ot", "OT", 8),
    ("iol", "IOL", 9),
    ("edge", "EDGE", 8),
    ("dt", "DT", 8),
    ("lb", "LB", 7),
    ("cb", "CB", 9),
    ("s", "S", 7),
    ("k", "K", 2),
    ("p", "P", 2),
    ("ls", "LS", 1),
];

/// (id, label, members, target)
const SUPER_GROUPS: &[(&str, &str, &[&str], u32)] = &[
    ("ol", "Offensive Line", &["ot", "iol"], 17),
    ("dl", "Defensive Line", &["edge", "dt"], 16),
    ("db", "Secondary", &["cb", "s"], 16),
    ("offense", "Offense", &["qb", "rb", "wr", "te", "ot", "iol"], 41),
    ("defense", "Defense", &["edge", "dt", "lb", "cb", "s"], 39),
    ("st", "Special Teams", &["k", "p", "ls"], 5),
];

impl DefaultData for BuiltinDefaults {
    fn default_positions(&self) -> Vec<PositionGroup> {
        POSITIONS
            .iter()
            .map(|(id, label, target)| PositionGroup::new(id, label, *target))
            .collect()
    }

    fn default_super_groups(&self) -> Vec<PositionSuperGroup> {
        SUPER_GROUPS
            .iter()
            .map(|(id, label, members, target)| PositionSuperGroup {
                id: id.to_string(),
                label: label.to_string(),
                member_ids: members.iter().map(|m| m.to_string()).collect(),
                target: *target,
            })
            .collect()
    }
}
