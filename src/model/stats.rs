use serde::Serialize;

/// Computed headcount numbers for one group. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DerivedStats {
    /// Current members
    pub total: i64,
    /// Members after departures plus incoming commits
    pub projected: i64,
    /// `target - projected`; negative when over-committed
    pub need: i64,
}

/// Rollup numbers for a super-group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperGroupDerivedStats {
    #[serde(flatten)]
    pub stats: DerivedStats,
    pub sr_tr_sum: i64,
}
