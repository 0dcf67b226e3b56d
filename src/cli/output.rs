use serde::Serialize;

use crate::model::{DerivedStats, PositionGroup, PositionSuperGroup, SuperGroupDerivedStats};
use crate::util::unicode::fit_to_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatsJson {
    pub id: String,
    pub label: String,
    pub sr_tr: u32,
    pub target: u32,
    pub commits: usize,
    #[serde(flatten)]
    pub stats: DerivedStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperGroupStatsJson {
    pub id: String,
    pub label: String,
    pub member_ids: Vec<String>,
    pub target: u32,
    #[serde(flatten)]
    pub stats: SuperGroupDerivedStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsJson {
    pub positions: Vec<GroupStatsJson>,
    pub super_groups: Vec<SuperGroupStatsJson>,
}

pub fn group_to_json(group: &PositionGroup, stats: DerivedStats) -> GroupStatsJson {
    GroupStatsJson {
        id: group.id.clone(),
        label: group.label.clone(),
        sr_tr: group.sr_tr,
        target: group.target,
        commits: group.commits.len(),
        stats,
    }
}

pub fn super_group_to_json(
    sg: &PositionSuperGroup,
    stats: SuperGroupDerivedStats,
) -> SuperGroupStatsJson {
    SuperGroupStatsJson {
        id: sg.id.clone(),
        label: sg.label.clone(),
        member_ids: sg.member_ids.clone(),
        target: sg.target,
        stats,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

const LABEL_WIDTH: usize = 15;

pub fn stats_header(title: &str) -> String {
    format!(
        "{} {:>4} {:>4} {:>5} {:>4} {:>5}",
        fit_to_width(title, LABEL_WIDTH),
        "TOT",
        "OUT",
        "PROJ",
        "TGT",
        "NEED"
    )
}

/// One aligned stats line: id/label, total, departing, projected, target, need
pub fn format_stats_line(label: &str, stats: &DerivedStats, departing: i64, target: u32) -> String {
    format!(
        "{} {:>4} {:>4} {:>5} {:>4} {:>5}",
        fit_to_width(label, LABEL_WIDTH),
        stats.total,
        departing,
        stats.projected,
        target,
        stats.need
    )
}
