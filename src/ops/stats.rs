use tracing::warn;

use crate::model::{DerivedStats, PositionGroup, PositionSuperGroup, SuperGroupDerivedStats};

/// Headcount numbers for a single group
pub fn group_stats(group: &PositionGroup) -> DerivedStats {
    let total = group.players.len() as i64;
    let projected = (total - i64::from(group.sr_tr)) + group.commits.len() as i64;
    DerivedStats {
        total,
        projected,
        need: i64::from(group.target) - projected,
    }
}

/// Rollup over a super-group's members. Member ids with no matching group
/// contribute nothing.
pub fn super_group_stats(
    super_group: &PositionSuperGroup,
    positions: &[PositionGroup],
) -> SuperGroupDerivedStats {
    let mut total = 0;
    let mut projected = 0;
    let mut sr_tr_sum = 0;
    for member_id in &super_group.member_ids {
        let Some(group) = positions.iter().find(|p| &p.id == member_id) else {
            warn!(
                super_group = %super_group.id,
                member = %member_id,
                "super-group member has no matching group; skipped"
            );
            continue;
        };
        let stats = group_stats(group);
        total += stats.total;
        projected += stats.projected;
        sr_tr_sum += i64::from(group.sr_tr);
    }
    SuperGroupDerivedStats {
        stats: DerivedStats {
            total,
            projected,
            need: i64::from(super_group.target) - projected,
        },
        sr_tr_sum,
    }
}
