// Alternate-competition structure: group topology and its two roster rules.

use tracing::warn;

use crate::config::AlternateConfig;
use crate::roster::{Phase, Player, Variant};
use crate::rules::outcome::Reason;

/// Group structure a division resolves to: `groups` sub-rosters of
/// `players_per_group` players each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupTopology {
    pub groups: usize,
    pub players_per_group: usize,
}

impl GroupTopology {
    /// Required total roster size for a complete lineup.
    pub fn total(&self) -> usize {
        self.groups * self.players_per_group
    }
}

/// Map a division label to its group topology. Labels are matched
/// case-insensitively against the configured table; unknown labels fall
/// back to the configured default group count.
pub fn resolve_topology(division: &str, alternate: &AlternateConfig) -> GroupTopology {
    let groups = alternate
        .divisions
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(division))
        .map(|(_, &groups)| groups)
        .unwrap_or_else(|| {
            warn!(
                "division '{}' missing from the alternate topology table, using {} groups",
                division, alternate.default_groups
            );
            alternate.default_groups
        });

    GroupTopology {
        groups,
        players_per_group: alternate.group_size,
    }
}

/// Point-ordering rule over a complete roster.
///
/// Groups are the consecutive slices of the roster in listed order (slots
/// 1..3 form group 1, and so on). For each adjacent pair (g, g+1), every
/// player of g+1 must score no more than the best of g; and when a group
/// exists below g+1, every player of g+1 must score at least the worst of
/// that lower group. The first violated bound is reported with the
/// offending players.
///
/// Callers only invoke this once the roster reaches the topology's total;
/// partial rosters are exempt.
pub fn check_point_ordering(players: &[&Player], topology: &GroupTopology) -> Option<Reason> {
    let chunks: Vec<&[&Player]> = players.chunks(topology.players_per_group).collect();

    for g in 0..chunks.len().saturating_sub(1) {
        let upper = chunks[g];
        let lower = chunks[g + 1];

        let bound = upper.iter().map(|p| p.points).max()?;
        let offenders: Vec<String> = lower
            .iter()
            .filter(|p| p.points > bound)
            .map(|p| p.id.clone())
            .collect();
        if !offenders.is_empty() {
            return Some(Reason::PointOrdering {
                bound,
                players: offenders,
            });
        }

        if let Some(below) = chunks.get(g + 2) {
            let floor = below.iter().map(|p| p.points).min()?;
            let offenders: Vec<String> = lower
                .iter()
                .filter(|p| p.points < floor)
                .map(|p| p.id.clone())
                .collect();
            if !offenders.is_empty() {
                return Some(Reason::PointOrdering {
                    bound: floor,
                    players: offenders,
                });
            }
        }
    }

    None
}

/// Per-group burnout cap over a complete roster (teams below the first
/// only).
///
/// A player is group-burned when they have >= 3 recorded matches this
/// phase in any single stronger team. Each group tolerates at most one
/// group-burned player; a second invalidates the whole group and every
/// offender is named.
pub fn check_group_burnout(
    players: &[&Player],
    topology: &GroupTopology,
    team_number: u32,
    phase: Phase,
) -> Option<Reason> {
    if team_number <= 1 {
        return None;
    }

    for (index, chunk) in players.chunks(topology.players_per_group).enumerate() {
        let burned: Vec<String> = chunk
            .iter()
            .filter(|p| is_group_burned(p, team_number, phase))
            .map(|p| p.id.clone())
            .collect();
        if burned.len() >= 2 {
            return Some(Reason::GroupBurnout {
                group: index + 1,
                players: burned,
            });
        }
    }

    None
}

fn is_group_burned(player: &Player, team_number: u32, phase: Phase) -> bool {
    player
        .history
        .match_counts(Variant::Alternate, phase)
        .map(|counts| {
            counts
                .iter()
                .any(|(&team, &played)| team != 0 && team < team_number && played >= 3)
        })
        .unwrap_or(false)
}
