// Single-assignment validation: may this player join this team's roster?

use tracing::{debug, warn};

use crate::config::RulesConfig;
use crate::roster::{
    Competition, Composition, Gender, MatchCounts, NationalityClass, Phase, Player, Team, Variant,
};
use crate::rules::alternate;
use crate::rules::burnout;
use crate::rules::outcome::{AssignmentResult, Reason};
use crate::rules::quota::PointQuotaValidator;
use crate::rules::team_number::strength_number;

/// Phase and round a validation call happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub phase: Phase,
    /// Round number of the matchday being composed (1-indexed).
    pub round: u32,
}

/// Rule evaluation over one set of immutable snapshots.
///
/// Holds borrowed player/team snapshots plus the rule parameters and the
/// external point-quota delegate. Every entry point is a pure function of
/// its inputs: nothing is retained between calls and callers' collections
/// are never mutated.
pub struct RosterValidator<'a> {
    pub(super) rules: &'a RulesConfig,
    point_quota: &'a dyn PointQuotaValidator,
    players: &'a [Player],
    teams: &'a [Team],
}

impl<'a> RosterValidator<'a> {
    pub fn new(
        rules: &'a RulesConfig,
        point_quota: &'a dyn PointQuotaValidator,
        players: &'a [Player],
        teams: &'a [Team],
    ) -> Self {
        RosterValidator {
            rules,
            point_quota,
            players,
            teams,
        }
    }

    pub(super) fn point_quota(&self) -> &dyn PointQuotaValidator {
        self.point_quota
    }

    pub(super) fn player_by_id(&self, id: &str) -> Option<&'a Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(super) fn team_by_id(&self, id: &str) -> Option<&'a Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub(super) fn team_strength(&self, team: &Team) -> u32 {
        strength_number(&team.name, &self.rules.club_token)
    }

    /// Roster capacity: the standard cap, or the alternate division's
    /// required total.
    pub(super) fn capacity_for(&self, team: &Team) -> usize {
        match team.competition {
            Competition::Standard => self.rules.roster_cap,
            Competition::Alternate => {
                alternate::resolve_topology(&team.division, &self.rules.alternate).total()
            }
        }
    }

    /// Resolve roster ids against the player snapshots, preserving listed
    /// order. Err carries the first unknown id.
    pub(super) fn resolve_players(&self, ids: &[String]) -> Result<Vec<&'a Player>, String> {
        ids.iter()
            .map(|id| self.player_by_id(id).ok_or_else(|| id.clone()))
            .collect()
    }

    /// Roster players who appeared in round 1 of this phase for a team
    /// stronger than `team_number`.
    pub(super) fn midseason_offenders(
        &self,
        roster_players: &[&Player],
        team_number: u32,
        phase: Phase,
    ) -> Vec<String> {
        roster_players
            .iter()
            .filter(|p| {
                self.teams.iter().any(|t| {
                    let n = self.team_strength(t);
                    n != 0 && n < team_number && t.fielded_in_round(&p.id, phase, 1)
                })
            })
            .map(|p| p.id.clone())
            .collect()
    }

    pub(super) fn foreign_offenders(roster_players: &[&Player]) -> Vec<String> {
        roster_players
            .iter()
            .filter(|p| p.nationality == NationalityClass::Foreign)
            .map(|p| p.id.clone())
            .collect()
    }

    pub(super) fn female_offenders(roster_players: &[&Player]) -> Vec<String> {
        roster_players
            .iter()
            .filter(|p| p.gender == Gender::Female)
            .map(|p| p.id.clone())
            .collect()
    }

    fn reject(&self, reason: Reason, unchanged: &Composition) -> AssignmentResult {
        debug!(code = reason.code(), "assignment rejected: {reason}");
        AssignmentResult::rejected(reason, unchanged.clone())
    }

    /// Decide whether `player_id` may be added to `team_id`'s roster.
    ///
    /// Checks run in a fixed order and short-circuit on the first
    /// failure: entity existence, capacity, nationality quota, current
    /// lock, gender quota, federation point-quota, the mid-season
    /// cross-team rule, and (alternate competition, complete rosters
    /// only) the group-structure rules. A team resolving to strength
    /// number 0 is rule-exempt and passes everything after capacity.
    ///
    /// On success the result carries the simulated post-assignment roster
    /// and the advisory newly-locked metadata.
    pub fn assign(
        &self,
        player_id: &str,
        team_id: &str,
        roster: &Composition,
        ctx: &ValidationContext,
    ) -> AssignmentResult {
        // 1. Entity existence.
        let Some(player) = self.player_by_id(player_id) else {
            warn!("assignment for unknown player id '{player_id}'");
            return self.reject(
                Reason::UnknownEntity {
                    entity: player_id.to_string(),
                },
                roster,
            );
        };
        let Some(team) = self.team_by_id(team_id) else {
            warn!("assignment for unknown team id '{team_id}'");
            return self.reject(
                Reason::UnknownEntity {
                    entity: team_id.to_string(),
                },
                roster,
            );
        };

        // 2. Capacity and duplicates.
        let cap = self.capacity_for(team);
        if roster.len(team_id) >= cap {
            return self.reject(Reason::RosterFull { cap }, roster);
        }
        if roster.contains(team_id, player_id) {
            return self.reject(
                Reason::AlreadyListed {
                    players: vec![player_id.to_string()],
                },
                roster,
            );
        }

        let simulated = roster.simulate(team_id, player_id);
        let number = self.team_strength(team);

        // Rule-exempt team: no lock or quota applies.
        if number == 0 {
            debug!("team '{}' is rule-exempt (number 0)", team.name);
            return AssignmentResult::allowed(simulated, false, None);
        }

        let roster_players = match self.resolve_players(simulated.players(team_id)) {
            Ok(players) => players,
            Err(unknown) => {
                warn!("roster names unknown player id '{unknown}'");
                return self.reject(Reason::UnknownEntity { entity: unknown }, roster);
            }
        };
        let variant = team.variant();

        // 3. Nationality quota (standard championship only).
        if team.competition == Competition::Standard {
            let foreigners = Self::foreign_offenders(&roster_players);
            if foreigners.len() > self.rules.foreign_cap {
                return self.reject(
                    Reason::ForeignQuota {
                        cap: self.rules.foreign_cap,
                        players: foreigners,
                    },
                    roster,
                );
            }
        }

        // 4. Current lock ceiling.
        let current_ceiling = player.history.locked_ceiling(variant, ctx.phase);
        if let Some(ceiling) = current_ceiling {
            if number > ceiling {
                return self.reject(
                    Reason::LockedOut {
                        ceiling,
                        players: vec![player_id.to_string()],
                    },
                    roster,
                );
            }
        }

        // 5. Gender quota on male-designated teams.
        if !team.is_female() {
            let females = Self::female_offenders(&roster_players);
            if females.len() > self.rules.female_cap {
                return self.reject(
                    Reason::FemaleQuota {
                        cap: self.rules.female_cap,
                        players: females,
                    },
                    roster,
                );
            }
        }

        // 6. Federation point-quota (standard championship only).
        if team.competition == Competition::Standard {
            let verdict =
                self.point_quota
                    .validate(&roster_players, &team.division, team.is_female());
            if !verdict.valid {
                return self.reject(
                    Reason::PointQuota {
                        detail: verdict.reason.unwrap_or_default(),
                    },
                    roster,
                );
            }
        }

        // 7. Mid-season cross-team rule on the designated round.
        if ctx.round == self.rules.designated_round {
            let offenders = self.midseason_offenders(&roster_players, number, ctx.phase);
            if offenders.len() > 1 {
                return self.reject(
                    Reason::MidseasonReinforcement {
                        round: ctx.round,
                        players: offenders,
                    },
                    roster,
                );
            }
        }

        // 8. Alternate competition, complete rosters only.
        if team.competition == Competition::Alternate {
            let topology = alternate::resolve_topology(&team.division, &self.rules.alternate);
            if roster_players.len() == topology.total() {
                if let Some(reason) = alternate::check_point_ordering(&roster_players, &topology) {
                    return self.reject(reason, roster);
                }
                if let Some(reason) = alternate::check_group_burnout(
                    &roster_players,
                    &topology,
                    number,
                    ctx.phase,
                ) {
                    return self.reject(reason, roster);
                }
            }
        }

        // Advisory lock metadata for the allowed assignment.
        let empty = MatchCounts::new();
        let counts = player
            .history
            .match_counts(variant, ctx.phase)
            .unwrap_or(&empty);
        let future = match variant {
            Variant::Alternate => burnout::predict_future_lock_alternate(counts, number),
            Variant::Masculine | Variant::Feminine => {
                burnout::predict_future_lock(counts, number)
            }
        };
        let newly_locked = burnout::will_become_newly_locked(current_ceiling, future);

        debug!(
            "player '{}' allowed into '{}' (newly locked: {})",
            player.name, team.name, newly_locked
        );
        AssignmentResult::allowed(simulated, newly_locked, if newly_locked { future } else { None })
    }
}
