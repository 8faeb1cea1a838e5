// Full-roster validation: re-check an assembled roster against every rule.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::roster::{Competition, Composition};
use crate::rules::alternate;
use crate::rules::assignment::{RosterValidator, ValidationContext};
use crate::rules::outcome::{Reason, RosterValidationResult};

impl<'a> RosterValidator<'a> {
    /// Re-validate `team_id`'s finished roster.
    ///
    /// Applies the same rule set as [`RosterValidator::assign`], but over
    /// the assembled set rather than incrementally, so violations
    /// introduced by any path are caught. The first violation is reported
    /// with its offending players. Pure: identical inputs always produce
    /// the identical result.
    pub fn validate_roster(
        &self,
        team_id: &str,
        roster: &Composition,
        ctx: &ValidationContext,
    ) -> RosterValidationResult {
        let Some(team) = self.team_by_id(team_id) else {
            warn!("roster validation for unknown team id '{team_id}'");
            return RosterValidationResult::rejected(Reason::UnknownEntity {
                entity: team_id.to_string(),
            });
        };

        let listed = roster.players(team_id);

        // Duplicates would mean the composition invariant was broken
        // upstream; report rather than panic.
        let mut seen = HashSet::new();
        let duplicates: Vec<String> = listed
            .iter()
            .filter(|id| !seen.insert(id.as_str()))
            .cloned()
            .collect();
        if !duplicates.is_empty() {
            return RosterValidationResult::rejected(Reason::AlreadyListed {
                players: duplicates,
            });
        }

        let cap = self.capacity_for(team);
        if listed.len() > cap {
            return RosterValidationResult::rejected(Reason::RosterFull { cap });
        }

        let roster_players = match self.resolve_players(listed) {
            Ok(players) => players,
            Err(unknown) => {
                warn!("roster names unknown player id '{unknown}'");
                return RosterValidationResult::rejected(Reason::UnknownEntity {
                    entity: unknown,
                });
            }
        };

        let number = self.team_strength(team);
        if number == 0 {
            debug!("team '{}' is rule-exempt (number 0)", team.name);
            return RosterValidationResult::ok();
        }

        let variant = team.variant();

        if team.competition == Competition::Standard {
            let foreigners = Self::foreign_offenders(&roster_players);
            if foreigners.len() > self.rules.foreign_cap {
                return RosterValidationResult::rejected(Reason::ForeignQuota {
                    cap: self.rules.foreign_cap,
                    players: foreigners,
                });
            }
        }

        // Per-player lock ceilings over the whole set. The reported
        // ceiling is the strictest among the offenders.
        let locked: Vec<(&str, u32)> = roster_players
            .iter()
            .filter_map(|p| {
                p.history
                    .locked_ceiling(variant, ctx.phase)
                    .filter(|&ceiling| number > ceiling)
                    .map(|ceiling| (p.id.as_str(), ceiling))
            })
            .collect();
        if let Some(&(_, strictest)) = locked.iter().min_by_key(|&&(_, ceiling)| ceiling) {
            return RosterValidationResult::rejected(Reason::LockedOut {
                ceiling: strictest,
                players: locked.iter().map(|&(id, _)| id.to_string()).collect(),
            });
        }

        if !team.is_female() {
            let females = Self::female_offenders(&roster_players);
            if females.len() > self.rules.female_cap {
                return RosterValidationResult::rejected(Reason::FemaleQuota {
                    cap: self.rules.female_cap,
                    players: females,
                });
            }
        }

        if team.competition == Competition::Standard {
            let verdict =
                self.point_quota()
                    .validate(&roster_players, &team.division, team.is_female());
            if !verdict.valid {
                return RosterValidationResult::rejected(Reason::PointQuota {
                    detail: verdict.reason.unwrap_or_default(),
                });
            }
        }

        if ctx.round == self.rules.designated_round {
            let offenders = self.midseason_offenders(&roster_players, number, ctx.phase);
            if offenders.len() > 1 {
                return RosterValidationResult::rejected(Reason::MidseasonReinforcement {
                    round: ctx.round,
                    players: offenders,
                });
            }
        }

        if team.competition == Competition::Alternate {
            let topology = alternate::resolve_topology(&team.division, &self.rules.alternate);
            if roster_players.len() == topology.total() {
                if let Some(reason) = alternate::check_point_ordering(&roster_players, &topology) {
                    return RosterValidationResult::rejected(reason);
                }
                if let Some(reason) = alternate::check_group_burnout(
                    &roster_players,
                    &topology,
                    number,
                    ctx.phase,
                ) {
                    return RosterValidationResult::rejected(reason);
                }
            }
        }

        RosterValidationResult::ok()
    }
}
