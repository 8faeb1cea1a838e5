// Structured rule outcomes: reasons, assignment and roster verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roster::Composition;

/// Why an assignment or roster was rejected. Every variant carries the
/// offending player ids where applicable; `code()` gives the stable
/// machine-checkable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reason {
    /// Player or team id did not resolve against the supplied snapshots.
    UnknownEntity { entity: String },
    /// The roster already holds its full complement.
    RosterFull { cap: usize },
    /// The player is already on this team's list.
    AlreadyListed { players: Vec<String> },
    /// More foreign-class players than the standard championship allows.
    ForeignQuota { cap: usize, players: Vec<String> },
    /// The player's lock ceiling forbids this team.
    LockedOut { ceiling: u32, players: Vec<String> },
    /// More female players than a male-designated roster allows.
    FemaleQuota { cap: usize, players: Vec<String> },
    /// The division-aware federation point-quota delegate refused.
    PointQuota { detail: String },
    /// Second round-1-for-a-stronger-team player on a designated round.
    MidseasonReinforcement { round: u32, players: Vec<String> },
    /// Alternate competition: point ordering across groups violated.
    PointOrdering { bound: u32, players: Vec<String> },
    /// Alternate competition: more than one group-burned player in a group.
    GroupBurnout { group: usize, players: Vec<String> },
}

impl Reason {
    pub fn code(&self) -> &'static str {
        match self {
            Reason::UnknownEntity { .. } => "unknown_entity",
            Reason::RosterFull { .. } => "roster_full",
            Reason::AlreadyListed { .. } => "already_listed",
            Reason::ForeignQuota { .. } => "foreign_quota",
            Reason::LockedOut { .. } => "locked_out",
            Reason::FemaleQuota { .. } => "female_quota",
            Reason::PointQuota { .. } => "point_quota",
            Reason::MidseasonReinforcement { .. } => "midseason_reinforcement",
            Reason::PointOrdering { .. } => "point_ordering",
            Reason::GroupBurnout { .. } => "group_burnout",
        }
    }

    /// The player ids this reason names, in roster order.
    pub fn players(&self) -> &[String] {
        match self {
            Reason::AlreadyListed { players }
            | Reason::ForeignQuota { players, .. }
            | Reason::LockedOut { players, .. }
            | Reason::FemaleQuota { players, .. }
            | Reason::MidseasonReinforcement { players, .. }
            | Reason::PointOrdering { players, .. }
            | Reason::GroupBurnout { players, .. } => players,
            Reason::UnknownEntity { .. } | Reason::RosterFull { .. } | Reason::PointQuota { .. } => {
                &[]
            }
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::UnknownEntity { entity } => write!(f, "unknown entity {entity}"),
            Reason::RosterFull { cap } => write!(f, "roster full ({cap})"),
            Reason::AlreadyListed { players } => {
                write!(f, "already listed: {}", players.join(", "))
            }
            Reason::ForeignQuota { cap, players } => {
                write!(f, "foreign quota {} exceeded: {}", cap, players.join(", "))
            }
            Reason::LockedOut { ceiling, players } => {
                write!(f, "locked into team <= {}: {}", ceiling, players.join(", "))
            }
            Reason::FemaleQuota { cap, players } => {
                write!(f, "female quota {} exceeded: {}", cap, players.join(", "))
            }
            Reason::PointQuota { detail } => write!(f, "point quota: {detail}"),
            Reason::MidseasonReinforcement { round, players } => write!(
                f,
                "round {} reinforcement limit: {}",
                round,
                players.join(", ")
            ),
            Reason::PointOrdering { bound, players } => {
                write!(f, "point ordering against {}: {}", bound, players.join(", "))
            }
            Reason::GroupBurnout { group, players } => {
                write!(f, "group {} burnout cap: {}", group, players.join(", "))
            }
        }
    }
}

/// Outcome of a single-assignment validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    /// The roster that would exist after the assignment; on rejection,
    /// an unchanged owned copy of the input roster.
    pub simulated: Composition,
    /// Advisory: would this assignment newly lock the player.
    #[serde(default)]
    pub will_become_locked: bool,
    /// The new ceiling, populated only when `will_become_locked`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_lock_threshold: Option<u32>,
}

impl AssignmentResult {
    pub fn allowed(
        simulated: Composition,
        will_become_locked: bool,
        new_lock_threshold: Option<u32>,
    ) -> Self {
        AssignmentResult {
            allowed: true,
            reason: None,
            simulated,
            will_become_locked,
            new_lock_threshold,
        }
    }

    pub fn rejected(reason: Reason, unchanged: Composition) -> Self {
        AssignmentResult {
            allowed: false,
            reason: Some(reason),
            simulated: unchanged,
            will_become_locked: false,
            new_lock_threshold: None,
        }
    }
}

/// Outcome of a full-roster validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    /// Convenience mirror of the reason's player ids.
    #[serde(default)]
    pub offending_players: Vec<String>,
}

impl RosterValidationResult {
    pub fn ok() -> Self {
        RosterValidationResult {
            valid: true,
            reason: None,
            offending_players: Vec::new(),
        }
    }

    pub fn rejected(reason: Reason) -> Self {
        let offending_players = reason.players().to_vec();
        RosterValidationResult {
            valid: false,
            reason: Some(reason),
            offending_players,
        }
    }
}
