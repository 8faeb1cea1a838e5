// Team snapshot: display name, division, competition, scheduled fixtures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::player::{Phase, Variant};

/// Which championship a team is entered in. The standard championship
/// splits into masculine/feminine variants by the team's gender
/// designation; the alternate competition is its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competition {
    Standard,
    Alternate,
}

/// Outcome of a played fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureResult {
    Victory,
    Defeat,
    Draw,
}

/// One scheduled team fixture. The engine only reads round/phase/lineup
/// to answer participation questions; scores stay upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamFixture {
    pub phase: Phase,
    /// Round number within the phase (1-indexed).
    pub round: u32,
    /// True when the fixture belongs to the feminine championship.
    #[serde(default)]
    pub female: bool,
    pub date: NaiveDate,
    #[serde(default)]
    pub played: bool,
    #[serde(default)]
    pub result: Option<FixtureResult>,
    /// Ids of the players who appeared in this fixture. Empty until the
    /// match sheet is synced.
    #[serde(default)]
    pub lineup: Vec<String>,
}

/// An immutable team snapshot supplied by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    /// Display name; encodes the ordinal strength number.
    pub name: String,
    /// Division label, used for the point-quota delegate and (alternate
    /// competition) the group topology.
    pub division: String,
    pub competition: Competition,
    #[serde(default)]
    pub fixtures: Vec<TeamFixture>,
}

impl Team {
    /// A team is female-designated when at least one of its fixtures is
    /// flagged feminine.
    pub fn is_female(&self) -> bool {
        self.fixtures.iter().any(|f| f.female)
    }

    /// The eligibility variant this team's rosters are judged under.
    pub fn variant(&self) -> Variant {
        match self.competition {
            Competition::Alternate => Variant::Alternate,
            Competition::Standard => {
                if self.is_female() {
                    Variant::Feminine
                } else {
                    Variant::Masculine
                }
            }
        }
    }

    /// Whether `player_id` appeared in a played fixture of the given
    /// phase and round.
    pub fn fielded_in_round(&self, player_id: &str, phase: Phase, round: u32) -> bool {
        self.fixtures.iter().any(|f| {
            f.phase == phase
                && f.round == round
                && f.played
                && f.lineup.iter().any(|id| id == player_id)
        })
    }
}
