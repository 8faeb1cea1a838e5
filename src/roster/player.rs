// Player snapshot and precomputed eligibility history.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Player gender as registered with the federation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Nationality class for the roster quota. Only `Foreign` counts against
/// the cap; `European` players are quota-exempt like domestic ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NationalityClass {
    Domestic,
    European,
    Foreign,
}

/// One of the two halves of the season. Lock state and match counts are
/// tracked independently per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    FirstHalf,
    SecondHalf,
}

impl Phase {
    pub fn display_str(&self) -> &'static str {
        match self {
            Phase::FirstHalf => "first half",
            Phase::SecondHalf => "second half",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Competition variant an eligibility record belongs to. The masculine and
/// feminine championships share the standard rule set; the alternate
/// competition has its own lock rule and group structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Masculine,
    Feminine,
    Alternate,
}

impl Variant {
    pub fn display_str(&self) -> &'static str {
        match self {
            Variant::Masculine => "masculine",
            Variant::Feminine => "feminine",
            Variant::Alternate => "alternate",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Per-team match counts for one variant/phase combination.
pub type MatchCounts = HashMap<u32, u32>;

/// Precomputed eligibility data for one player, derived upstream from raw
/// match history and supplied read-only to the engine.
///
/// Absent entries mean "not locked" / "no matches played", never an error.
/// The lock ceiling is monotonic non-decreasing over a phase; the engine
/// only reads that history, the upstream derivation enforces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityHistory {
    /// Highest team number the player may still be assigned to, per
    /// variant and phase. A missing entry means no lock.
    #[serde(default)]
    locked_ceiling: HashMap<Variant, HashMap<Phase, u32>>,
    /// Matches played per team number, per variant and phase.
    #[serde(default)]
    match_counts: HashMap<Variant, HashMap<Phase, MatchCounts>>,
}

impl EligibilityHistory {
    /// The player's current lock ceiling for a variant/phase, if any.
    /// `None` means the player is not locked; `Some(n)` means the player
    /// may only be assigned to teams with number <= n.
    pub fn locked_ceiling(&self, variant: Variant, phase: Phase) -> Option<u32> {
        self.locked_ceiling
            .get(&variant)
            .and_then(|by_phase| by_phase.get(&phase))
            .copied()
    }

    /// Matches played per team for a variant/phase. Missing data reads as
    /// an empty map, which is distinguishable upstream but identical in
    /// effect for rule evaluation.
    pub fn match_counts(&self, variant: Variant, phase: Phase) -> Option<&MatchCounts> {
        self.match_counts
            .get(&variant)
            .and_then(|by_phase| by_phase.get(&phase))
    }

    /// Record a lock ceiling (snapshot construction helper).
    pub fn with_lock(mut self, variant: Variant, phase: Phase, ceiling: u32) -> Self {
        self.locked_ceiling
            .entry(variant)
            .or_default()
            .insert(phase, ceiling);
        self
    }

    /// Record per-team match counts (snapshot construction helper).
    pub fn with_matches(mut self, variant: Variant, phase: Phase, counts: MatchCounts) -> Self {
        self.match_counts
            .entry(variant)
            .or_default()
            .insert(phase, counts);
        self
    }
}

/// An immutable player snapshot supplied by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Stable player identifier (licence number).
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub nationality: NationalityClass,
    /// Federation point score used for ordering rules.
    pub points: u32,
    #[serde(default)]
    pub history: EligibilityHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with_lock() -> EligibilityHistory {
        EligibilityHistory::default().with_lock(Variant::Masculine, Phase::FirstHalf, 3)
    }

    #[test]
    fn absent_lock_reads_as_none() {
        let history = EligibilityHistory::default();
        assert_eq!(history.locked_ceiling(Variant::Masculine, Phase::FirstHalf), None);
        assert_eq!(history.locked_ceiling(Variant::Alternate, Phase::SecondHalf), None);
    }

    #[test]
    fn lock_is_scoped_to_variant_and_phase() {
        let history = history_with_lock();
        assert_eq!(
            history.locked_ceiling(Variant::Masculine, Phase::FirstHalf),
            Some(3)
        );
        // Same variant, other phase: independent.
        assert_eq!(history.locked_ceiling(Variant::Masculine, Phase::SecondHalf), None);
        // Other variant, same phase: independent.
        assert_eq!(history.locked_ceiling(Variant::Alternate, Phase::FirstHalf), None);
    }

    #[test]
    fn absent_match_counts_read_as_none() {
        let history = EligibilityHistory::default();
        assert!(history.match_counts(Variant::Masculine, Phase::FirstHalf).is_none());
    }

    #[test]
    fn match_counts_round_trip() {
        let counts = MatchCounts::from([(1, 2), (3, 1)]);
        let history = EligibilityHistory::default().with_matches(
            Variant::Alternate,
            Phase::SecondHalf,
            counts,
        );
        let read = history
            .match_counts(Variant::Alternate, Phase::SecondHalf)
            .expect("counts should be present");
        assert_eq!(read.get(&1), Some(&2));
        assert_eq!(read.get(&3), Some(&1));
        assert_eq!(read.get(&2), None);
    }

    #[test]
    fn history_serde_round_trip() {
        let history = history_with_lock().with_matches(
            Variant::Masculine,
            Phase::FirstHalf,
            MatchCounts::from([(1, 1)]),
        );
        let json = serde_json::to_string(&history).expect("serialize");
        let back: EligibilityHistory = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.locked_ceiling(Variant::Masculine, Phase::FirstHalf), Some(3));
        assert_eq!(
            back.match_counts(Variant::Masculine, Phase::FirstHalf)
                .and_then(|c| c.get(&1))
                .copied(),
            Some(1)
        );
    }

    #[test]
    fn player_deserializes_without_history() {
        let json = r#"{
            "id": "7612345",
            "name": "A. Example",
            "gender": "male",
            "nationality": "domestic",
            "points": 912
        }"#;
        let player: Player = serde_json::from_str(json).expect("player without history");
        assert_eq!(player.history.locked_ceiling(Variant::Masculine, Phase::FirstHalf), None);
    }
}
