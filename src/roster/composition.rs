// Roster-in-progress: team id -> ordered, duplicate-free player list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A roster assignment under construction. Teams map to ordered,
/// duplicate-free lists of player ids. The engine never mutates a caller's
/// composition; every change goes through [`Composition::simulate`], which
/// returns an owned copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    /// BTreeMap keeps team iteration deterministic.
    entries: BTreeMap<String, Vec<String>>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot construction helper: seed a team's list.
    pub fn with_team<I, S>(mut self, team_id: &str, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.entries.entry(team_id.to_string()).or_default();
        for player in players {
            let player = player.into();
            if !list.contains(&player) {
                list.push(player);
            }
        }
        self
    }

    /// The ordered player list for a team; unknown teams read as empty.
    pub fn players(&self, team_id: &str) -> &[String] {
        self.entries.get(team_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, team_id: &str) -> usize {
        self.players(team_id).len()
    }

    pub fn is_empty(&self, team_id: &str) -> bool {
        self.players(team_id).is_empty()
    }

    pub fn contains(&self, team_id: &str, player_id: &str) -> bool {
        self.players(team_id).iter().any(|id| id == player_id)
    }

    /// Pure constructor for the hypothetical post-assignment roster: an
    /// owned copy with `player_id` appended to `team_id`'s list. Appending
    /// an already-listed player yields an identical copy (the list stays
    /// duplicate-free).
    pub fn simulate(&self, team_id: &str, player_id: &str) -> Composition {
        let mut next = self.clone();
        let list = next.entries.entry(team_id.to_string()).or_default();
        if !list.iter().any(|id| id == player_id) {
            list.push(player_id.to_string());
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_team_reads_as_empty() {
        let roster = Composition::new();
        assert!(roster.players("team_1").is_empty());
        assert_eq!(roster.len("team_1"), 0);
        assert!(!roster.contains("team_1", "p1"));
    }

    #[test]
    fn simulate_returns_owned_copy_and_preserves_original() {
        let roster = Composition::new().with_team("team_1", ["p1"]);
        let simulated = roster.simulate("team_1", "p2");

        assert_eq!(roster.players("team_1"), ["p1".to_string()]);
        assert_eq!(
            simulated.players("team_1"),
            ["p1".to_string(), "p2".to_string()]
        );
    }

    #[test]
    fn simulate_preserves_insertion_order() {
        let roster = Composition::new()
            .simulate("team_1", "p3")
            .simulate("team_1", "p1")
            .simulate("team_1", "p2");
        assert_eq!(
            roster.players("team_1"),
            ["p3".to_string(), "p1".to_string(), "p2".to_string()]
        );
    }

    #[test]
    fn simulate_is_duplicate_free() {
        let roster = Composition::new().with_team("team_1", ["p1"]);
        let simulated = roster.simulate("team_1", "p1");
        assert_eq!(simulated, roster);
    }

    #[test]
    fn with_team_drops_duplicates() {
        let roster = Composition::new().with_team("team_1", ["p1", "p2", "p1"]);
        assert_eq!(roster.len("team_1"), 2);
    }

    #[test]
    fn teams_are_independent() {
        let roster = Composition::new()
            .with_team("team_1", ["p1"])
            .with_team("team_2", ["p2"]);
        assert!(roster.contains("team_1", "p1"));
        assert!(!roster.contains("team_2", "p1"));
    }
}
