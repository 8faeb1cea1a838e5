// Burnout prediction: what a player's lock state becomes if assigned now.

use crate::roster::MatchCounts;

/// Standard-championship lock simulation.
///
/// Simulates one more match for `candidate` on top of the player's per-team
/// match counts, then orders every simulated match by team strength. Fewer
/// than two matches never lock. Otherwise the new ceiling is the team of
/// the second match in strength order: afterwards the player may only be
/// assigned to teams with number <= the returned ceiling.
///
/// Matches in exempt teams (number 0) never contribute.
pub fn predict_future_lock(counts: &MatchCounts, candidate: u32) -> Option<u32> {
    let simulated = simulate_counts(counts, candidate);

    let mut flat: Vec<u32> = Vec::new();
    for (&team, &played) in &simulated {
        for _ in 0..played {
            flat.push(team);
        }
    }
    flat.sort_unstable();

    if flat.len() < 2 {
        None
    } else {
        Some(flat[1])
    }
}

/// Alternate-competition lock simulation.
///
/// After simulating one more match for `candidate`, a team number T is
/// locked when any strictly stronger team has accumulated >= 3 matches.
/// Returns the largest (weakest) locked T among the simulated teams, or
/// `None`. The binding constraint is the weakest team the player is
/// disqualified from, not the strongest.
pub fn predict_future_lock_alternate(counts: &MatchCounts, candidate: u32) -> Option<u32> {
    let simulated = simulate_counts(counts, candidate);

    let mut teams: Vec<u32> = simulated.keys().copied().collect();
    teams.sort_unstable();

    let mut locked = None;
    for &team in &teams {
        let barred = simulated
            .iter()
            .any(|(&stronger, &played)| stronger < team && played >= 3);
        if barred {
            // Ascending scan: the last hit is the largest locked team.
            locked = Some(team);
        }
    }
    locked
}

/// Whether the simulated assignment newly locks the player.
///
/// True iff the future state is a lock and either the player was not
/// locked before or the ceiling changes. Assigning into exactly the
/// already-locked team (future == current) reports false even though a new
/// match is recorded; the flag is advisory display metadata, never a
/// rejection reason.
pub fn will_become_newly_locked(current: Option<u32>, future: Option<u32>) -> bool {
    match (current, future) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(current), Some(future)) => future != current,
    }
}

/// Owned copy of the counts with one more match for `candidate` and
/// exempt-team entries removed.
fn simulate_counts(counts: &MatchCounts, candidate: u32) -> MatchCounts {
    let mut simulated: MatchCounts = counts
        .iter()
        .filter(|(&team, _)| team != 0)
        .map(|(&team, &played)| (team, played))
        .collect();
    if candidate != 0 {
        *simulated.entry(candidate).or_insert(0) += 1;
    }
    simulated
}
