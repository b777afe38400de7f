//! Matchup enumeration: every unordered pair of roster players, exactly once.

use crate::models::{Match, PlayerId};

/// Full round-robin pairing of `roster`: `n * (n - 1) / 2` pending matches.
///
/// Pairs follow roster order: (0,1), (0,2), ..., (1,2), ..., (n-2,n-1).
/// Fewer than 2 players yields no matches.
pub fn enumerate_matchups(roster: &[PlayerId]) -> Vec<Match> {
    let n = roster.len();
    let mut matches = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, p1) in roster.iter().enumerate() {
        for p2 in &roster[i + 1..] {
            matches.push(Match::new(p1.clone(), p2.clone()));
        }
    }
    matches
}
