//! Round scheduling: greedy assignment of matches to court-bounded rounds.

use crate::logic::matchups::enumerate_matchups;
use crate::models::{
    FallbackPolicy, Match, PlayerId, Round, RoundStatus, TournamentConfig, TournamentError,
};
use std::collections::{HashMap, HashSet};

/// Enumerate all matchups for `roster` and partition them into rounds.
pub fn generate_rounds(
    roster: &[PlayerId],
    config: &TournamentConfig,
) -> Result<Vec<Round>, TournamentError> {
    schedule_rounds(
        enumerate_matchups(roster),
        config.courts_per_round,
        config.fallback,
    )
}

/// Partition `matches` into rounds of at most `courts_per_round` matches.
///
/// 1. For each round, repeatedly pick from the pool the match whose two players have the
///    smallest sum of matches assigned so far, among matches with neither player already
///    in this round. Equal sums go to the earliest match in the pool.
/// 2. When no such match exists, `policy` decides: `LeaveCourtIdle` closes the round,
///    `DoubleBook` takes the first pooled match anyway. This can happen with any roster
///    size, not only when players are few relative to courts.
/// 3. Round 1 starts active and in progress; the rest are pending.
pub fn schedule_rounds(
    matches: Vec<Match>,
    courts_per_round: u32,
    policy: FallbackPolicy,
) -> Result<Vec<Round>, TournamentError> {
    if courts_per_round < 1 {
        return Err(TournamentError::InvalidCourtCount(courts_per_round));
    }
    let courts = courts_per_round as usize;

    let mut pool = matches;
    let mut played: HashMap<PlayerId, u32> = HashMap::new();
    let mut rounds: Vec<Round> = Vec::with_capacity(pool.len().div_ceil(courts));

    while !pool.is_empty() {
        let round_number = rounds.len() as u32 + 1;
        let mut assigned: Vec<Match> = Vec::with_capacity(courts);
        let mut busy: HashSet<PlayerId> = HashSet::new();

        while assigned.len() < courts && !pool.is_empty() {
            let pick = match pick_balanced(&pool, &busy, &played) {
                Some(idx) => Some(idx),
                None => match policy {
                    FallbackPolicy::LeaveCourtIdle => None,
                    FallbackPolicy::DoubleBook => {
                        log::debug!(
                            "Round {}: no match without a busy player, double-booking",
                            round_number
                        );
                        Some(0)
                    }
                },
            };
            let Some(idx) = pick else {
                log::debug!(
                    "Round {}: leaving {} court(s) idle",
                    round_number,
                    courts - assigned.len()
                );
                break;
            };

            let m = pool.remove(idx);
            for p in [&m.player1, &m.player2] {
                busy.insert(p.clone());
                *played.entry(p.clone()).or_insert(0) += 1;
            }
            assigned.push(m);
        }

        let first = rounds.is_empty();
        rounds.push(Round {
            round_number,
            matches: assigned,
            status: if first {
                RoundStatus::InProgress
            } else {
                RoundStatus::Pending
            },
            is_active: first,
        });
    }

    Ok(rounds)
}

/// Index of the pooled match with the lowest combined play count whose players are both free.
fn pick_balanced(
    pool: &[Match],
    busy: &HashSet<PlayerId>,
    played: &HashMap<PlayerId, u32>,
) -> Option<usize> {
    let count = |p: &PlayerId| played.get(p).copied().unwrap_or(0);
    pool.iter()
        .enumerate()
        .filter(|(_, m)| !busy.contains(&m.player1) && !busy.contains(&m.player2))
        .min_by_key(|(_, m)| count(&m.player1) + count(&m.player2))
        .map(|(idx, _)| idx)
}
