//! Integration tests for matchup enumeration and round scheduling.

use racquet_tournament_web::{
    enumerate_matchups, generate_rounds, schedule_rounds, FallbackPolicy, PlayerId, Round,
    RoundStatus, TournamentConfig, TournamentError,
};
use std::collections::{HashMap, HashSet};

fn roster(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|n| PlayerId::from(*n)).collect()
}

fn roster_of(n: usize) -> Vec<PlayerId> {
    (0..n).map(|i| PlayerId::new(format!("P{i}"))).collect()
}

fn pair_key(a: &PlayerId, b: &PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

fn has_repeat_player(round: &Round) -> bool {
    let mut seen = HashSet::new();
    round.player_ids().any(|p| !seen.insert(p))
}

fn config(courts: u32, fallback: FallbackPolicy) -> TournamentConfig {
    TournamentConfig::new(courts, fallback).unwrap()
}

#[test]
fn enumerate_yields_every_pair_once() {
    for n in 0..9 {
        let players = roster_of(n);
        let matches = enumerate_matchups(&players);
        assert_eq!(matches.len(), n * n.saturating_sub(1) / 2);

        let pairs: HashSet<_> = matches
            .iter()
            .map(|m| pair_key(&m.player1, &m.player2))
            .collect();
        assert_eq!(pairs.len(), matches.len());
        for m in &matches {
            assert_ne!(m.player1, m.player2);
            assert_eq!(m.score1, 0);
            assert_eq!(m.score2, 0);
            assert!(m.winner.is_none());
        }
    }
}

#[test]
fn enumerate_follows_roster_order() {
    let matches = enumerate_matchups(&roster(&["A", "B", "C", "D"]));
    let labels: Vec<String> = matches
        .iter()
        .map(|m| format!("{}{}", m.player1, m.player2))
        .collect();
    assert_eq!(labels, ["AB", "AC", "AD", "BC", "BD", "CD"]);
}

#[test]
fn four_players_two_courts_gives_three_full_rounds() {
    let players = roster(&["A", "B", "C", "D"]);
    for policy in [FallbackPolicy::LeaveCourtIdle, FallbackPolicy::DoubleBook] {
        let rounds = generate_rounds(&players, &config(2, policy)).unwrap();
        assert_eq!(rounds.len(), 3);

        let mut appearances: HashMap<PlayerId, usize> = HashMap::new();
        for r in &rounds {
            assert_eq!(r.matches.len(), 2);
            assert!(!has_repeat_player(r));
            for p in r.player_ids() {
                *appearances.entry(p.clone()).or_default() += 1;
            }
        }
        assert_eq!(appearances.len(), 4);
        assert!(appearances.values().all(|&c| c == 3));
    }
}

#[test]
fn four_players_round_layout_is_deterministic() {
    let rounds = generate_rounds(&roster(&["A", "B", "C", "D"]), &TournamentConfig::default()).unwrap();
    let layout: Vec<Vec<String>> = rounds
        .iter()
        .map(|r| {
            r.matches
                .iter()
                .map(|m| format!("{}{}", m.player1, m.player2))
                .collect()
        })
        .collect();
    assert_eq!(layout, [["AB", "CD"], ["AC", "BD"], ["AD", "BC"]]);
}

#[test]
fn empty_and_single_rosters_produce_nothing() {
    for players in [roster(&[]), roster(&["A"])] {
        let rounds = generate_rounds(&players, &TournamentConfig::default()).unwrap();
        assert!(rounds.is_empty());
    }
}

#[test]
fn zero_courts_is_rejected() {
    let matches = enumerate_matchups(&roster(&["A", "B", "C"]));
    assert_eq!(
        schedule_rounds(matches, 0, FallbackPolicy::default()),
        Err(TournamentError::InvalidCourtCount(0))
    );
    assert_eq!(
        TournamentConfig::new(0, FallbackPolicy::default()),
        Err(TournamentError::InvalidCourtCount(0))
    );
}

#[test]
fn rounds_cover_every_match_within_capacity() {
    for n in 2..12 {
        for courts in 1..5 {
            for policy in [FallbackPolicy::LeaveCourtIdle, FallbackPolicy::DoubleBook] {
                let players = roster_of(n);
                let expected = enumerate_matchups(&players);
                let rounds = generate_rounds(&players, &config(courts, policy)).unwrap();

                let mut scheduled = HashSet::new();
                for r in &rounds {
                    assert!(!r.matches.is_empty());
                    assert!(r.matches.len() <= courts as usize);
                    for m in &r.matches {
                        assert!(scheduled.insert(pair_key(&m.player1, &m.player2)));
                    }
                }
                assert_eq!(scheduled.len(), expected.len());

                let numbers: Vec<u32> = rounds.iter().map(|r| r.round_number).collect();
                let want: Vec<u32> = (1..=rounds.len() as u32).collect();
                assert_eq!(numbers, want);
            }
        }
    }
}

#[test]
fn leave_court_idle_never_double_books() {
    for n in 2..12 {
        for courts in 1..5 {
            let rounds =
                generate_rounds(&roster_of(n), &config(courts, FallbackPolicy::LeaveCourtIdle)).unwrap();
            assert!(rounds.iter().all(|r| !has_repeat_player(r)), "n={n} courts={courts}");
        }
    }
}

#[test]
fn double_book_keeps_ceil_round_count() {
    for n in 2..10 {
        for courts in 1..4 {
            let total = n * (n - 1) / 2;
            let rounds =
                generate_rounds(&roster_of(n), &config(courts, FallbackPolicy::DoubleBook)).unwrap();
            assert_eq!(rounds.len(), total.div_ceil(courts as usize));
        }
    }
}

#[test]
fn small_roster_triggers_double_booking_only_under_fallback() {
    // 3 players, 2 courts: only one match fits per round without a repeat.
    let players = roster(&["A", "B", "C"]);

    let doubled = generate_rounds(&players, &config(2, FallbackPolicy::DoubleBook)).unwrap();
    assert_eq!(doubled.len(), 2);
    assert!(has_repeat_player(&doubled[0]));

    let idle = generate_rounds(&players, &config(2, FallbackPolicy::LeaveCourtIdle)).unwrap();
    assert_eq!(idle.len(), 3);
    assert!(idle.iter().all(|r| r.matches.len() == 1 && !has_repeat_player(r)));
}

#[test]
fn double_book_can_repeat_players_on_large_rosters() {
    // 7 players on 3 courts is well above 2 players per court, yet the greedy pass still
    // runs out of free pairs in some rounds.
    let players = roster_of(7);
    let doubled = generate_rounds(&players, &config(3, FallbackPolicy::DoubleBook)).unwrap();
    assert_eq!(doubled.len(), 7);
    assert!(doubled.iter().any(has_repeat_player));

    let idle = generate_rounds(&players, &config(3, FallbackPolicy::LeaveCourtIdle)).unwrap();
    assert!(idle.iter().all(|r| !has_repeat_player(r)));
}

#[test]
fn only_first_round_starts_active() {
    let rounds = generate_rounds(&roster_of(6), &TournamentConfig::default()).unwrap();
    assert!(rounds.len() > 1);
    assert!(rounds[0].is_active);
    assert_eq!(rounds[0].status, RoundStatus::InProgress);
    for r in &rounds[1..] {
        assert!(!r.is_active);
        assert_eq!(r.status, RoundStatus::Pending);
    }
}

#[test]
fn balancing_prefers_players_with_fewer_matches() {
    // 5 players, 1 court: after AB, the next pick must avoid both A and B.
    let rounds = generate_rounds(&roster(&["A", "B", "C", "D", "E"]), &config(1, FallbackPolicy::default()))
        .unwrap();
    let second = &rounds[1].matches[0];
    assert_eq!(
        (second.player1.as_str(), second.player2.as_str()),
        ("C", "D")
    );
}
