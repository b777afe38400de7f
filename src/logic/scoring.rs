//! Score entry: update scores, complete matches, and advance the active round.

use crate::models::{
    MatchId, MatchStatus, RoundStatus, Tournament, TournamentError, TournamentState,
};
use chrono::Utc;

/// (round index, match index) of a match in the active round.
fn locate_active_match(
    tournament: &Tournament,
    match_id: MatchId,
) -> Result<(usize, usize), TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(TournamentError::InvalidState);
    }
    let (ri, mi) = tournament
        .rounds
        .iter()
        .enumerate()
        .find_map(|(ri, r)| {
            r.matches
                .iter()
                .position(|m| m.id == match_id)
                .map(|mi| (ri, mi))
        })
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let round = &tournament.rounds[ri];
    if !round.is_active {
        return Err(TournamentError::RoundNotActive(round.round_number));
    }
    if round.matches[mi].status == MatchStatus::Completed {
        return Err(TournamentError::MatchAlreadyCompleted(match_id));
    }
    Ok((ri, mi))
}

/// Set the running score of a match in the active round; the match becomes in progress.
pub fn update_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score1: u32,
    score2: u32,
) -> Result<(), TournamentError> {
    let (ri, mi) = locate_active_match(tournament, match_id)?;
    let m = &mut tournament.rounds[ri].matches[mi];
    m.score1 = score1;
    m.score2 = score2;
    m.status = MatchStatus::InProgress;
    Ok(())
}

/// Complete a match with its current score.
///
/// The higher score wins; both players' aggregate counters are updated. When this was the
/// last open match of the active round, the next round is activated (or the tournament
/// completes after the final round).
pub fn complete_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    let (ri, mi) = locate_active_match(tournament, match_id)?;
    let m = &tournament.rounds[ri].matches[mi];
    if m.score1 == m.score2 {
        return Err(TournamentError::TiedScore);
    }
    let (winner, loser, winner_score, loser_score) = if m.score1 > m.score2 {
        (m.player1.clone(), m.player2.clone(), m.score1, m.score2)
    } else {
        (m.player2.clone(), m.player1.clone(), m.score2, m.score1)
    };

    // Both players must exist and have room for the points before anything is mutated.
    for (pid, points_for, points_against) in [
        (&winner, winner_score, loser_score),
        (&loser, loser_score, winner_score),
    ] {
        let p = tournament
            .get_player(pid)
            .ok_or_else(|| TournamentError::PlayerNotFound(pid.clone()))?;
        if !p.can_add_points(points_for, points_against) {
            return Err(TournamentError::ScoreOverflow(pid.clone()));
        }
    }
    if let Some(p) = tournament.get_player_mut(&winner) {
        p.add_win(winner_score, loser_score);
    }
    if let Some(p) = tournament.get_player_mut(&loser) {
        p.add_loss(loser_score, winner_score);
    }

    let m = &mut tournament.rounds[ri].matches[mi];
    m.status = MatchStatus::Completed;
    m.winner = Some(winner);
    m.completed_at = Some(Utc::now());

    if tournament.rounds[ri].is_finished() {
        advance_round(tournament, ri);
    }
    Ok(())
}

/// Close round `ri` and activate the next one, or complete the tournament.
fn advance_round(tournament: &mut Tournament, ri: usize) {
    let round = &mut tournament.rounds[ri];
    round.status = RoundStatus::Completed;
    round.is_active = false;
    log::info!(
        "Tournament {}: round {} completed",
        tournament.id,
        round.round_number
    );

    match tournament.rounds.get_mut(ri + 1) {
        Some(next) => {
            next.status = RoundStatus::InProgress;
            next.is_active = true;
        }
        None => {
            tournament.state = TournamentState::Completed;
            log::info!("Tournament {}: all rounds completed", tournament.id);
        }
    }
}
