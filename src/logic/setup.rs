//! Setup phase: roster shuffling and starting the tournament.

use crate::models::{Tournament, TournamentError, TournamentState};
use rand::seq::SliceRandom;
use rand::Rng;

/// Start the tournament: require 2 players; the current schedule preview becomes the real one.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    if tournament.players.len() < 2 {
        return Err(TournamentError::NotEnoughPlayers);
    }
    // Rebuild so a stale preview can never leak into play.
    tournament.regenerate_schedule()?;
    tournament.state = TournamentState::InProgress;
    log::info!(
        "Tournament {} started: {} players, {} rounds on {} court(s)",
        tournament.id,
        tournament.players.len(),
        tournament.rounds.len(),
        tournament.config.courts_per_round
    );
    Ok(())
}

/// Shuffle the roster order (Setup only) and rebuild the schedule from it.
pub fn shuffle_roster<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    tournament.players.shuffle(rng);
    tournament.regenerate_schedule()
}
