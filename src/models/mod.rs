//! Data structures for the round-robin organizer: players, matches, rounds, tournament state.

mod game;
mod player;
mod tournament;

pub use game::{Match, MatchId, MatchStatus, Round, RoundStatus};
pub use player::{Player, PlayerId};
pub use tournament::{
    FallbackPolicy, Tournament, TournamentConfig, TournamentError, TournamentId, TournamentState,
};
