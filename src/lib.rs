//! Racquet-sport round-robin organizer: library with models, scheduling, and standings.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    compare_standings, complete_match, enumerate_matchups, generate_rounds, import_roster_csv,
    rank_standings, schedule_rounds, shuffle_roster, start_tournament, tournament_standings,
    update_match_score, RankedStanding, Standing,
};
pub use models::{
    FallbackPolicy, Match, MatchId, MatchStatus, Player, PlayerId, Round, RoundStatus, Tournament,
    TournamentConfig, TournamentError, TournamentId, TournamentState,
};
pub use store::{inactivity_window, Action, Event, TournamentStore, DEFAULT_INACTIVITY_HOURS};
