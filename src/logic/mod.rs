//! Tournament business logic: pairing, scheduling, scoring, standings.

mod matchups;
mod roster;
mod scheduler;
mod scoring;
mod setup;
mod standings;

pub use matchups::enumerate_matchups;
pub use roster::import_roster_csv;
pub use scheduler::{generate_rounds, schedule_rounds};
pub use scoring::{complete_match, update_match_score};
pub use setup::{shuffle_roster, start_tournament};
pub use standings::{
    compare_standings, rank_standings, tournament_standings, RankedStanding, Standing,
};
