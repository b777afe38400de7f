//! Match, MatchStatus, and Round for singles round-robin play.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Progress of a single match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A single match between two distinct players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub score1: u32,
    pub score2: u32,
    pub status: MatchStatus,
    /// Set only once the match is completed.
    pub winner: Option<PlayerId>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(player1: PlayerId, player2: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            player1,
            player2,
            score1: 0,
            score2: 0,
            status: MatchStatus::Pending,
            winner: None,
            completed_at: None,
        }
    }
}

/// Progress of a round.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// One scheduled round: at most `courts_per_round` matches played side by side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based.
    pub round_number: u32,
    pub matches: Vec<Match>,
    pub status: RoundStatus,
    pub is_active: bool,
}

impl Round {
    /// Player ids appearing in this round, in match order (duplicates kept).
    pub fn player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.matches
            .iter()
            .flat_map(|m| [&m.player1, &m.player2])
    }

    pub fn is_finished(&self) -> bool {
        self.matches.iter().all(|m| m.status == MatchStatus::Completed)
    }
}
