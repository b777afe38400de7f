//! Player and PlayerId data structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a participant (real user id or synthetic bot id).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh placeholder id for a bot (`bot-<uuid>`).
    pub fn bot() -> Self {
        Self(format!("bot-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A player on the tournament roster, with the aggregate counters standings are built from.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Synthetic placeholder filling an empty slot.
    pub is_bot: bool,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub points_won: u32,
    pub points_lost: u32,
}

impl Player {
    /// Create a new player. Counters start at zero.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bot: false,
            matches_won: 0,
            matches_lost: 0,
            points_won: 0,
            points_lost: 0,
        }
    }

    /// Create a bot placeholder with a freshly synthesized id.
    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            is_bot: true,
            ..Self::new(PlayerId::bot(), name)
        }
    }

    /// False if recording these points would overflow the running totals.
    pub fn can_add_points(&self, points_for: u32, points_against: u32) -> bool {
        self.points_won.checked_add(points_for).is_some()
            && self.points_lost.checked_add(points_against).is_some()
    }

    /// Record a won match and the points scored for and against.
    pub fn add_win(&mut self, points_for: u32, points_against: u32) {
        self.matches_won += 1;
        self.points_won += points_for;
        self.points_lost += points_against;
    }

    /// Record a lost match and the points scored for and against.
    pub fn add_loss(&mut self, points_for: u32, points_against: u32) {
        self.matches_lost += 1;
        self.points_won += points_for;
        self.points_lost += points_against;
    }

    pub fn reset_counters(&mut self) {
        self.matches_won = 0;
        self.matches_lost = 0;
        self.points_won = 0;
        self.points_lost = 0;
    }
}
