//! Tournament, TournamentConfig, and TournamentState.

use crate::logic::generate_rounds;
use crate::models::game::{Match, MatchId, Round};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Court count must be at least 1.
    InvalidCourtCount(u32),
    /// A player with this id is already on the roster.
    DuplicatePlayer(PlayerId),
    /// Player names must not be blank.
    EmptyPlayerName,
    PlayerNotFound(PlayerId),
    MatchNotFound(MatchId),
    TournamentNotFound(TournamentId),
    /// Need at least 2 players to start.
    NotEnoughPlayers,
    /// A match cannot be completed while the scores are level.
    TiedScore,
    MatchAlreadyCompleted(MatchId),
    /// Completing the match would overflow this player's point totals.
    ScoreOverflow(PlayerId),
    /// The match belongs to a round that is not currently being played.
    RoundNotActive(u32),
    /// Roster CSV could not be read.
    RosterImport(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::InvalidCourtCount(n) => {
                write!(f, "Courts per round must be at least 1 (got {})", n)
            }
            TournamentError::DuplicatePlayer(id) => write!(f, "Player {} is already on the roster", id),
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::TournamentNotFound(_) => write!(f, "No tournament"),
            TournamentError::NotEnoughPlayers => write!(f, "Need at least 2 players to start"),
            TournamentError::TiedScore => write!(f, "Scores are tied; a match needs a winner"),
            TournamentError::MatchAlreadyCompleted(_) => write!(f, "Match is already completed"),
            TournamentError::ScoreOverflow(id) => {
                write!(f, "Score would overflow point totals of player {}", id)
            }
            TournamentError::RoundNotActive(n) => write!(f, "Round {} is not the active round", n),
            TournamentError::RosterImport(msg) => write!(f, "Could not import roster: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// What the scheduler does when no remaining match fits the current round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Close the round early and leave courts idle; never double-book a player.
    #[default]
    LeaveCourtIdle,
    /// Fill the court with the next pooled match even if a player already plays this round.
    /// Keeps the round count at `ceil(matches / courts)`. The greedy pick can run out of
    /// free pairs late in a schedule at any roster size, so large rosters
    /// (e.g. 7 players on 3 courts) are double-booked too, not only small ones.
    DoubleBook,
}

/// Scheduling settings for a tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub courts_per_round: u32,
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            courts_per_round: 2,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl TournamentConfig {
    pub fn new(courts_per_round: u32, fallback: FallbackPolicy) -> Result<Self, TournamentError> {
        let config = Self {
            courts_per_round,
            fallback,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.courts_per_round < 1 {
            return Err(TournamentError::InvalidCourtCount(self.courts_per_round));
        }
        Ok(())
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Editing roster and courts; the schedule is a preview regenerated on every change.
    #[default]
    Setup,
    /// Rounds are being played; scores can be entered for the active round.
    InProgress,
    /// Every match has been completed.
    Completed,
}

/// Full tournament state: roster, schedule, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Roster, in pairing order.
    pub players: Vec<Player>,
    pub config: TournamentConfig,
    /// Derived from `players` and `config`; rebuilt from scratch whenever either changes.
    pub rounds: Vec<Round>,
    pub state: TournamentState,
}

impl Tournament {
    /// Create a new tournament in Setup state with no players.
    pub fn new(name: impl Into<String>, config: TournamentConfig) -> Result<Self, TournamentError> {
        config.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            players: Vec::new(),
            config,
            rounds: Vec::new(),
            state: TournamentState::Setup,
        })
    }

    /// Create a tournament with an initial roster. Still in Setup until started.
    pub fn with_players(
        name: impl Into<String>,
        players: Vec<Player>,
        config: TournamentConfig,
    ) -> Result<Self, TournamentError> {
        let mut t = Self::new(name, config)?;
        t.add_players(players)?;
        Ok(t)
    }

    /// Roster ids in pairing order.
    pub fn roster(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn get_player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == *id)
    }

    pub fn get_player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == *id)
    }

    /// Look up a match in any round.
    pub fn find_match(&self, match_id: MatchId) -> Option<&Match> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .find(|m| m.id == match_id)
    }

    /// The round currently being played, if any.
    pub fn active_round(&self) -> Option<&Round> {
        self.rounds.iter().find(|r| r.is_active)
    }

    /// Rebuild all rounds from the current roster and config.
    pub fn regenerate_schedule(&mut self) -> Result<(), TournamentError> {
        self.rounds = generate_rounds(&self.roster(), &self.config)?;
        log::debug!(
            "Tournament {}: regenerated {} round(s) for {} player(s)",
            self.id,
            self.rounds.len(),
            self.players.len()
        );
        Ok(())
    }

    /// Add a player (Setup only). Ids must be unique; names must not be blank.
    pub fn add_player(
        &mut self,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> Result<(), TournamentError> {
        let id = id.into();
        let name = name.into();
        self.push_player(Player::new(id, name))
    }

    /// Add a bot placeholder (Setup only). Returns the synthesized id.
    pub fn add_bot(&mut self) -> Result<PlayerId, TournamentError> {
        // Numbered past the highest existing bot so names stay unique after removals.
        let n = self
            .players
            .iter()
            .filter(|p| p.is_bot)
            .filter_map(|p| p.name.strip_prefix("Bot ")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let bot = Player::bot(format!("Bot {}", n));
        let id = bot.id.clone();
        self.push_player(bot)?;
        Ok(id)
    }

    /// Append many players at once (Setup only); the schedule is rebuilt once at the end.
    pub fn add_players(&mut self, players: Vec<Player>) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let players: Vec<Player> = players.into_iter().map(trim_name).collect();
        for p in &players {
            self.check_new_player(p)?;
        }
        let mut seen = std::collections::HashSet::new();
        for p in &players {
            if !seen.insert(&p.id) {
                return Err(TournamentError::DuplicatePlayer(p.id.clone()));
            }
        }
        self.players.extend(players);
        self.regenerate_schedule()
    }

    fn push_player(&mut self, player: Player) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let player = trim_name(player);
        self.check_new_player(&player)?;
        self.players.push(player);
        self.regenerate_schedule()
    }

    fn check_new_player(&self, player: &Player) -> Result<(), TournamentError> {
        if player.name.trim().is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(TournamentError::DuplicatePlayer(player.id.clone()));
        }
        Ok(())
    }

    /// Remove a player by id (Setup only).
    pub fn remove_player(&mut self, player_id: &PlayerId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == *player_id)
            .ok_or_else(|| TournamentError::PlayerNotFound(player_id.clone()))?;
        self.players.remove(idx);
        self.regenerate_schedule()
    }

    /// Set courts per round (Setup only).
    pub fn set_courts_per_round(&mut self, courts: u32) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let config = TournamentConfig::new(courts, self.config.fallback)?;
        self.config = config;
        self.regenerate_schedule()
    }

    /// Set the scheduler fallback policy (Setup only).
    pub fn set_fallback_policy(&mut self, fallback: FallbackPolicy) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.config.fallback = fallback;
        self.regenerate_schedule()
    }

    /// Restart: back to Setup with the same roster. Counters and scores are cleared.
    pub fn restart_tournament(&mut self) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        for p in &mut self.players {
            p.reset_counters();
        }
        self.state = TournamentState::Setup;
        self.regenerate_schedule()
    }
}

fn trim_name(mut player: Player) -> Player {
    player.name = player.name.trim().to_string();
    player
}
