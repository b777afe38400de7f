//! Application state: every tournament, mutated only through `dispatch`.

use crate::logic::{
    complete_match, import_roster_csv, shuffle_roster, start_tournament, update_match_score,
};
use crate::models::{
    FallbackPolicy, MatchId, PlayerId, Tournament, TournamentConfig, TournamentError,
    TournamentId, TournamentState,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A requested change to the store.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Create {
        name: String,
        #[serde(default)]
        config: Option<TournamentConfig>,
    },
    Delete {
        id: TournamentId,
    },
    AddPlayer {
        id: TournamentId,
        player_id: PlayerId,
        name: String,
    },
    AddBot {
        id: TournamentId,
    },
    RemovePlayer {
        id: TournamentId,
        player_id: PlayerId,
    },
    /// CSV text, see `import_roster_csv`.
    ImportRoster {
        id: TournamentId,
        csv: String,
    },
    SetCourts {
        id: TournamentId,
        courts_per_round: u32,
    },
    SetFallback {
        id: TournamentId,
        fallback: FallbackPolicy,
    },
    Shuffle {
        id: TournamentId,
    },
    Start {
        id: TournamentId,
    },
    Restart {
        id: TournamentId,
    },
    UpdateScore {
        id: TournamentId,
        match_id: MatchId,
        score1: u32,
        score2: u32,
    },
    CompleteMatch {
        id: TournamentId,
        match_id: MatchId,
    },
}

/// What a successful dispatch changed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Created { id: TournamentId },
    Deleted { id: TournamentId },
    RosterChanged { id: TournamentId, players: usize, rounds: usize },
    ConfigChanged { id: TournamentId, rounds: usize },
    Started { id: TournamentId },
    Restarted { id: TournamentId },
    ScoreUpdated { id: TournamentId, match_id: MatchId },
    MatchCompleted { id: TournamentId, match_id: MatchId, tournament_completed: bool },
}

/// Idle time after which tournaments are purged, unless configured otherwise.
pub const DEFAULT_INACTIVITY_HOURS: i64 = 12;

/// Idle window for `hours`, falling back to the default when the value is not positive
/// or too large to represent.
pub fn inactivity_window(hours: i64) -> Duration {
    Some(hours)
        .filter(|h| *h > 0)
        .and_then(Duration::try_hours)
        .unwrap_or_else(|| Duration::hours(DEFAULT_INACTIVITY_HOURS))
}

/// In-memory store of tournaments by id.
#[derive(Debug, Default)]
pub struct TournamentStore {
    tournaments: HashMap<TournamentId, Tournament>,
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    /// All tournaments, newest first.
    pub fn list(&self) -> Vec<&Tournament> {
        let mut all: Vec<&Tournament> = self.tournaments.values().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    fn get_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, TournamentError> {
        self.tournaments
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    /// Apply one action. On success the tournament's `updated_at` is refreshed.
    pub fn dispatch(&mut self, action: Action) -> Result<Event, TournamentError> {
        let event = match action {
            Action::Create { name, config } => {
                let t = Tournament::new(name, config.unwrap_or_default())?;
                let id = t.id;
                log::info!("Created tournament {} ({})", id, t.name);
                self.tournaments.insert(id, t);
                Event::Created { id }
            }
            Action::Delete { id } => {
                self.tournaments
                    .remove(&id)
                    .ok_or(TournamentError::TournamentNotFound(id))?;
                log::info!("Deleted tournament {}", id);
                Event::Deleted { id }
            }
            Action::AddPlayer { id, player_id, name } => {
                let t = self.get_mut(id)?;
                t.add_player(player_id, name)?;
                roster_changed(t)
            }
            Action::AddBot { id } => {
                let t = self.get_mut(id)?;
                t.add_bot()?;
                roster_changed(t)
            }
            Action::RemovePlayer { id, player_id } => {
                let t = self.get_mut(id)?;
                t.remove_player(&player_id)?;
                roster_changed(t)
            }
            Action::ImportRoster { id, csv } => {
                let players = import_roster_csv(csv.as_bytes())?;
                let t = self.get_mut(id)?;
                t.add_players(players)?;
                roster_changed(t)
            }
            Action::SetCourts {
                id,
                courts_per_round,
            } => {
                let t = self.get_mut(id)?;
                t.set_courts_per_round(courts_per_round)?;
                Event::ConfigChanged {
                    id,
                    rounds: t.rounds.len(),
                }
            }
            Action::SetFallback { id, fallback } => {
                let t = self.get_mut(id)?;
                t.set_fallback_policy(fallback)?;
                Event::ConfigChanged {
                    id,
                    rounds: t.rounds.len(),
                }
            }
            Action::Shuffle { id } => {
                let t = self.get_mut(id)?;
                shuffle_roster(t, &mut rand::thread_rng())?;
                roster_changed(t)
            }
            Action::Start { id } => {
                start_tournament(self.get_mut(id)?)?;
                Event::Started { id }
            }
            Action::Restart { id } => {
                self.get_mut(id)?.restart_tournament()?;
                Event::Restarted { id }
            }
            Action::UpdateScore {
                id,
                match_id,
                score1,
                score2,
            } => {
                update_match_score(self.get_mut(id)?, match_id, score1, score2)?;
                Event::ScoreUpdated { id, match_id }
            }
            Action::CompleteMatch { id, match_id } => {
                let t = self.get_mut(id)?;
                complete_match(t, match_id)?;
                Event::MatchCompleted {
                    id,
                    match_id,
                    tournament_completed: t.state == TournamentState::Completed,
                }
            }
        };

        if let Some(id) = event_tournament(&event) {
            if let Some(t) = self.tournaments.get_mut(&id) {
                t.updated_at = Utc::now();
            }
        }
        Ok(event)
    }

    /// Remove tournaments not updated within `max_idle` of `now`. Returns how many were removed.
    pub fn purge_inactive(&mut self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let before = self.tournaments.len();
        self.tournaments
            .retain(|_, t| now.signed_duration_since(t.updated_at) < max_idle);
        before - self.tournaments.len()
    }

    /// Refresh a tournament's activity time without changing it (e.g. on read).
    pub fn touch(&mut self, id: TournamentId) -> Result<(), TournamentError> {
        self.get_mut(id)?.updated_at = Utc::now();
        Ok(())
    }
}

fn roster_changed(t: &Tournament) -> Event {
    Event::RosterChanged {
        id: t.id,
        players: t.players.len(),
        rounds: t.rounds.len(),
    }
}

fn event_tournament(event: &Event) -> Option<TournamentId> {
    match *event {
        Event::Deleted { .. } => None,
        Event::Created { id }
        | Event::RosterChanged { id, .. }
        | Event::ConfigChanged { id, .. }
        | Event::Started { id }
        | Event::Restarted { id }
        | Event::ScoreUpdated { id, .. }
        | Event::MatchCompleted { id, .. } => Some(id),
    }
}
