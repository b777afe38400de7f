//! Standings: rank players by point differential, then wins, losses, and raw points.

use crate::models::{Player, PlayerId, Tournament};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Aggregate counters for one player (for ranking / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub points_won: u32,
    pub points_lost: u32,
}

impl Standing {
    pub fn from_player(p: &Player) -> Self {
        Self {
            player_id: p.id.clone(),
            name: p.name.clone(),
            matches_won: p.matches_won,
            matches_lost: p.matches_lost,
            points_won: p.points_won,
            points_lost: p.points_lost,
        }
    }

    pub fn point_differential(&self) -> i64 {
        i64::from(self.points_won) - i64::from(self.points_lost)
    }
}

/// A standing with its displayed rank (1-based; exact ties share a rank).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedStanding {
    pub rank: usize,
    #[serde(flatten)]
    pub standing: Standing,
}

/// Ranking order: `Less` means `a` ranks above `b`.
///
/// Keys, in order: higher point differential, more matches won, fewer matches lost,
/// more points won, fewer points lost.
pub fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.point_differential()
        .cmp(&a.point_differential())
        .then_with(|| b.matches_won.cmp(&a.matches_won))
        .then_with(|| a.matches_lost.cmp(&b.matches_lost))
        .then_with(|| b.points_won.cmp(&a.points_won))
        .then_with(|| a.points_lost.cmp(&b.points_lost))
}

/// Sort and rank. Entries tied on every key keep input order and share the rank of the
/// first of them; the next distinct entry takes its own position (1, 1, 3).
pub fn rank_standings(mut standings: Vec<Standing>) -> Vec<RankedStanding> {
    standings.sort_by(compare_standings);
    let mut ranked: Vec<RankedStanding> = Vec::with_capacity(standings.len());
    for (idx, standing) in standings.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if compare_standings(&prev.standing, &standing) == Ordering::Equal => {
                prev.rank
            }
            _ => idx + 1,
        };
        ranked.push(RankedStanding { rank, standing });
    }
    ranked
}

/// Current ranked standings of every rostered player.
pub fn tournament_standings(tournament: &Tournament) -> Vec<RankedStanding> {
    rank_standings(tournament.players.iter().map(Standing::from_player).collect())
}
