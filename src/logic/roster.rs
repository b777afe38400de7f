//! Roster import from CSV (`id,name[,bot]` with a header row).

use crate::models::{Player, PlayerId, TournamentError};
use serde::Deserialize;
use std::io::Read;

#[derive(Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    #[serde(default)]
    bot: bool,
}

/// Read players from CSV. Blank ids or names are rejected with the offending line number.
pub fn import_roster_csv<R: Read>(reader: R) -> Result<Vec<Player>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut players = Vec::new();
    for (i, row) in rdr.deserialize::<RosterRow>().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        let row = row.map_err(|e| TournamentError::RosterImport(e.to_string()))?;
        if row.id.is_empty() {
            return Err(TournamentError::RosterImport(format!("line {}: empty id", line)));
        }
        if row.name.is_empty() {
            return Err(TournamentError::RosterImport(format!("line {}: empty name", line)));
        }
        let mut player = Player::new(PlayerId::new(row.id), row.name);
        player.is_bot = row.bot;
        players.push(player);
    }
    Ok(players)
}
