//! CSV import of player names and CSV export of standings.

use crate::models::{LeaderboardStat, TournamentError};
use serde::{Deserialize, Serialize};

const STANDINGS_HEADER: [&str; 9] = [
    "rank",
    "team",
    "played",
    "wins",
    "losses",
    "points",
    "points_for",
    "points_against",
    "points_difference",
];

#[derive(Deserialize)]
struct RosterRow {
    name: String,
}

#[derive(Serialize)]
struct StandingsRow<'a> {
    rank: usize,
    team: &'a str,
    played: u32,
    wins: u32,
    losses: u32,
    points: u32,
    points_for: u64,
    points_against: u64,
    points_difference: i64,
}

/// Parse player names from CSV with a `name` header. Blank names are skipped.
pub fn parse_player_names(input: &str) -> Result<Vec<String>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input.as_bytes());
    let mut names = Vec::new();
    for row in reader.deserialize::<RosterRow>() {
        let row = row.map_err(|e| TournamentError::InvalidInput(format!("bad roster CSV: {e}")))?;
        if !row.name.is_empty() {
            names.push(row.name);
        }
    }
    Ok(names)
}

/// Render ranked standings as CSV (rank starts at 1). The header is always written.
pub fn standings_to_csv(standings: &[LeaderboardStat]) -> Result<String, TournamentError> {
    let to_input = |e: csv::Error| TournamentError::InvalidInput(format!("cannot write CSV: {e}"));
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(STANDINGS_HEADER).map_err(to_input)?;
    for (i, s) in standings.iter().enumerate() {
        writer
            .serialize(StandingsRow {
                rank: i + 1,
                team: &s.team.name,
                played: s.played,
                wins: s.wins,
                losses: s.losses,
                points: s.points,
                points_for: s.points_for,
                points_against: s.points_against,
                points_difference: s.points_difference,
            })
            .map_err(to_input)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::InvalidInput(format!("cannot write CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::InvalidInput(format!("cannot write CSV: {e}")))
}
