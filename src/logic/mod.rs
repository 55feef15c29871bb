//! Tournament business logic: setup, round-robin pairing, standings, progression.

mod pairing;
mod progression;
mod roster;
mod setup;
mod standings;

pub use pairing::generate_matches;
pub use progression::{
    apply_event, parse_score, submit_final_result, submit_match_result, TournamentEvent,
};
pub use roster::{parse_player_names, standings_to_csv};
pub use setup::{create_tournament, form_teams, validate_selection, TeamFormation};
pub use standings::{compute_standings, rank_order};
