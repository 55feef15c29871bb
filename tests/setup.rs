//! Integration tests for team formation and tournament creation.

use badminton_tournament_web::{
    create_tournament, form_teams, Player, TeamFormation, TournamentError, TournamentStatus,
};
use badminton_tournament_web::logic::validate_selection;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use uuid::Uuid;

fn roster(n: usize, club: Uuid) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"), club)).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn random_teams_use_every_player_once() {
    let club = Uuid::new_v4();
    let players = roster(8, club);
    let teams = form_teams(&players, &TeamFormation::Random, &mut rng()).unwrap();
    assert_eq!(teams.len(), 4);
    let used: HashSet<_> = teams.iter().flat_map(|t| t.players.iter().map(|p| p.id)).collect();
    assert_eq!(used.len(), 8);
    for t in &teams {
        assert_ne!(t.players[0].id, t.players[1].id);
        assert_eq!(t.name, format!("{} / {}", t.players[0].name, t.players[1].name));
    }
}

#[test]
fn manual_teams_follow_the_given_pairs() {
    let club = Uuid::new_v4();
    let p = roster(4, club);
    let pairs = vec![(p[0].id, p[3].id), (p[1].id, p[2].id)];
    let teams = form_teams(&p, &TeamFormation::Manual(pairs), &mut rng()).unwrap();
    assert_eq!(teams[0].name, "P0 / P3");
    assert_eq!(teams[1].name, "P1 / P2");
}

#[test]
fn manual_teams_reject_bad_pairs() {
    let club = Uuid::new_v4();
    let p = roster(4, club);
    let bad = [
        // player with themselves
        vec![(p[0].id, p[0].id), (p[1].id, p[2].id)],
        // same player twice across teams
        vec![(p[0].id, p[1].id), (p[1].id, p[2].id)],
        // too few teams
        vec![(p[0].id, p[1].id)],
        // player outside the selection
        vec![(p[0].id, p[1].id), (p[2].id, Uuid::new_v4())],
    ];
    for pairs in bad {
        assert!(matches!(
            form_teams(&p, &TeamFormation::Manual(pairs), &mut rng()),
            Err(TournamentError::InvalidInput(_))
        ));
    }
}

#[test]
fn selection_must_be_even_distinct_and_from_club() {
    let club = Uuid::new_v4();
    assert!(validate_selection(&roster(4, club), club).is_ok());
    assert!(validate_selection(&roster(0, club), club).is_err());
    assert!(validate_selection(&roster(3, club), club).is_err());

    let mut dup = roster(3, club);
    dup.push(dup[0].clone());
    assert!(validate_selection(&dup, club).is_err());

    let mut foreign = roster(3, club);
    foreign.push(Player::new("Guest", Uuid::new_v4()));
    assert!(validate_selection(&foreign, club).is_err());
}

#[test]
fn created_tournament_is_in_progress_with_schedule() {
    let club = Uuid::new_v4();
    let t = create_tournament("  Summer Cup ", club, roster(8, club), &TeamFormation::Random, &mut rng()).unwrap();
    assert_eq!(t.name, "Summer Cup");
    assert_eq!(t.club_id, club);
    assert_eq!(t.status, TournamentStatus::InProgress);
    assert_eq!(t.players.len(), 8);
    assert_eq!(t.teams.len(), 4);
    assert_eq!(t.matches.len(), 6);
    assert!(t.final_match.is_none());
    assert!(t.winner_id.is_none() && t.runner_up_id.is_none());
}

#[test]
fn empty_name_is_rejected() {
    let club = Uuid::new_v4();
    assert!(matches!(
        create_tournament("   ", club, roster(4, club), &TeamFormation::Random, &mut rng()),
        Err(TournamentError::InvalidInput(_))
    ));
}
