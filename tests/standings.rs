//! Integration tests for the standings calculator.

use badminton_tournament_web::{compute_standings, Match, Player, Team, POINTS_PER_WIN};
use uuid::Uuid;

fn team(name: &str) -> Team {
    let club = Uuid::new_v4();
    Team::new(
        Player::new(format!("{name}1"), club),
        Player::new(format!("{name}2"), club),
    )
    .unwrap()
}

fn played(a: &Team, b: &Team, score_a: u32, score_b: u32) -> Match {
    let mut m = Match::new(a.clone(), b.clone());
    m.record(score_a, score_b);
    m
}

#[test]
fn accumulates_wins_points_and_difference() {
    let (a, b, c) = (team("A"), team("B"), team("C"));
    let matches = vec![played(&a, &b, 21, 15), played(&a, &c, 21, 19), played(&b, &c, 10, 21)];
    let standings = compute_standings(&[a.clone(), b.clone(), c.clone()], &matches);

    let names: Vec<_> = standings.iter().map(|s| s.team.id).collect();
    assert_eq!(names, vec![a.id, c.id, b.id]);

    let top = &standings[0];
    assert_eq!((top.played, top.wins, top.losses, top.points), (2, 2, 0, 4));
    assert_eq!((top.points_for, top.points_against, top.points_difference), (42, 34, 8));

    let last = &standings[2];
    assert_eq!((last.played, last.wins, last.losses, last.points), (2, 0, 2, 0));
    assert_eq!(last.points_difference, 25 - 42);
}

#[test]
fn pending_matches_are_ignored() {
    let (a, b) = (team("A"), team("B"));
    let matches = vec![Match::new(a.clone(), b.clone())];
    let standings = compute_standings(&[a, b], &matches);
    assert!(standings.iter().all(|s| s.played == 0 && s.points == 0));
}

#[test]
fn total_points_are_two_per_completed_match() {
    let teams: Vec<_> = ["A", "B", "C", "D"].iter().map(|n| team(n)).collect();
    let mut matches = badminton_tournament_web::generate_matches(&teams);
    for (i, m) in matches.iter_mut().enumerate().take(4) {
        m.record(21, (i as u32) * 5);
    }
    let completed = matches.iter().filter(|m| m.is_completed()).count() as u32;
    let total: u32 = compute_standings(&teams, &matches).iter().map(|s| s.points).sum();
    assert_eq!(total, POINTS_PER_WIN * completed);
}

#[test]
fn points_difference_breaks_ties() {
    let (a, b, c, d) = (team("A"), team("B"), team("C"), team("D"));
    // A and C both win once; C by more.
    let matches = vec![played(&a, &b, 21, 19), played(&c, &d, 21, 5)];
    let standings = compute_standings(&[a.clone(), b.clone(), c.clone(), d.clone()], &matches);
    assert_eq!(standings[0].team.id, c.id);
    assert_eq!(standings[1].team.id, a.id);
}

#[test]
fn full_ties_keep_input_order() {
    let teams: Vec<_> = ["A", "B", "C"].iter().map(|n| team(n)).collect();
    let standings = compute_standings(&teams, &[]);
    let ids: Vec<_> = standings.iter().map(|s| s.team.id).collect();
    assert_eq!(ids, teams.iter().map(|t| t.id).collect::<Vec<_>>());
}

#[test]
fn ranking_is_sorted_by_points_then_difference() {
    let teams: Vec<_> = ["A", "B", "C", "D", "E", "F"].iter().map(|n| team(n)).collect();
    let mut matches = badminton_tournament_web::generate_matches(&teams);
    for (i, m) in matches.iter_mut().enumerate() {
        let i = i as u32;
        m.record((i * 7) % 22, (i * 11) % 23);
    }
    let standings = compute_standings(&teams, &matches);
    for pair in standings.windows(2) {
        let (x, y) = (&pair[0], &pair[1]);
        assert!(
            x.points > y.points || (x.points == y.points && x.points_difference >= y.points_difference)
        );
    }
}

#[test]
fn unknown_teams_are_skipped() {
    let (a, b, stranger) = (team("A"), team("B"), team("X"));
    let matches = vec![played(&a, &stranger, 21, 3), played(&a, &b, 21, 10)];
    let standings = compute_standings(&[a.clone(), b.clone()], &matches);
    assert_eq!(standings.len(), 2);
    let a_row = standings.iter().find(|s| s.team.id == a.id).unwrap();
    assert_eq!((a_row.played, a_row.wins, a_row.points_for), (1, 1, 21));
}

#[test]
fn maximum_scores_accumulate_without_wrapping() {
    let (a, b, c) = (team("A"), team("B"), team("C"));
    let matches = vec![
        played(&a, &b, u32::MAX, 0),
        played(&a, &c, u32::MAX, 0),
        played(&b, &c, 0, u32::MAX),
    ];
    let standings = compute_standings(&[a.clone(), b.clone(), c.clone()], &matches);

    let top = &standings[0];
    assert_eq!(top.team.id, a.id);
    assert_eq!(top.points_for, 2 * u64::from(u32::MAX));
    assert_eq!(top.points_difference, 2 * i64::from(u32::MAX));

    let last = &standings[2];
    assert_eq!(last.team.id, b.id);
    assert_eq!(last.points_against, 2 * u64::from(u32::MAX));
    assert_eq!(last.points_difference, -2 * i64::from(u32::MAX));
}
