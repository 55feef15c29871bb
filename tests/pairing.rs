//! Integration tests for round-robin match generation.

use badminton_tournament_web::{generate_matches, MatchStatus, Player, Team};
use std::collections::HashSet;
use uuid::Uuid;

fn teams(n: usize) -> Vec<Team> {
    let club = Uuid::new_v4();
    (0..n)
        .map(|i| {
            Team::new(
                Player::new(format!("P{}a", i), club),
                Player::new(format!("P{}b", i), club),
            )
            .unwrap()
        })
        .collect()
}

#[test]
fn every_pair_plays_exactly_once() {
    for n in [2, 4, 6, 8, 10] {
        let teams = teams(n);
        let matches = generate_matches(&teams);
        assert_eq!(matches.len(), n * (n - 1) / 2);

        let mut pairs = HashSet::new();
        for m in &matches {
            assert_eq!(m.status, MatchStatus::Pending);
            assert_eq!((m.score_a, m.score_b), (0, 0));
            assert_eq!(m.winner_id, None);
            assert_ne!(m.team_a.id, m.team_b.id);
            let key = if m.team_a.id < m.team_b.id {
                (m.team_a.id, m.team_b.id)
            } else {
                (m.team_b.id, m.team_a.id)
            };
            assert!(pairs.insert(key), "pair scheduled twice");
        }
    }
}

#[test]
fn lower_index_is_team_a_in_stable_order() {
    let teams = teams(4);
    let matches = generate_matches(&teams);
    let order: Vec<(Uuid, Uuid)> = matches.iter().map(|m| (m.team_a.id, m.team_b.id)).collect();
    let t = |i: usize| teams[i].id;
    assert_eq!(
        order,
        vec![
            (t(0), t(1)),
            (t(0), t(2)),
            (t(0), t(3)),
            (t(1), t(2)),
            (t(1), t(3)),
            (t(2), t(3)),
        ]
    );
}

#[test]
fn fewer_than_two_teams_yield_no_matches() {
    assert!(generate_matches(&[]).is_empty());
    assert!(generate_matches(&teams(1)).is_empty());
}
