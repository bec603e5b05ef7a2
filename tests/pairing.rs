//! Integration tests for the pairing table and the schedule built from it.

use round_robin_web::{build_rounds, create_schedule, generate_pairing_table, Player, TournamentError};
use rstest::rstest;
use std::collections::HashSet;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

#[test]
fn fewer_than_two_players_is_rejected() {
    assert!(matches!(
        generate_pairing_table(1),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        generate_pairing_table(0),
        Err(TournamentError::InvalidConfiguration(_))
    ));
}

#[test]
fn two_players_meet_once_without_bye() {
    let table = generate_pairing_table(2).unwrap();
    assert_eq!(table.round_count(), 1);
    assert_eq!(table.round_of(0, 1), Some(0));
    assert_eq!(table.round_of(1, 0), Some(0));
    assert_eq!(table.bye_in_round(0), None);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
#[case(6)]
#[case(7)]
#[case(8)]
#[case(11)]
#[case(16)]
#[case(21)]
fn every_pair_meets_exactly_once(#[case] n: usize) {
    let table = generate_pairing_table(n).unwrap();
    let expected_rounds = if n % 2 == 1 { n } else { n - 1 };
    assert_eq!(table.round_count(), expected_rounds);

    let mut seen = HashSet::new();
    for r in 0..table.round_count() {
        let mut in_round = HashSet::new();
        for (i, j) in table.pairs_in_round(r) {
            assert!(i < j);
            assert!(seen.insert((i, j)), "pair ({i}, {j}) scheduled twice");
            // Nobody plays twice in the same round.
            assert!(in_round.insert(i));
            assert!(in_round.insert(j));
        }
    }
    assert_eq!(seen.len(), n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            assert!(table.round_of(i, j).is_some());
        }
    }
}

#[rstest]
#[case(3)]
#[case(5)]
#[case(7)]
#[case(9)]
#[case(15)]
fn odd_counts_give_each_player_exactly_one_bye(#[case] n: usize) {
    let table = generate_pairing_table(n).unwrap();
    let mut byes = vec![0; n];
    for r in 0..table.round_count() {
        let bye = table.bye_in_round(r).expect("odd count has a bye every round");
        byes[bye] += 1;
        assert_eq!(table.pairs_in_round(r).count(), (n - 1) / 2);
    }
    assert!(byes.iter().all(|&b| b == 1), "byes per player: {byes:?}");
}

#[rstest]
#[case(4)]
#[case(6)]
#[case(10)]
fn even_counts_have_no_bye(#[case] n: usize) {
    let table = generate_pairing_table(n).unwrap();
    for r in 0..table.round_count() {
        assert_eq!(table.bye_in_round(r), None);
        assert_eq!(table.pairs_in_round(r).count(), n / 2);
    }
}

#[test]
fn built_rounds_cover_every_player_once_per_round() {
    let players: Vec<Player> = names(7).into_iter().map(Player::new).collect();
    let table = generate_pairing_table(players.len()).unwrap();
    let rounds = build_rounds(&players, &table, false);

    assert_eq!(rounds.len(), 7);
    for (idx, round) in rounds.iter().enumerate() {
        assert_eq!(round.number as usize, idx + 1);
        let bye = round.bye.expect("7 players means one bye per round");
        for p in &players {
            assert!(round.includes(p.id));
        }
        assert!(round.matches.iter().all(|m| !m.involves(bye)));
        assert!(round.matches.iter().all(|m| m.player_1_sets == 0 && m.player_2_sets == 0));
    }
}

#[test]
fn create_schedule_validates_configuration() {
    assert!(matches!(
        create_schedule("Solo", &["A"], 3, false),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        create_schedule("Even", &["A", "B"], 4, false),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        create_schedule("Zero", &["A", "B"], 0, false),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        create_schedule("Blank", &["A", "  "], 3, false),
        Err(TournamentError::InvalidConfiguration(_))
    ));
    assert_eq!(
        create_schedule("Dupes", &["Ana", "Bo", "ana"], 3, false).unwrap_err(),
        TournamentError::DuplicateName("ana".into())
    );
}

#[test]
fn create_schedule_builds_full_round_robin() {
    let t = create_schedule("League", &names(6), 5, true).unwrap();
    assert_eq!(t.name, "League");
    assert_eq!(t.players.len(), 6);
    assert_eq!(t.rounds.len(), 5);
    assert_eq!(t.sets_to_win(), 3);
    assert_eq!(t.matches().count(), 15);
    assert!(t.matches().all(|m| m.include_set_results));
    assert!(t.rounds.iter().all(|r| r.bye.is_none()));
}
