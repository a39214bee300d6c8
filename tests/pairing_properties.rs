//! Pairing and standings properties over many seeded tournaments with random results.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap, HashSet};
use swiss_tournament_web::{
    advance_round, recompute, record_result, start_tournament, MatchResult, PlayerId,
    RoundAdvance, Tournament, TournamentConfig,
};

fn random_result(rng: &mut StdRng) -> MatchResult {
    match rng.gen_range(0..3) {
        0 => MatchResult::Player1Win,
        1 => MatchResult::Player2Win,
        _ => MatchResult::Draw,
    }
}

/// Play a full tournament with random results; returns the finished tournament.
fn play(n: usize, total_rounds: u32, seed: u64) -> Tournament {
    let mut t = Tournament::new(TournamentConfig {
        total_rounds,
        ..TournamentConfig::default()
    })
    .unwrap();
    for i in 0..n {
        t.add_player(format!("P{i}")).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    start_tournament(&mut t, &mut rng).unwrap();
    loop {
        let round = t.current_round().unwrap().clone();
        for m in round.matches.iter().filter(|m| !m.is_bye) {
            let result = random_result(&mut rng);
            record_result(&mut t, round.number, &m.id, result).unwrap();
        }
        if advance_round(&mut t, &mut rng).unwrap() == RoundAdvance::Finished {
            return t;
        }
    }
}

#[test]
fn every_round_has_half_roster_matches_and_bye_iff_odd() {
    for n in 2..=9 {
        for seed in 0..5 {
            let t = play(n, 4, seed);
            assert_eq!(t.rounds().len(), 4);
            for round in t.rounds() {
                assert_eq!(round.matches.len(), (n + 1) / 2, "n={n} seed={seed}");
                let byes = round.matches.iter().filter(|m| m.is_bye).count();
                assert_eq!(byes, n % 2);
                let mut seen = HashSet::new();
                for m in &round.matches {
                    assert!(seen.insert(m.player_1));
                    if let Some(p2) = m.player_2 {
                        assert!(seen.insert(p2));
                    }
                }
                assert_eq!(seen.len(), n);
            }
        }
    }
}

#[test]
fn rematch_only_when_first_player_has_faced_all_remaining() {
    for n in 2..=9 {
        for seed in 0..5 {
            let t = play(n, 5, seed);
            let mut faced: HashMap<PlayerId, HashSet<PlayerId>> = HashMap::new();
            for round in t.rounds() {
                let pairs: Vec<(PlayerId, PlayerId)> = round
                    .matches
                    .iter()
                    .filter(|m| !m.is_bye)
                    .map(|m| (m.player_1, m.player_2.unwrap()))
                    .collect();
                for (k, &(p1, p2)) in pairs.iter().enumerate() {
                    let history = faced.get(&p1).cloned().unwrap_or_default();
                    if history.contains(&p2) {
                        // Pool at this point: this match's p2 and every later match.
                        let pool = pairs[k..]
                            .iter()
                            .flat_map(|&(a, b)| [a, b])
                            .filter(|&id| id != p1);
                        for other in pool {
                            assert!(history.contains(&other), "avoidable rematch, n={n} seed={seed}");
                        }
                    }
                }
                for (p1, p2) in pairs {
                    faced.entry(p1).or_default().insert(p2);
                    faced.entry(p2).or_default().insert(p1);
                }
            }
        }
    }
}

/// Distinct opponents of `player` over decided, non-bye matches in the ledger.
fn opponents_from_ledger(t: &Tournament, player: PlayerId) -> BTreeSet<PlayerId> {
    t.rounds()
        .iter()
        .flat_map(|round| round.matches.iter())
        .filter(|m| !m.is_bye && m.is_decided() && m.involves(player))
        .filter_map(|m| {
            if m.player_1 == player {
                m.player_2
            } else {
                Some(m.player_1)
            }
        })
        .collect()
}

#[test]
fn points_match_wins_and_draws_and_opponents_match_history() {
    for seed in 0..10 {
        let t = play(7, 3, seed);
        for p in t.players() {
            let r = p.record();
            assert_eq!(r.points(), 3 * r.wins() + r.draws());
            let games = t
                .rounds()
                .iter()
                .flat_map(|round| round.matches.iter())
                .filter(|m| m.involves(p.id))
                .count() as u32;
            assert_eq!(r.wins() + r.draws() + r.losses(), games);
            assert_eq!(r.opponents(), &opponents_from_ledger(&t, p.id), "seed {seed}");
            for opp in r.opponents() {
                let other = t.get_player(*opp).unwrap();
                assert!(other.record().has_faced(p.id));
            }
        }
    }
}

#[test]
fn undecided_matches_do_not_count_as_faced() {
    let mut t = Tournament::new(TournamentConfig::default()).unwrap();
    for i in 0..5 {
        t.add_player(format!("P{i}")).unwrap();
    }
    start_tournament(&mut t, &mut StdRng::seed_from_u64(13)).unwrap();
    record_result(&mut t, 1, "R1-M1", MatchResult::Player2Win).unwrap();

    let round = t.round(1).unwrap().clone();
    let (a, b) = (round.matches[0].player_1, round.matches[0].player_2.unwrap());
    let (c, d) = (round.matches[1].player_1, round.matches[1].player_2.unwrap());
    let bye = round.bye().unwrap().player_1;

    assert_eq!(t.get_player(a).unwrap().record().opponents().len(), 1);
    assert!(t.get_player(a).unwrap().record().has_faced(b));
    for id in [c, d, bye] {
        assert!(t.get_player(id).unwrap().record().opponents().is_empty());
    }
    for p in t.players() {
        assert_eq!(p.record().opponents(), &opponents_from_ledger(&t, p.id));
    }
}

#[test]
fn recompute_is_deterministic() {
    let t = play(8, 3, 77);
    let once = recompute(t.players(), t.rounds(), &t.config().scoring);
    let twice = recompute(&once, t.rounds(), &t.config().scoring);
    assert_eq!(once, t.players());
    assert_eq!(once, twice);
}

#[test]
fn standings_are_sorted_by_points_then_wins() {
    for seed in 0..10 {
        let t = play(9, 3, seed);
        let standings = t.standings();
        for pair in standings.windows(2) {
            assert!(
                pair[0].points > pair[1].points
                    || (pair[0].points == pair[1].points && pair[0].wins >= pair[1].wins)
            );
            assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }
}
