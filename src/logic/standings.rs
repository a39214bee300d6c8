//! Standings: full replay of the match ledger into fresh player records.

use crate::models::{MatchResult, Player, PlayerId, Round, Scoring, Tournament};
use std::collections::HashMap;

/// Recompute every player's record from scratch by replaying `rounds` in generation order.
///
/// Pure: `roster` only supplies identities (its records are ignored). Returns a ranked copy:
/// points descending, then wins descending, then the order of `roster` (stable sort).
///
/// - Bye: +1 win and a win's points, no opponent tracking.
/// - Decided match: both players record each other as opponents, then win/loss or draw.
/// - Unset result: contributes nothing.
pub fn recompute(roster: &[Player], rounds: &[Round], scoring: &Scoring) -> Vec<Player> {
    let mut players: Vec<Player> = roster.iter().map(Player::with_zeroed_record).collect();
    let index: HashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    for m in rounds.iter().flat_map(|r| r.matches.iter()) {
        let result = match m.result {
            Some(r) => r,
            None => continue,
        };
        let i1 = match index.get(&m.player_1) {
            Some(&i) => i,
            None => continue,
        };
        if m.is_bye {
            players[i1].add_win(scoring.win);
            continue;
        }
        let i2 = match m.player_2.and_then(|id| index.get(&id).copied()) {
            Some(i) => i,
            None => continue,
        };

        let (id1, id2) = (players[i1].id, players[i2].id);
        players[i1].add_opponent(id2);
        players[i2].add_opponent(id1);

        match result {
            MatchResult::Player1Win => {
                players[i1].add_win(scoring.win);
                players[i2].add_loss(scoring.loss);
            }
            MatchResult::Player2Win => {
                players[i2].add_win(scoring.win);
                players[i1].add_loss(scoring.loss);
            }
            MatchResult::Draw => {
                players[i1].add_draw(scoring.draw);
                players[i2].add_draw(scoring.draw);
            }
        }
    }

    rank(&mut players);
    players
}

/// Sort by points, then wins (both descending). Stable, so remaining ties keep their order.
pub fn rank(players: &mut [Player]) {
    players.sort_by(|a, b| {
        b.record
            .points
            .cmp(&a.record.points)
            .then_with(|| b.record.wins.cmp(&a.record.wins))
    });
}

/// Rewrite the tournament roster from its ledger.
pub(crate) fn refresh_standings(tournament: &mut Tournament) {
    tournament.players = recompute(
        &tournament.players,
        &tournament.rounds,
        &tournament.config.scoring,
    );
}
