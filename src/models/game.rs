//! Match (game), MatchResult, and Round for 1v1 Swiss pairings.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Identifier of a match, scoped to its round: `R{round}-M{seq}` or `R{round}-BYE`.
pub type MatchId = String;

/// Display name of the synthetic opponent in a bye match.
pub const BYE_NAME: &str = "BYE";

/// Outcome of a decided match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    #[serde(rename = "p1_win")]
    Player1Win,
    #[serde(rename = "p2_win")]
    Player2Win,
    Draw,
}

/// A single 1v1 match, or a bye (one player, automatic win).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based round this match belongs to.
    pub round: u32,
    pub player_1: PlayerId,
    /// None for a bye.
    pub player_2: Option<PlayerId>,
    /// None if not yet played.
    pub result: Option<MatchResult>,
    pub is_bye: bool,
}

impl GameMatch {
    /// Regular pairing; `seq` is the 1-based position within the round.
    pub fn new(round: u32, seq: usize, player_1: PlayerId, player_2: PlayerId) -> Self {
        Self {
            id: format!("R{round}-M{seq}"),
            round,
            player_1,
            player_2: Some(player_2),
            result: None,
            is_bye: false,
        }
    }

    /// Bye match: result is fixed to a player 1 win at creation.
    pub fn bye(round: u32, player: PlayerId) -> Self {
        Self {
            id: format!("R{round}-BYE"),
            round,
            player_1: player,
            player_2: None,
            result: Some(MatchResult::Player1Win),
            is_bye: true,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.result.is_some()
    }

    /// Whether `player` takes part in this match.
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player_1 == player || self.player_2 == Some(player)
    }
}

/// One generated batch of matches. The pairings never change once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based index.
    pub number: u32,
    pub matches: Vec<GameMatch>,
}

impl Round {
    pub fn new(number: u32, matches: Vec<GameMatch>) -> Self {
        Self { number, matches }
    }

    /// True when every match has a result (byes always do).
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(GameMatch::is_decided)
    }

    pub fn get_match(&self, id: &str) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub(crate) fn get_match_mut(&mut self, id: &str) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// The bye match of this round, if the roster was odd.
    pub fn bye(&self) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.is_bye)
    }
}
