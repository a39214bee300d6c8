//! Player, Record and the Standing row shown to clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups). Never reused.
pub type PlayerId = Uuid;

/// Cumulative record of a player. Only rebuilt by the standings replay.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub(crate) points: u32,
    pub(crate) wins: u32,
    pub(crate) draws: u32,
    pub(crate) losses: u32,
    /// Players already faced in decided, non-bye matches.
    pub(crate) opponents: BTreeSet<PlayerId>,
}

impl Record {
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn opponents(&self) -> &BTreeSet<PlayerId> {
        &self.opponents
    }

    /// Whether this player has already faced `other` in a decided match.
    pub fn has_faced(&self, other: PlayerId) -> bool {
        self.opponents.contains(&other)
    }
}

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub(crate) record: Record,
}

impl Player {
    /// Create a new player with the given name and a zeroed record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            record: Record::default(),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Same identity with the record reset to zero (start of a replay).
    pub(crate) fn with_zeroed_record(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            record: Record::default(),
        }
    }

    /// Record a win (a bye counts as one).
    pub(crate) fn add_win(&mut self, points: u32) {
        self.record.wins += 1;
        self.record.points += points;
    }

    pub(crate) fn add_draw(&mut self, points: u32) {
        self.record.draws += 1;
        self.record.points += points;
    }

    pub(crate) fn add_loss(&mut self, points: u32) {
        self.record.losses += 1;
        self.record.points += points;
    }

    pub(crate) fn add_opponent(&mut self, opponent: PlayerId) {
        self.record.opponents.insert(opponent);
    }
}

/// One row of the standings table (for API / display / CSV).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in the ranked list.
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
}

impl Standing {
    pub fn from_player(rank: usize, p: &Player) -> Self {
        Self {
            rank,
            player_id: p.id,
            name: p.name.clone(),
            wins: p.record.wins,
            losses: p.record.losses,
            draws: p.record.draws,
            points: p.record.points,
        }
    }
}
