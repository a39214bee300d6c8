//! Tournament, TournamentState, configuration and errors.

use crate::models::game::{MatchId, Round};
use crate::models::player::{Player, PlayerId, Standing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad category of a [`TournamentError`], for callers that only need to branch on the kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed or empty user-supplied data.
    InvalidInput,
    /// Operation not permitted in the current tournament phase.
    InvalidState,
    /// Referenced round, match or player does not exist.
    NotFound,
    /// Operation on an entity that does not allow it (e.g. editing a bye).
    InvalidOperation,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Player name is empty after trimming whitespace.
    EmptyPlayerName,
    /// Total rounds must be at least 1.
    InvalidTotalRounds(u32),
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Not enough players to generate a round (need at least 2).
    NotEnoughPlayers,
    /// Not all matches of the current round have a result.
    IncompleteResults { round: u32 },
    /// All configured rounds have already been generated.
    AllRoundsPlayed { total_rounds: u32 },
    /// Player not found in the roster.
    PlayerNotFound(PlayerId),
    /// No round with this 1-based index.
    RoundNotFound(u32),
    /// No match with this id in the given round.
    MatchNotFound { round: u32, match_id: MatchId },
    /// Bye results are fixed and cannot be edited.
    ByeIsImmutable(MatchId),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            EmptyPlayerName | InvalidTotalRounds(_) => ErrorKind::InvalidInput,
            InvalidState | NotEnoughPlayers | IncompleteResults { .. } | AllRoundsPlayed { .. } => {
                ErrorKind::InvalidState
            }
            PlayerNotFound(_) | RoundNotFound(_) | MatchNotFound { .. } => ErrorKind::NotFound,
            ByeIsImmutable(_) => ErrorKind::InvalidOperation,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::InvalidTotalRounds(n) => {
                write!(f, "Total rounds must be at least 1 (got {})", n)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::NotEnoughPlayers => write!(f, "Need at least 2 players to pair a round"),
            TournamentError::IncompleteResults { round } => {
                write!(f, "Not all matches of round {} have a result", round)
            }
            TournamentError::AllRoundsPlayed { total_rounds } => {
                write!(f, "All {} rounds have already been played", total_rounds)
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::RoundNotFound(n) => write!(f, "Round {} not found", n),
            TournamentError::MatchNotFound { round, match_id } => {
                write!(f, "Match {} not found in round {}", match_id, round)
            }
            TournamentError::ByeIsImmutable(id) => write!(f, "Match {} is a bye and cannot be edited", id),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Points awarded per outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// Default number of rounds (suits 6-8 players).
pub const DEFAULT_TOTAL_ROUNDS: u32 = 3;

/// Configuration consumed by the engine; fixed once the tournament starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub total_rounds: u32,
    #[serde(default)]
    pub scoring: Scoring,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            scoring: Scoring::default(),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering players; not started.
    #[default]
    Setup,
    /// Round k (1-based) is being played.
    RoundInProgress(u32),
    /// All configured rounds played; standings are final.
    Finished,
}

/// Full tournament state: roster, match ledger, configuration and phase.
///
/// Fields are only changed by the tournament operations; callers read them through accessors,
/// so generated rounds and player records cannot be edited from outside.
///
/// ```compile_fail
/// use swiss_tournament_web::{Tournament, TournamentConfig};
/// let mut t = Tournament::new(TournamentConfig::default()).unwrap();
/// t.rounds.clear();
/// ```
///
/// ```compile_fail
/// use swiss_tournament_web::Player;
/// let mut p = Player::new("Mai");
/// p.record.points = 99;
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub(crate) id: TournamentId,
    /// Roster, kept in standings order after every recompute.
    pub(crate) players: Vec<Player>,
    /// Every generated round, in generation order.
    pub(crate) rounds: Vec<Round>,
    pub(crate) config: TournamentConfig,
    pub(crate) state: TournamentState,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) started_at: Option<DateTime<Utc>>,
    pub(crate) finished_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no players. Total rounds must be at least 1.
    pub fn new(config: TournamentConfig) -> Result<Self, TournamentError> {
        if config.total_rounds == 0 {
            return Err(TournamentError::InvalidTotalRounds(config.total_rounds));
        }
        Ok(Self::empty(config))
    }

    fn empty(config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            rounds: Vec::new(),
            config,
            state: TournamentState::Setup,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Create a tournament with already registered players. Still in Setup until started.
    pub(crate) fn with_players(players: Vec<Player>, config: TournamentConfig) -> Self {
        Self {
            players,
            ..Self::empty(config)
        }
    }

    pub fn id(&self) -> TournamentId {
        self.id
    }

    /// Roster in standings order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Every generated round, in generation order.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn state(&self) -> TournamentState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Display name for a match slot; `None` is the bye opponent.
    pub fn player_name(&self, id: Option<PlayerId>) -> &str {
        match id {
            Some(id) => self.get_player(id).map(|p| p.name.as_str()).unwrap_or("?"),
            None => crate::models::game::BYE_NAME,
        }
    }

    /// Register a player (only valid in Setup). Returns the new player's id.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.players.push(player);
        log::debug!("Registered player {} ({})", name_trimmed, id);
        Ok(id)
    }

    /// Remove a player by id (only valid in Setup).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Set the number of rounds to play (only valid in Setup).
    pub fn set_total_rounds(&mut self, total_rounds: u32) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        if total_rounds == 0 {
            return Err(TournamentError::InvalidTotalRounds(total_rounds));
        }
        self.config.total_rounds = total_rounds;
        Ok(())
    }

    /// Round by 1-based index.
    pub fn round(&self, number: u32) -> Result<&Round, TournamentError> {
        number
            .checked_sub(1)
            .and_then(|idx| self.rounds.get(idx as usize))
            .ok_or(TournamentError::RoundNotFound(number))
    }

    pub(crate) fn round_mut(&mut self, number: u32) -> Result<&mut Round, TournamentError> {
        number
            .checked_sub(1)
            .and_then(|idx| self.rounds.get_mut(idx as usize))
            .ok_or(TournamentError::RoundNotFound(number))
    }

    /// The most recently generated round, if any.
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn is_finished(&self) -> bool {
        self.state == TournamentState::Finished
    }

    /// Ranked standings table (roster is kept in ranked order).
    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| Standing::from_player(i + 1, p))
            .collect()
    }

    /// Top of the standings once the tournament has finished.
    pub fn winner(&self) -> Option<&Player> {
        if self.is_finished() {
            self.players.first()
        } else {
            None
        }
    }

    /// Restart tournament: back to Setup with the same players (same ids, zeroed records).
    pub fn restart_tournament(&mut self) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let players = self.players.iter().map(Player::with_zeroed_record).collect();
        let (id, created_at, config) = (self.id, self.created_at, self.config);
        *self = Self {
            id,
            created_at,
            ..Self::with_players(players, config)
        };
        Ok(())
    }
}
