//! Data structures for the Swiss tournament: players, matches, rounds, tournament state.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, MatchResult, Round, BYE_NAME};
pub use player::{Player, PlayerId, Record, Standing};
pub use tournament::{
    ErrorKind, Scoring, Tournament, TournamentConfig, TournamentError, TournamentId,
    TournamentState, DEFAULT_TOTAL_ROUNDS,
};
