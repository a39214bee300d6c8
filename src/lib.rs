//! Swiss tournament web app: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_round, generate_pairings, pair_in_order, rank, recompute, record_result,
    start_tournament, write_standings_csv, RoundAdvance,
};
pub use models::{
    ErrorKind, GameMatch, MatchId, MatchResult, Player, PlayerId, Record, Round, Scoring, Standing,
    Tournament, TournamentConfig, TournamentError, TournamentId, TournamentState, BYE_NAME,
    DEFAULT_TOTAL_ROUNDS,
};
