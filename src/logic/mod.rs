//! Tournament business logic: setup, pairing, result entry, standings, export.

mod export;
mod pairing;
mod rounds;
mod setup;
mod standings;

pub use export::write_standings_csv;
pub use pairing::{generate_pairings, pair_in_order};
pub use rounds::{advance_round, record_result, RoundAdvance};
pub use setup::start_tournament;
pub use standings::{rank, recompute};
