//! Setup phase: start tournament (transition from Setup to round 1).

use crate::logic::pairing::generate_next_round;
use crate::models::{Round, Tournament, TournamentError, TournamentState};
use chrono::Utc;
use rand::Rng;

/// Start the tournament: require 2 players, pair round 1 (random order) and return it.
pub fn start_tournament<'a, R: Rng + ?Sized>(
    tournament: &'a mut Tournament,
    rng: &mut R,
) -> Result<&'a Round, TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    generate_next_round(tournament, rng)?;
    tournament.state = TournamentState::RoundInProgress(1);
    tournament.started_at = Some(Utc::now());
    log::info!(
        "Tournament {} started with {} players, {} rounds",
        tournament.id,
        tournament.players.len(),
        tournament.config.total_rounds
    );
    tournament.round(1)
}
