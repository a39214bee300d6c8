//! Round play: result entry and round advancement.

use crate::logic::pairing::generate_next_round;
use crate::logic::standings::refresh_standings;
use crate::models::{MatchResult, Round, Standing, Tournament, TournamentError, TournamentState};
use chrono::Utc;
use rand::Rng;

/// What [`advance_round`] moved the tournament to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundAdvance {
    /// The freshly paired next round.
    NextRound(Round),
    /// The last configured round is done; standings are final.
    Finished,
}

/// Set (or overwrite) the result of one match, then replay the ledger.
///
/// Any generated round may be edited, including past rounds and after the tournament has
/// finished. Bye matches are fixed. Returns the updated standings.
pub fn record_result(
    tournament: &mut Tournament,
    round: u32,
    match_id: &str,
    result: MatchResult,
) -> Result<Vec<Standing>, TournamentError> {
    let m = tournament
        .round_mut(round)?
        .get_match_mut(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound {
            round,
            match_id: match_id.to_string(),
        })?;
    if m.is_bye {
        return Err(TournamentError::ByeIsImmutable(m.id.clone()));
    }
    m.result = Some(result);
    refresh_standings(tournament);
    Ok(tournament.standings())
}

/// Close the current round: pair the next one, or finish after the last configured round.
///
/// Every match of the current round must have a result; otherwise nothing changes.
pub fn advance_round<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<RoundAdvance, TournamentError> {
    let current = match tournament.state {
        TournamentState::RoundInProgress(k) => k,
        _ => return Err(TournamentError::InvalidState),
    };
    if !tournament.round(current)?.is_complete() {
        return Err(TournamentError::IncompleteResults { round: current });
    }

    if current >= tournament.config.total_rounds {
        tournament.state = TournamentState::Finished;
        tournament.finished_at = Some(Utc::now());
        if let Some(winner) = tournament.winner() {
            log::info!("Tournament {} finished, winner: {}", tournament.id, winner.name);
        }
        return Ok(RoundAdvance::Finished);
    }

    generate_next_round(tournament, rng)?;
    tournament.state = TournamentState::RoundInProgress(current + 1);
    Ok(RoundAdvance::NextRound(tournament.round(current + 1)?.clone()))
}
