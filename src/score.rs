//! Round scoring for Saddam okey.
//!
//! Scores are penalties, so lower is better:
//!   winner = base (-100, or -200 after throwing the joker), times the
//!            coefficient when finishing double
//!   loser  = raw tiles (or 100 when returning to okey) * coefficient,
//!            doubled for a double loser, then scaled by how the winner
//!            finished (x1, x2 for double or joker, x4 for both)
//! Every delta is multiplied by 10 in the final round.
//!
//! Nothing here validates input; callers check ranges before scoring.
//! Products saturate, so oversized input keeps its sign instead of wrapping.

use crate::color::{
    Color, FINAL_ROUND_MULTIPLIER, MAX_TILE_SCORE, PLAYER_COUNT, TOTAL_ROUNDS,
};
use crate::round::{LoserEntry, PlayerId, RoundInput, ScoreVector};

const WINNER_BASE: i64 = -100;
const WINNER_JOKER_BASE: i64 = -200;
const RETURN_TO_OKEY_PENALTY: i64 = 100;

/// Largest penalty a validated round can charge one loser.
pub const MAX_LOSER_DELTA: i64 =
    MAX_TILE_SCORE * Color::Star.coefficient() * 2 * 4 * FINAL_ROUND_MULTIPLIER;
/// Most negative credit a validated round can give the winner.
pub const MIN_WINNER_DELTA: i64 =
    WINNER_JOKER_BASE * Color::Star.coefficient() * FINAL_ROUND_MULTIPLIER;

/// Whether `delta` could come out of a round that passed validation.
#[inline]
pub fn delta_in_range(delta: i64) -> bool {
    (MIN_WINNER_DELTA..=MAX_LOSER_DELTA).contains(&delta)
}

/// 10 for the last round of the game, 1 otherwise.
#[inline]
pub fn round_multiplier(round_index: usize) -> i64 {
    if round_index == TOTAL_ROUNDS {
        FINAL_ROUND_MULTIPLIER
    } else {
        1
    }
}

/// Scale applied to every loser depending on how the winner finished.
#[inline]
pub fn winner_finish_multiplier(winner_is_double: bool, winner_threw_joker: bool) -> i64 {
    match (winner_is_double, winner_threw_joker) {
        (true, true) => 4,
        (true, false) | (false, true) => 2,
        (false, false) => 1,
    }
}

/// Winner's credit before the round multiplier.
pub fn winner_base(coefficient: i64, winner_is_double: bool, winner_threw_joker: bool) -> i64 {
    let base = if winner_threw_joker {
        WINNER_JOKER_BASE
    } else {
        WINNER_BASE
    };
    if winner_is_double {
        base.saturating_mul(coefficient)
    } else {
        base
    }
}

/// Loser's penalty before the winner-finish and round multipliers.
pub fn loser_penalty(entry: &LoserEntry, coefficient: i64) -> i64 {
    let double = if entry.is_double { 2 } else { 1 };
    let raw = if entry.returns_to_okey {
        RETURN_TO_OKEY_PENALTY
    } else {
        entry.score
    };
    raw.saturating_mul(coefficient).saturating_mul(double)
}

/// Computes every seat's delta for one round.
///
/// `round_index` is 1-based. Missing loser entries score as zero.
pub fn compute_round(
    round_index: usize,
    winner: PlayerId,
    losers: &[Option<LoserEntry>; PLAYER_COUNT],
    coefficient: i64,
    winner_is_double: bool,
    winner_threw_joker: bool,
) -> ScoreVector {
    let round_mult = round_multiplier(round_index);
    let finish_mult = winner_finish_multiplier(winner_is_double, winner_threw_joker);
    let winner_delta =
        winner_base(coefficient, winner_is_double, winner_threw_joker).saturating_mul(round_mult);

    let mut deltas = [0i64; PLAYER_COUNT];
    for (player, delta) in deltas.iter_mut().enumerate() {
        if player == winner {
            *delta = winner_delta;
            continue;
        }
        let entry = losers[player].unwrap_or_default();
        *delta = loser_penalty(&entry, coefficient)
            .saturating_mul(finish_mult)
            .saturating_mul(round_mult);
    }
    deltas
}

/// Scores a [`RoundInput`] using its color's coefficient.
pub fn score_round(round_index: usize, input: &RoundInput) -> ScoreVector {
    compute_round(
        round_index,
        input.winner,
        &input.losers,
        input.color.coefficient(),
        input.winner_is_double,
        input.winner_threw_joker,
    )
}
