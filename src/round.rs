use serde::{Deserialize, Serialize};

use crate::color::{Color, MAX_TILE_SCORE, PLAYER_COUNT};
use crate::error::InvalidRound;

/// Zero-based seat of a player at the table.
pub type PlayerId = usize;

/// Signed score change for every seat in one round. Negative is a credit.
pub type ScoreVector = [i64; PLAYER_COUNT];

/// What a losing player reports at the end of a hand.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LoserEntry {
    /// Sum of the tiles left on the rack.
    pub score: i64,
    /// Player was going for doubles (çift).
    pub is_double: bool,
    /// Player returns to okey; the raw score is ignored.
    pub returns_to_okey: bool,
}

impl LoserEntry {
    pub fn new(score: i64) -> Self {
        Self {
            score,
            ..Self::default()
        }
    }

    pub fn double(mut self) -> Self {
        self.is_double = true;
        self
    }

    pub fn returning_to_okey(mut self) -> Self {
        self.returns_to_okey = true;
        self
    }
}

/// Everything needed to score one hand.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundInput {
    pub winner: PlayerId,
    /// Entry per seat. The winner's slot is ignored; an absent loser scores as zero.
    pub losers: [Option<LoserEntry>; PLAYER_COUNT],
    pub color: Color,
    pub winner_is_double: bool,
    pub winner_threw_joker: bool,
}

impl RoundInput {
    pub fn new(winner: PlayerId, color: Color) -> Self {
        Self {
            winner,
            losers: [None; PLAYER_COUNT],
            color,
            winner_is_double: false,
            winner_threw_joker: false,
        }
    }

    pub fn with_loser(self, player: PlayerId, score: i64) -> Self {
        self.with_loser_entry(player, LoserEntry::new(score))
    }

    /// Records a loser's entry. Seats outside the table are ignored.
    pub fn with_loser_entry(mut self, player: PlayerId, entry: LoserEntry) -> Self {
        if let Some(slot) = self.losers.get_mut(player) {
            *slot = Some(entry);
        }
        self
    }

    pub fn winner_double(mut self) -> Self {
        self.winner_is_double = true;
        self
    }

    pub fn winner_joker(mut self) -> Self {
        self.winner_threw_joker = true;
        self
    }

    /// Entry used for scoring `player`, falling back to a zero entry.
    pub fn loser(&self, player: PlayerId) -> LoserEntry {
        self.losers
            .get(player)
            .copied()
            .flatten()
            .unwrap_or_default()
    }

    /// Seats other than the winner, in table order.
    pub fn loser_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..PLAYER_COUNT).filter(move |&p| p != self.winner)
    }

    /// Checks the entry the way the score sheet form does before submitting.
    ///
    /// A loser returning to okey needs no score and any score given is not
    /// range-checked, since scoring ignores it.
    pub fn validate(&self) -> Result<(), InvalidRound> {
        if self.winner >= PLAYER_COUNT {
            return Err(InvalidRound::WinnerIndex(self.winner));
        }
        for player in self.loser_ids() {
            let Some(entry) = self.losers[player] else {
                return Err(InvalidRound::MissingScore(player));
            };
            if entry.returns_to_okey {
                continue;
            }
            if !(0..=MAX_TILE_SCORE).contains(&entry.score) {
                return Err(InvalidRound::ScoreOutOfRange {
                    player,
                    score: entry.score,
                    max: MAX_TILE_SCORE,
                });
            }
        }
        Ok(())
    }
}

/// Partially filled round entry, as collected field by field from a prompt.
#[derive(Clone, Debug, Default)]
pub struct RoundDraft {
    pub winner: Option<PlayerId>,
    pub color: Option<Color>,
    pub winner_is_double: bool,
    pub winner_threw_joker: bool,
    pub losers: [Option<LoserEntry>; PLAYER_COUNT],
}

impl RoundDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns the draft into a validated [`RoundInput`].
    pub fn finish(self) -> Result<RoundInput, InvalidRound> {
        let winner = self.winner.ok_or(InvalidRound::MissingWinner)?;
        let color = self.color.ok_or(InvalidRound::MissingColor)?;
        let mut losers = self.losers;
        if let Some(slot) = losers.get_mut(winner) {
            *slot = None;
        }
        let input = RoundInput {
            winner,
            losers,
            color,
            winner_is_double: self.winner_is_double,
            winner_threw_joker: self.winner_threw_joker,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Parses a CLI loser spec of the form `seat=score[,double][,okey]`.
///
/// With `okey` the score may be omitted: `2=,okey` or `2=okey`.
pub fn parse_loser_spec(spec: &str) -> Result<(PlayerId, LoserEntry), String> {
    let (seat, rest) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected seat=score, got: {spec}"))?;
    let player = seat
        .trim()
        .parse::<PlayerId>()
        .map_err(|_| format!("invalid seat: {seat}"))?;
    let mut entry = LoserEntry::default();
    let mut score: Option<i64> = None;
    for part in rest.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "double" | "cift" | "çift" => entry.is_double = true,
            "okey" => entry.returns_to_okey = true,
            other => {
                let value = other
                    .parse::<i64>()
                    .map_err(|_| format!("invalid score or flag: {part}"))?;
                if score.replace(value).is_some() {
                    return Err(format!("more than one score for seat {player}"));
                }
            }
        }
    }
    match score {
        Some(value) => entry.score = value,
        None if entry.returns_to_okey => {}
        None => return Err(format!("missing score for seat {player}")),
    }
    Ok((player, entry))
}
