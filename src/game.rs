use std::array;

use tracing::{debug, info};

use crate::color::{MAX_NAME_LEN, PLAYER_COUNT, TOTAL_ROUNDS};
use crate::error::{GameError, InvalidName};
use crate::round::{PlayerId, RoundInput, ScoreVector};
use crate::score::{delta_in_range, score_round};
use crate::state::{GameState, GameStatus, SCHEMA_VERSION, Standing};

/// Checks a player list the way the setup form does and returns the
/// trimmed names in seat order.
pub fn validate_player_names<S: AsRef<str>>(
    names: &[S],
) -> Result<[String; PLAYER_COUNT], InvalidName> {
    if names.len() != PLAYER_COUNT {
        return Err(InvalidName::Count {
            expected: PLAYER_COUNT,
            received: names.len(),
        });
    }
    for (player, name) in names.iter().enumerate() {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(InvalidName::Empty(player));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(InvalidName::TooLong {
                player,
                max: MAX_NAME_LEN,
            });
        }
    }
    Ok(array::from_fn(|idx| names[idx].as_ref().trim().to_string()))
}

/// Authoritative score sheet for one table of four.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    players: Vec<String>,
    scores: Vec<ScoreVector>,
    current_round: usize,
    status: GameStatus,
}

impl GameSession {
    /// Empty session waiting for player names.
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            scores: Vec::new(),
            current_round: 1,
            status: GameStatus::Setup,
        }
    }

    /// Rebuilds a session from a persisted record.
    pub fn from_state(state: GameState) -> Result<Self, GameError> {
        let GameState {
            players,
            scores,
            current_round,
            game_status,
            ..
        } = state;
        if game_status == GameStatus::Setup {
            return Ok(Self::new());
        }
        if players.len() != PLAYER_COUNT {
            return Err(GameError::CorruptState("a started game needs four players"));
        }
        if scores.len() != TOTAL_ROUNDS {
            return Err(GameError::CorruptState("score sheet has the wrong number of rounds"));
        }
        if !(1..=TOTAL_ROUNDS).contains(&current_round) {
            return Err(GameError::CorruptState("current round is out of range"));
        }
        if game_status == GameStatus::Finished && current_round != TOTAL_ROUNDS {
            return Err(GameError::CorruptState("finished game must stop on the last round"));
        }
        if !scores.iter().flatten().all(|&delta| delta_in_range(delta)) {
            return Err(GameError::CorruptState("score sheet holds an impossible delta"));
        }
        Ok(Self {
            players,
            scores,
            current_round,
            status: game_status,
        })
    }

    /// Snapshot suitable for persisting.
    pub fn state(&self) -> GameState {
        GameState {
            schema_version: SCHEMA_VERSION,
            players: self.players.clone(),
            scores: self.scores.clone(),
            current_round: self.current_round,
            game_status: self.status,
        }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_name(&self, player: PlayerId) -> Option<&str> {
        self.players.get(player).map(String::as_str)
    }

    /// `scores()[round][player]`, one row per round once a game is started.
    pub fn scores(&self) -> &[ScoreVector] {
        &self.scores
    }

    /// 1-based round awaiting entry (or the last round once finished).
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn rounds_played(&self) -> usize {
        match self.status {
            GameStatus::Setup => 0,
            GameStatus::Playing => self.current_round - 1,
            GameStatus::Finished => TOTAL_ROUNDS,
        }
    }

    /// Starts a fresh game, discarding whatever was there before.
    pub fn start_game(&mut self, names: [String; PLAYER_COUNT]) {
        info!(players = ?names, "starting game");
        self.players = names.into();
        self.scores = vec![[0; PLAYER_COUNT]; TOTAL_ROUNDS];
        self.current_round = 1;
        self.status = GameStatus::Playing;
    }

    /// Scores the current round and moves the sheet forward.
    ///
    /// Returns the deltas written for the round. The session is left
    /// untouched when an error is returned.
    pub fn log_round(&mut self, input: &RoundInput) -> Result<ScoreVector, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying);
        }
        if input.winner >= PLAYER_COUNT {
            return Err(GameError::InvalidPlayer(input.winner));
        }
        let round = self.current_round;
        let deltas = score_round(round, input);
        debug!(round, winner = input.winner, color = input.color.name(), ?deltas, "round scored");

        self.scores[round - 1] = deltas;
        if round == TOTAL_ROUNDS {
            self.status = GameStatus::Finished;
            info!(winner = ?self.winner(), "game finished");
        } else {
            self.current_round += 1;
        }
        Ok(deltas)
    }

    /// Clears everything back to the setup screen.
    pub fn reset_game(&mut self) {
        info!(status = self.status.as_str(), "resetting game");
        *self = Self::new();
    }

    /// Sum of a player's deltas over every round.
    pub fn total_score(&self, player: PlayerId) -> i64 {
        self.scores
            .iter()
            .map(|round| round.get(player).copied().unwrap_or(0))
            .fold(0i64, i64::saturating_add)
    }

    /// Totals for every seated player, in seat order.
    pub fn totals(&self) -> Vec<i64> {
        (0..self.players.len())
            .map(|player| self.total_score(player))
            .collect()
    }

    /// Player with the lowest total; the earliest seat wins ties.
    pub fn winner(&self) -> Option<PlayerId> {
        let totals = self.totals();
        let best = totals.iter().min()?;
        totals.iter().position(|total| total == best)
    }

    /// Players ordered from best (lowest) to worst total. Ties keep seat order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .players
            .iter()
            .enumerate()
            .map(|(player, name)| Standing {
                player,
                name: name.clone(),
                total: self.total_score(player),
            })
            .collect();
        rows.sort_by_key(|row| row.total);
        rows
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
