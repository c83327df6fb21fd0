//! Score sheet for four-player Saddam okey: round scoring, an eleven-round
//! session controller and a persisted JSON record.

pub mod color;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod round;
pub mod score;
pub mod state;
pub mod store;
pub mod visualize;

pub use crate::color::{Color, MAX_TILE_SCORE, PLAYER_COUNT, TOTAL_ROUNDS};
pub use crate::config::Config;
pub use crate::error::{GameError, InvalidName, InvalidRound, StoreError};
pub use crate::game::{GameSession, validate_player_names};
pub use crate::round::{LoserEntry, PlayerId, RoundDraft, RoundInput, ScoreVector, parse_loser_spec};
pub use crate::score::{compute_round, score_round};
pub use crate::state::{GameState, GameStatus, SCHEMA_VERSION, Standing};
pub use crate::store::{FileStore, MemoryStore, SessionStore, load_or_default, save_session};
pub use crate::visualize::{
    VisualOptions, describe_round, render_results, render_scoreboard, running_totals,
};
