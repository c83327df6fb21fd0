use serde::{Deserialize, Serialize};

use crate::round::{PlayerId, ScoreVector};

/// Version written into every persisted record.
pub const SCHEMA_VERSION: u32 = 1;

/// Phase of the score sheet. Only ever moves forward until a reset.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Setup,
    Playing,
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Setup => "setup",
            GameStatus::Playing => "playing",
            GameStatus::Finished => "finished",
        }
    }
}

/// Persisted snapshot of a session, stored as a single JSON record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub players: Vec<String>,
    /// `scores[round][player]`.
    pub scores: Vec<ScoreVector>,
    /// 1-based.
    pub current_round: usize,
    pub game_status: GameStatus,
}

// Records written before the version field existed are treated as version 1.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            players: Vec::new(),
            scores: Vec::new(),
            current_round: 1,
            game_status: GameStatus::Setup,
        }
    }
}

/// One row of the final results table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_fields() {
        let state = GameState {
            players: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            scores: vec![[-100, 100, 0, 0]],
            current_round: 2,
            game_status: GameStatus::Playing,
            ..GameState::default()
        };
        let value = serde_json::to_value(&state).expect("serialize");
        assert_eq!(value["schemaVersion"], 1);
        assert_eq!(value["currentRound"], 2);
        assert_eq!(value["gameStatus"], "playing");
        assert_eq!(value["scores"][0][1], 100);
    }

    #[test]
    fn legacy_record_without_version_loads() {
        let raw = r#"{"players":[],"scores":[],"currentRound":1,"gameStatus":"setup"}"#;
        let state: GameState = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(state, GameState::default());
    }
}
