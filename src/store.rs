//! Durable storage for the single session record.
//!
//! The whole record is rewritten on every save. Callers decide when to save;
//! the CLI does so after starting, after each round and after a reset.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::game::GameSession;
use crate::state::{GameState, SCHEMA_VERSION};

/// Load/save pair for the persisted [`GameState`].
pub trait SessionStore {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<GameState>, StoreError>;
    fn save(&mut self, state: &GameState) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Stores the record as pretty JSON in one file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Parses a record and rejects any schema version other than the current one.
fn decode(raw: &str) -> Result<GameState, StoreError> {
    let state: GameState = serde_json::from_str(raw)?;
    if state.schema_version != SCHEMA_VERSION {
        return Err(StoreError::SchemaVersion {
            found: state.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(state)
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<GameState>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let state = decode(&raw)?;
        debug!(path = %self.path.display(), status = state.game_status.as_str(), "loaded session");
        Ok(Some(state))
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&mut file, state)?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), round = state.current_round, "saved session");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Keeps the record in memory. Serialises through JSON so it behaves like the file store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw text, e.g. a damaged record.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<GameState>, StoreError> {
        let Some(raw) = &self.raw else {
            return Ok(None);
        };
        decode(raw).map(Some)
    }

    fn save(&mut self, state: &GameState) -> Result<(), StoreError> {
        self.raw = Some(serde_json::to_string(state)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.raw = None;
        Ok(())
    }
}

/// Loads the stored session, falling back to a fresh one on any failure.
pub fn load_or_default<S: SessionStore + ?Sized>(store: &S) -> GameSession {
    let state = match store.load() {
        Ok(Some(state)) => state,
        Ok(None) => return GameSession::new(),
        Err(err) => {
            warn!(error = %err, "could not load stored session, starting over");
            return GameSession::new();
        }
    };
    match GameSession::from_state(state) {
        Ok(session) => session,
        Err(err) => {
            warn!(error = %err, "stored session is inconsistent, starting over");
            GameSession::new()
        }
    }
}

/// Persists the session's current snapshot.
pub fn save_session<S: SessionStore + ?Sized>(
    store: &mut S,
    session: &GameSession,
) -> Result<(), StoreError> {
    store.save(&session.state())
}
