//! In-process API facade wiring the board kernel to SQLite persistence
//! and the image export/share layer.

mod export;
mod persistence;
mod share;

use std::path::Path;

use board_core::board::GameBoard;
use contracts::{Action, AppState, BoardConfig, Phase};

pub use export::{encode_png, render_board, ExportError};
pub use persistence::{PersistenceError, SqliteStateStore};
pub use share::{
    detect_share_target, DownloadShare, ShareError, ShareOutcome, ShareTarget, SystemOpenShare,
    SHARE_FILE_NAME,
};

/// What happened when the persisted state was read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored, well-formed state was adopted.
    Restored,
    /// Nothing was stored; the default setup state is in effect.
    FreshState,
    /// The stored payload was malformed or violated invariants; it was
    /// discarded in favor of the default state. Recoverable, never fatal.
    DiscardedCorrupt(String),
}

#[derive(Debug)]
pub struct BoardApi {
    board: GameBoard,
    store: Option<SqliteStateStore>,
    last_persistence_error: Option<String>,
}

impl BoardApi {
    pub fn from_config(config: BoardConfig) -> Self {
        Self {
            board: GameBoard::new(config),
            store: None,
            last_persistence_error: None,
        }
    }

    pub fn attach_sqlite_store(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let store = SqliteStateStore::open(path)?;
        self.store = Some(store);
        Ok(())
    }

    /// Read the stored state once at startup. Absent or malformed
    /// payloads fall back to the default setup state; the outcome says
    /// which, so the front end can log the recovery.
    pub fn load_persisted_state(&mut self) -> LoadOutcome {
        let Some(store) = self.store.as_ref() else {
            return LoadOutcome::FreshState;
        };

        match store.load_state() {
            Ok(Some(state)) => {
                if self.board.restore(state) {
                    LoadOutcome::Restored
                } else {
                    LoadOutcome::DiscardedCorrupt(
                        "stored state violates board invariants".to_string(),
                    )
                }
            }
            Ok(None) => LoadOutcome::FreshState,
            Err(err) => LoadOutcome::DiscardedCorrupt(err.to_string()),
        }
    }

    /// Apply one action; mirror the new state to storage if anything
    /// changed. A persistence failure is recorded, not propagated: the
    /// in-memory game carries on. Reset routes through [`Self::reset`]
    /// so the stored entry is purged rather than overwritten with a
    /// serialized default.
    pub fn apply(&mut self, action: &Action) -> bool {
        if matches!(action, Action::Reset) {
            return self.reset();
        }
        let changed = self.board.apply(action);
        if changed {
            self.flush_persistence_if_enabled();
        }
        changed
    }

    pub fn toggle_value(&mut self, value: &str) -> bool {
        self.apply(&Action::ToggleValue {
            value: value.to_string(),
        })
    }

    pub fn start_game(&mut self) -> bool {
        self.apply(&Action::StartGame)
    }

    pub fn set_name(&mut self, cell_id: &str, name: &str) -> bool {
        self.apply(&Action::SetName {
            cell_id: cell_id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn clear_name(&mut self, cell_id: &str) -> bool {
        self.apply(&Action::ClearName {
            cell_id: cell_id.to_string(),
        })
    }

    /// Purge the stored entry first, then clear the in-memory state.
    /// No default row is rewritten; a subsequent load starts fresh.
    pub fn reset(&mut self) -> bool {
        if let Some(store) = self.store.as_ref() {
            if let Err(err) = store.delete_state() {
                self.last_persistence_error = Some(err.to_string());
            }
        }
        self.board.apply(&Action::Reset)
    }

    pub fn state(&self) -> &AppState {
        self.board.state()
    }

    pub fn phase(&self) -> Phase {
        self.board.phase()
    }

    pub fn last_persistence_error(&self) -> Option<&str> {
        self.last_persistence_error.as_deref()
    }

    /// Render and encode the current grid for sharing. Read-only with
    /// respect to the board; callers hand the payload to a
    /// [`ShareTarget`].
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        let rendered = render_board(self.board.state())?;
        encode_png(&rendered)
    }

    fn flush_persistence_if_enabled(&mut self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        match store.save_state(self.board.state()) {
            Ok(()) => self.last_persistence_error = None,
            Err(err) => self.last_persistence_error = Some(err.to_string()),
        }
    }
}
