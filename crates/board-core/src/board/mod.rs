mod actions;
mod grid;
mod snapshot;

use std::time::{SystemTime, UNIX_EPOCH};

use contracts::{Action, AppState, BoardConfig, Cell, Phase, TARGET_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Milliseconds since the Unix epoch; the stamp half of a cell id.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// The in-memory state machine. All mutation flows through
/// [`GameBoard::apply`]; storage I/O is a caller concern so the
/// transitions stay directly testable.
#[derive(Debug)]
pub struct GameBoard {
    state: AppState,
    rng: StdRng,
    stamp_source: fn() -> u64,
}

impl GameBoard {
    pub fn new(config: BoardConfig) -> Self {
        Self::with_stamp_source(config, unix_millis)
    }

    /// Substitute the cell-id stamp source, for deterministic tests.
    pub fn with_stamp_source(config: BoardConfig, stamp_source: fn() -> u64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: AppState::default(),
            rng,
            stamp_source,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn selection(&self) -> &[String] {
        &self.state.selection
    }

    pub fn grid(&self) -> &[Cell] {
        &self.state.grid
    }
}
