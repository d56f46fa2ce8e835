//! Cross-boundary contracts shared by the board kernel, persistence, and CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of values a grid requires; selection and grid are both bounded by it.
pub const TARGET_COUNT: usize = 16;

/// Fixed key the serialized [`AppState`] is stored under.
pub const STORAGE_KEY: &str = "bingo_app_state";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Setup,
    Playing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Playing => write!(f, "playing"),
        }
    }
}

/// One grid slot pairing a chosen value with an optional person name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    pub id: String,
    pub value: String,
    #[serde(rename = "personName", default)]
    pub person_name: Option<String>,
}

impl Cell {
    pub fn is_annotated(&self) -> bool {
        self.person_name.is_some()
    }
}

/// The whole persisted application state: phase, in-progress selection,
/// and the generated grid. This is exactly the stored payload layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppState {
    #[serde(default)]
    pub phase: Phase,
    #[serde(default)]
    pub selection: Vec<String>,
    #[serde(default)]
    pub grid: Vec<Cell>,
}

impl AppState {
    pub fn cell(&self, cell_id: &str) -> Option<&Cell> {
        self.grid.iter().find(|cell| cell.id == cell_id)
    }

    /// Annotated cells, i.e. the play-progress count.
    pub fn filled_count(&self) -> usize {
        self.grid.iter().filter(|cell| cell.is_annotated()).count()
    }

    pub fn selection_full(&self) -> bool {
        self.selection.len() >= TARGET_COUNT
    }

    /// Values still needed before the grid can be generated.
    pub fn remaining_count(&self) -> usize {
        TARGET_COUNT.saturating_sub(self.selection.len())
    }

    /// Structural invariants a restored state must satisfy: bounded
    /// duplicate-free selection, empty grid in setup, and a full grid
    /// with pairwise-distinct cell ids while playing.
    pub fn is_well_formed(&self) -> bool {
        if self.selection.len() > TARGET_COUNT {
            return false;
        }
        if has_duplicates(self.selection.iter().map(String::as_str)) {
            return false;
        }
        match self.phase {
            Phase::Setup => self.grid.is_empty(),
            Phase::Playing => {
                self.grid.len() == TARGET_COUNT
                    && !has_duplicates(self.grid.iter().map(|cell| cell.id.as_str()))
            }
        }
    }
}

fn has_duplicates<'a>(items: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = std::collections::BTreeSet::new();
    for item in items {
        if !seen.insert(item) {
            return true;
        }
    }
    false
}

/// Every user-triggered mutation the kernel understands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ToggleValue { value: String },
    StartGame,
    SetName { cell_id: String, name: String },
    ClearName { cell_id: String },
    Reset,
}

/// Kernel construction knobs. A fixed seed makes grid generation
/// deterministic; when absent the shuffle draws from OS entropy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state() -> AppState {
        AppState {
            phase: Phase::Playing,
            selection: Vec::new(),
            grid: (0..TARGET_COUNT)
                .map(|idx| Cell {
                    id: format!("{idx}-1700000000000"),
                    value: format!("value {idx}"),
                    person_name: if idx == 0 {
                        Some("Dana".to_string())
                    } else {
                        None
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn persisted_layout_uses_wire_field_names() {
        let state = playing_state();
        let json = serde_json::to_value(&state).expect("state serializes");

        assert_eq!(json["phase"], "playing");
        assert_eq!(json["grid"][0]["personName"], "Dana");
        assert_eq!(json["grid"][1]["personName"], serde_json::Value::Null);
    }

    #[test]
    fn round_trips_field_for_field() {
        let state = playing_state();
        let raw = serde_json::to_string(&state).expect("state serializes");
        let back: AppState = serde_json::from_str(&raw).expect("state parses");
        assert_eq!(back, state);
    }

    #[test]
    fn tolerates_unknown_and_absent_fields() {
        let raw = r#"{"phase":"setup","selection":["a"],"grid":[],"theme":"dark"}"#;
        let state: AppState = serde_json::from_str(raw).expect("unknown fields ignored");
        assert_eq!(state.selection, vec!["a".to_string()]);

        let sparse: AppState = serde_json::from_str("{}").expect("all fields default");
        assert_eq!(sparse, AppState::default());
    }

    #[test]
    fn well_formedness_rejects_invariant_violations() {
        assert!(AppState::default().is_well_formed());
        assert!(playing_state().is_well_formed());

        let mut short_grid = playing_state();
        short_grid.grid.pop();
        assert!(!short_grid.is_well_formed());

        let mut duplicate_ids = playing_state();
        duplicate_ids.grid[1].id = duplicate_ids.grid[0].id.clone();
        assert!(!duplicate_ids.is_well_formed());

        let mut grid_in_setup = playing_state();
        grid_in_setup.phase = Phase::Setup;
        assert!(!grid_in_setup.is_well_formed());

        let duplicate_selection = AppState {
            selection: vec!["a".to_string(), "a".to_string()],
            ..AppState::default()
        };
        assert!(!duplicate_selection.is_well_formed());
    }
}
