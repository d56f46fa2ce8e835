use super::*;

impl GameBoard {
    /// Apply one user action. Returns whether the state changed, so
    /// callers persist only on observed change. Guard failures are
    /// silent no-ops, never errors: the presentation layer disables
    /// the triggering controls, and the kernel stays safe for any
    /// caller that does not.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::ToggleValue { value } => self.toggle_value(value),
            Action::StartGame => self.start_game(),
            Action::SetName { cell_id, name } => self.set_name(cell_id, Some(name.as_str())),
            Action::ClearName { cell_id } => self.set_name(cell_id, None),
            Action::Reset => self.reset(),
        }
    }

    /// Remove the value if selected (keeping the relative order of the
    /// rest), otherwise append it. Adding past the target count is
    /// silently refused.
    fn toggle_value(&mut self, value: &str) -> bool {
        if let Some(position) = self
            .state
            .selection
            .iter()
            .position(|selected| selected == value)
        {
            self.state.selection.remove(position);
            return true;
        }
        if self.state.selection.len() >= TARGET_COUNT {
            return false;
        }
        self.state.selection.push(value.to_string());
        true
    }

    /// Setup -> Playing, guarded on a full selection. Shuffles a copy
    /// of the selection into a fresh grid; the selection itself is
    /// retained untouched.
    fn start_game(&mut self) -> bool {
        if self.state.phase != Phase::Setup {
            return false;
        }
        if self.state.selection.len() != TARGET_COUNT {
            return false;
        }
        self.state.grid = self.shuffled_grid();
        self.state.phase = Phase::Playing;
        true
    }

    /// Replace a cell's annotation. Surrounding whitespace is trimmed;
    /// a name that is empty after trimming clears the annotation. An
    /// unknown cell id is a no-op, not an error.
    fn set_name(&mut self, cell_id: &str, name: Option<&str>) -> bool {
        let Some(cell) = self
            .state
            .grid
            .iter_mut()
            .find(|cell| cell.id == cell_id)
        else {
            return false;
        };

        let trimmed = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        if cell.person_name == trimmed {
            return false;
        }
        cell.person_name = trimmed;
        true
    }

    /// Unconditional return to the default setup state. Idempotent.
    fn reset(&mut self) -> bool {
        if self.state == AppState::default() {
            return false;
        }
        self.state = AppState::default();
        true
    }
}
