use super::*;

impl GameBoard {
    /// Full copy of the current state, suitable for persistence.
    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    /// Adopt a previously persisted state. A snapshot that violates
    /// the structural invariants is refused and the current state is
    /// kept; the caller decides how to report the discard.
    pub fn restore(&mut self, snapshot: AppState) -> bool {
        if !snapshot.is_well_formed() {
            return false;
        }
        self.state = snapshot;
        true
    }
}
