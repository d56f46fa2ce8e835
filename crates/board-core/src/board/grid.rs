use rand::seq::SliceRandom;

use super::*;

impl GameBoard {
    /// Shuffle a copy of the selection into display order and mint one
    /// cell per value. Ids are `{position}-{stamp}`: unique within the
    /// grid by position, and distinct across regenerations because the
    /// stamp advances between games.
    pub(super) fn shuffled_grid(&mut self) -> Vec<Cell> {
        let mut values = self.state.selection.clone();
        values.shuffle(&mut self.rng);

        let stamp = (self.stamp_source)();
        values
            .into_iter()
            .enumerate()
            .map(|(position, value)| Cell {
                id: format!("{position}-{stamp}"),
                value,
                person_name: None,
            })
            .collect()
    }
}
