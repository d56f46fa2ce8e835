//! Static catalog of candidate descriptive values offered during setup.

/// Ordered, read-only pool the setup view draws from. Display order is
/// the order below; grid placement never depends on it.
pub const BOARD_VALUES: &[&str] = &[
    "Has lived in another country",
    "Speaks three or more languages",
    "Plays a musical instrument",
    "Has run a marathon",
    "Is a morning person",
    "Has met a celebrity",
    "Loves spicy food",
    "Has a twin or triplet sibling",
    "Can cook a signature dish",
    "Has been camping in the last year",
    "Knows how to juggle",
    "Has read more than ten books this year",
    "Owns a pet",
    "Has jumped out of a plane",
    "Prefers tea over coffee",
    "Has acted in a play",
    "Can solve a Rubik's cube",
    "Has visited three continents",
    "Grew up in a small town",
    "Has a collection of something unusual",
    "Can whistle a full song",
    "Has won a sports trophy",
    "Writes with their left hand",
    "Has the same birthday month as you",
    "Has worked a night shift",
    "Can name every planet in order",
    "Has planted a tree",
    "Loves karaoke",
    "Has broken a bone",
    "Keeps a journal or diary",
    "Has ridden a horse",
    "Knows sign language basics",
];

/// 1-based lookup used by the CLI's numeric shorthand.
pub fn value_at(index: usize) -> Option<&'static str> {
    if index == 0 {
        return None;
    }
    BOARD_VALUES.get(index - 1).copied()
}
