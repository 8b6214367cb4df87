use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Integer board coordinate.
///
/// `x` grows rightward and `y` grows downward. Row `0` is the topmost visible row;
/// negative rows lie above the board, where pieces spawn.
///
/// Positions order row-major (by `y`, then `x`), so collections keyed by
/// `Position` iterate top row first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
