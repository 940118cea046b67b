use serde::{Deserialize, Serialize};

/// Player-visible state of one board cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Tile {
    Covered,
    /// Uncovered safe tile carrying its 8-neighbor bomb count.
    Uncovered(u8),
    Flagged,
    /// A bomb shown after the game is lost.
    Bomb,
}

impl Tile {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered | Self::Flagged)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Covered
    }
}
