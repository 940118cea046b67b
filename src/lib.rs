use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod clock;
mod engine;
mod error;
mod generator;
mod session;
mod tile;
mod types;

/// Default board side length.
pub const DEFAULT_SIZE: Coord = 20;

/// Default per-tile bomb probability in percent.
pub const DEFAULT_BOMB_CHANCE: u8 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    /// Per-tile bomb probability in percent, 0..=100.
    pub bomb_chance: u8,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, bomb_chance: u8) -> Self {
        Self { size, bomb_chance }
    }

    pub fn new((size_x, size_y): Coord2, bomb_chance: u8) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let bomb_chance = bomb_chance.clamp(0, 100);
        Self::new_unchecked((size_x, size_y), bomb_chance)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((DEFAULT_SIZE, DEFAULT_SIZE), DEFAULT_BOMB_CHANCE)
    }
}

/// Immutable bomb placement for one board. The realized bomb count is
/// recomputed from the mask, never taken on faith from the generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BombLayout {
    bomb_mask: Array2<bool>,
    bomb_count: CellCount,
}

impl BombLayout {
    pub fn from_bomb_mask(bomb_mask: Array2<bool>) -> Self {
        let bomb_count = bomb_mask
            .iter()
            .filter(|&&is_bomb| is_bomb)
            .count()
            .try_into()
            .unwrap();
        Self {
            bomb_mask,
            bomb_count,
        }
    }

    pub fn from_bomb_coords(size: Coord2, bomb_coords: &[Coord2]) -> Result<Self> {
        let mut bomb_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in bomb_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidPosition);
            }
            bomb_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_bomb_mask(bomb_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.bomb_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.bomb_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.bomb_mask.len().try_into().unwrap()
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn contains_bomb(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Bombs among the 8 king-move neighbors; off-board neighbors contribute 0.
    pub fn adjacent_bomb_count(&self, coords: Coord2) -> u8 {
        self.bomb_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }

    pub fn bomb_coords(&self) -> Vec<Coord2> {
        self.bomb_mask
            .indexed_iter()
            .filter(|&(_, &is_bomb)| is_bomb)
            .map(|((x, y), _)| (x as Coord, y as Coord))
            .collect()
    }

    pub(crate) fn iter_cardinal_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.bomb_mask.iter_cardinal_neighbors(coords)
    }
}

impl Index<Coord2> for BombLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.bomb_mask[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// One step of a cascade, in the order the tiles were uncovered.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealEvent {
    pub coords: Coord2,
    pub bomb_count: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    /// The ordered reveal events of a completed cascade.
    Cascaded(Vec<RevealEvent>),
    /// A bomb was hit; carries every bomb position on the board.
    Exploded(Vec<Coord2>),
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_chance_and_size() {
        let config = GameConfig::new((0, 4), 150);

        assert_eq!(config.size, (1, 4));
        assert_eq!(config.bomb_chance, 100);
        assert_eq!(config.total_cells(), 4);
    }

    #[test]
    fn layout_recounts_bombs_from_mask() {
        let layout = BombLayout::from_bomb_coords((3, 3), &[(0, 0), (2, 1)]).unwrap();

        assert_eq!(layout.bomb_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert!(layout.contains_bomb((2, 1)));
        assert_eq!(layout.bomb_coords().len(), 2);
    }

    #[test]
    fn layout_rejects_out_of_bounds_bombs() {
        let result = BombLayout::from_bomb_coords((2, 2), &[(2, 0)]);

        assert_eq!(result, Err(GameError::InvalidPosition));
    }

    #[test]
    fn adjacent_count_covers_all_eight_neighbors() {
        let ring: Vec<Coord2> = (0..3)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .filter(|&coords| coords != (1, 1))
            .collect();
        let layout = BombLayout::from_bomb_coords((3, 3), &ring).unwrap();

        assert_eq!(layout.adjacent_bomb_count((1, 1)), 8);
    }

    #[test]
    fn adjacent_count_is_zero_without_bombs() {
        let layout = BombLayout::from_bomb_coords((3, 3), &[]).unwrap();

        assert_eq!(layout.adjacent_bomb_count((1, 1)), 0);
    }
}
