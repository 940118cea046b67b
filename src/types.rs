use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    /// All 8 king-move neighbors in bounds, used for bomb counting.
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;

    /// The 4 edge-sharing neighbors in bounds, in N, E, S, W order.
    /// The cascade expands through these only.
    fn iter_cardinal_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, dim_to_bounds(self), KING_DISPLACEMENTS)
    }

    fn iter_cardinal_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, dim_to_bounds(self), CARDINAL_DISPLACEMENTS)
    }
}

fn dim_to_bounds<T>(array: &Array2<T>) -> Coord2 {
    let dim = array.dim();
    (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
}

const KING_DISPLACEMENTS: &[(isize, isize)] = &[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const CARDINAL_DISPLACEMENTS: &[(isize, isize)] = &[(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    displacements: &'static [(isize, isize)],
    index: usize,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2, displacements: &'static [(isize, isize)]) -> Self {
        Self {
            center,
            bounds,
            displacements,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.index >= self.displacements.len() {
                return None;
            }

            let next_item = apply_delta(self.center, self.displacements[self.index], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_neighbors_clip_at_corner() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        let neighbors: Vec<_> = grid.iter_neighbors((0, 0)).collect();

        assert_eq!(neighbors, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn king_neighbors_are_eight_in_the_interior() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        assert_eq!(grid.iter_neighbors((1, 1)).count(), 8);
    }

    #[test]
    fn cardinal_neighbors_keep_n_e_s_w_order() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        let neighbors: Vec<_> = grid.iter_cardinal_neighbors((1, 1)).collect();

        assert_eq!(neighbors, vec![(1, 0), (2, 1), (1, 2), (0, 1)]);
    }

    #[test]
    fn cardinal_neighbors_clip_at_corner() {
        let grid: Array2<bool> = Array2::default([2, 2]);

        let neighbors: Vec<_> = grid.iter_cardinal_neighbors((0, 0)).collect();

        assert_eq!(neighbors, vec![(1, 0), (0, 1)]);
    }
}
