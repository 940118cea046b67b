use ndarray::Array2;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// `PercentSource` backed by any [`rand::Rng`].
#[derive(Clone, Debug)]
pub struct RngPercentSource<R> {
    rng: R,
}

impl<R> RngPercentSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PercentSource for RngPercentSource<R> {
    fn percent(&mut self) -> u8 {
        self.rng.random_range(1..=100)
    }
}

/// Generation strategy that rolls an independent percentage per tile: the
/// tile is a bomb iff the draw lands at or under `bomb_chance`. The realized
/// bomb count varies run to run; no position is excluded and no safe first
/// click is guaranteed.
#[derive(Clone, Debug)]
pub struct ChanceGenerator<S> {
    source: S,
}

impl<S> ChanceGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl ChanceGenerator<RngPercentSource<SmallRng>> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngPercentSource::new(SmallRng::seed_from_u64(seed)))
    }

    pub fn from_entropy() -> Self {
        Self::new(RngPercentSource::new(SmallRng::from_os_rng()))
    }
}

impl<S: PercentSource> BoardGenerator for ChanceGenerator<S> {
    fn generate(mut self, config: GameConfig) -> BombLayout {
        let (size_x, size_y) = config.size;
        let mut bomb_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        // row-major, x innermost
        for y in 0..size_y {
            for x in 0..size_x {
                let draw = self.source.percent();
                debug_assert!(
                    (1..=100).contains(&draw),
                    "percent source returned {draw}, expected 1..=100"
                );
                if !(1..=100).contains(&draw) {
                    log::warn!("percent source returned {} outside 1..=100", draw);
                }
                bomb_mask[(x, y).to_nd_index()] = draw <= config.bomb_chance;
            }
        }

        let layout = BombLayout::from_bomb_mask(bomb_mask);
        log::debug!(
            "generated {}x{} board with {} bombs at {}% chance",
            size_x,
            size_y,
            layout.bomb_count(),
            config.bomb_chance
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(std::vec::IntoIter<u8>);

    impl Scripted {
        fn new(draws: &[u8]) -> Self {
            Self(draws.to_vec().into_iter())
        }
    }

    impl PercentSource for Scripted {
        fn percent(&mut self) -> u8 {
            self.0.next().expect("script exhausted")
        }
    }

    #[test]
    fn zero_chance_yields_no_bombs() {
        let config = GameConfig::new((4, 4), 0);

        let layout = ChanceGenerator::seeded(7).generate(config);

        assert_eq!(layout.bomb_count(), 0);
        assert_eq!(layout.safe_cell_count(), 16);
    }

    #[test]
    fn full_chance_fills_the_board() {
        let config = GameConfig::new((3, 2), 100);

        let layout = ChanceGenerator::seeded(7).generate(config);

        assert_eq!(layout.bomb_count(), 6);
        assert_eq!(layout.safe_cell_count(), 0);
    }

    #[test]
    fn draws_map_to_tiles_in_row_major_order() {
        let config = GameConfig::new((2, 2), 10);
        // visits (0,0), (1,0), (0,1), (1,1)
        let source = Scripted::new(&[10, 11, 100, 1]);

        let layout = ChanceGenerator::new(source).generate(config);

        assert!(layout.contains_bomb((0, 0)));
        assert!(!layout.contains_bomb((1, 0)));
        assert!(!layout.contains_bomb((0, 1)));
        assert!(layout.contains_bomb((1, 1)));
        assert_eq!(layout.bomb_count(), 2);
    }

    #[test]
    fn same_seed_generates_same_layout() {
        let config = GameConfig::new((8, 8), 30);

        let a = ChanceGenerator::seeded(42).generate(config);
        let b = ChanceGenerator::seeded(42).generate(config);

        assert_eq!(a, b);
    }
}
