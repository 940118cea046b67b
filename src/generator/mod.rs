use crate::*;
pub use random::*;

mod random;

/// Uniform random-percentage source consumed during board generation.
///
/// Implementations must return values in `1..=100`; anything else is a
/// contract violation on the implementor's side, not a recoverable error.
pub trait PercentSource {
    fn percent(&mut self) -> u8;
}

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> BombLayout;
}
