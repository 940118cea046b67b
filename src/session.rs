use crate::*;

/// Result of a reveal as seen by the presentation layer. Malformed or
/// illegal input collapses into `NoOp` instead of surfacing an error.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealResult {
    /// Ordered reveal events of a completed cascade; animate at leisure.
    Cascaded(Vec<RevealEvent>),
    /// A bomb was revealed; every bomb position, for the explosion display.
    Exploded(Vec<Coord2>),
    NoOp,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlagResult {
    pub flags_remaining: isize,
    /// Whether the tile ends up flagged.
    pub flagged: bool,
}

/// One game session: a board engine plus its clock, owned by the caller.
/// Starting a new game replaces both wholesale; nothing survives a reset.
#[derive(Clone, Debug)]
pub struct Session {
    engine: BoardEngine,
    clock: GameClock,
}

impl Session {
    pub fn new(generator: impl BoardGenerator, config: GameConfig) -> Self {
        Self {
            engine: BoardEngine::new(generator.generate(config)),
            clock: GameClock::new(),
        }
    }

    /// New game with the default chance-based generator.
    pub fn new_game(config: GameConfig) -> Self {
        Self::new(ChanceGenerator::from_entropy(), config)
    }

    pub fn reset(&mut self, generator: impl BoardGenerator, config: GameConfig) {
        log::debug!("resetting session");
        *self = Self::new(generator, config);
    }

    /// Reveals the tile at `coords`. The clock starts on the first
    /// successful reveal and stops when the board finishes.
    pub fn reveal(&mut self, coords: Coord2) -> RevealResult {
        let outcome = match self.engine.reveal(coords) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("reveal at {:?} ignored: {}", coords, err);
                return RevealResult::NoOp;
            }
        };

        if outcome.has_update() {
            self.clock.start();
        }
        if self.engine.is_finished() {
            self.clock.stop();
        }

        match outcome {
            RevealOutcome::Cascaded(events) => RevealResult::Cascaded(events),
            RevealOutcome::Exploded(bombs) => RevealResult::Exploded(bombs),
            RevealOutcome::NoChange => RevealResult::NoOp,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagResult {
        let flagged = match self.engine.toggle_flag(coords) {
            Ok(_) | Err(GameError::AlreadyEnded) => {
                matches!(self.engine.tile_at(coords), Tile::Flagged)
            }
            Err(err) => {
                log::debug!("flag at {:?} ignored: {}", coords, err);
                false
            }
        };
        FlagResult {
            flags_remaining: self.engine.flags_remaining(),
            flagged,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_finished()
    }

    /// Only meaningful once the game is over.
    pub fn is_won(&self) -> bool {
        self.engine.state() == EngineState::Won
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn size(&self) -> Coord2 {
        self.engine.size()
    }

    pub fn total_bombs(&self) -> CellCount {
        self.engine.total_bombs()
    }

    pub fn flags_remaining(&self) -> isize {
        self.engine.flags_remaining()
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.engine.tile_at(coords)
    }

    pub fn bomb_coords(&self) -> Vec<Coord2> {
        self.engine.bomb_coords()
    }

    pub fn triggered_bomb(&self) -> Option<Coord2> {
        self.engine.triggered_bomb()
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub fn start_clock(&mut self) {
        self.clock.start();
    }

    pub fn stop_clock(&mut self) {
        self.clock.stop();
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }
}
