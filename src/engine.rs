use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::num::Saturating;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// One board from construction to win or loss.
///
/// The state machine is `Ready` (no reveal yet) to `Active` (first reveal
/// done) to `Won`/`Lost` (terminal). Uncovering is monotonic: an uncovered
/// tile never becomes covered, flagged, or part of another cascade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardEngine {
    layout: BombLayout,
    board: Array2<Tile>,
    uncovered_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: EngineState,
    triggered_bomb: Option<Coord2>,
}

impl BoardEngine {
    pub fn new(layout: BombLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            board: Array2::default(size.to_nd_index()),
            uncovered_count: Saturating(0),
            flagged_count: Saturating(0),
            state: Default::default(),
            triggered_bomb: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn total_bombs(&self) -> CellCount {
        self.layout.bomb_count()
    }

    /// Bombs minus placed flags; goes negative when the player over-flags.
    pub fn flags_remaining(&self) -> isize {
        (self.layout.bomb_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.board[coords.to_nd_index()]
    }

    pub fn has_bomb_at(&self, coords: Coord2) -> bool {
        self.layout.contains_bomb(coords)
    }

    pub fn bomb_coords(&self) -> Vec<Coord2> {
        self.layout.bomb_coords()
    }

    /// The bomb whose reveal lost the game, if any.
    pub fn triggered_bomb(&self) -> Option<Coord2> {
        self.triggered_bomb
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.board[coords.to_nd_index()] {
            Tile::Covered => {
                self.board[coords.to_nd_index()] = Tile::Flagged;
                self.flagged_count += 1;
                Changed
            }
            Tile::Flagged => {
                self.board[coords.to_nd_index()] = Tile::Covered;
                self.flagged_count -= 1;
                Changed
            }
            _ => NoChange,
        })
    }

    /// Reveals a covered tile. A bomb ends the game and surfaces every bomb
    /// position; a safe tile runs the cascade and reports each uncovered
    /// tile in order. Flagged and already-uncovered tiles are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;

        if !matches!(self.board[coords.to_nd_index()], Tile::Covered) {
            return Ok(RevealOutcome::NoChange);
        }

        if self.layout.contains_bomb(coords) {
            self.triggered_bomb = Some(coords);
            self.finish(false);
            return Ok(RevealOutcome::Exploded(self.layout.bomb_coords()));
        }

        let events = self.cascade_from(coords);

        // checked once the cascade has settled, never per tile
        if self.uncovered_count == Saturating(self.layout.safe_cell_count()) {
            self.finish(true);
        } else {
            self.mark_started();
        }

        Ok(RevealOutcome::Cascaded(events))
    }

    /// Breadth-first fill over cardinal adjacency. Zero-count tiles expand,
    /// numbered tiles are leaves, flagged tiles block. The queued set keeps
    /// every tile from entering the queue twice, so the pass visits each
    /// tile at most once and always runs to completion.
    fn cascade_from(&mut self, start: Coord2) -> Vec<RevealEvent> {
        let mut queued = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut events = Vec::new();

        while let Some(coords) = queue.pop_front() {
            let bomb_count = self.layout.adjacent_bomb_count(coords);
            self.board[coords.to_nd_index()] = Tile::Uncovered(bomb_count);
            self.uncovered_count += 1;
            events.push(RevealEvent { coords, bomb_count });
            log::trace!("uncovered {:?}, bomb count {}", coords, bomb_count);

            if bomb_count == 0 {
                for pos in self.layout.iter_cardinal_neighbors(coords) {
                    if matches!(self.board[pos.to_nd_index()], Tile::Covered)
                        && queued.insert(pos)
                    {
                        queue.push_back(pos);
                    }
                }
            }
        }

        log::debug!("cascade from {:?} uncovered {} tiles", start, events.len());
        events
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            log::debug!("first reveal, board active");
            self.state = EngineState::Active;
        }
    }

    /// On a win the leftover covered bombs get auto-flagged; on a loss they
    /// are shown as bombs. Correctly flagged bombs keep their flags either
    /// way, and safe tiles are never touched.
    fn finish(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!("game over, state {:?}", self.state);

        for coords in self.layout.bomb_coords() {
            if matches!(self.board[coords.to_nd_index()], Tile::Covered) {
                if won {
                    self.board[coords.to_nd_index()] = Tile::Flagged;
                    self.flagged_count += 1;
                } else {
                    self.board[coords.to_nd_index()] = Tile::Bomb;
                }
            }
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
