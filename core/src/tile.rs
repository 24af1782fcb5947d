use serde::{Deserialize, Serialize};

use crate::Turn;

/// Player-visible state of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Opened,
    Flagged,
}

impl TileState {
    pub const fn is_unopened(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub mine: bool,
    pub state: TileState,
    /// Mines in the 8-neighborhood, fixed once the layout is known.
    pub adjacent: u8,
    /// Estimated chance in percent that this tile holds a mine.
    pub mine_probability: Option<u8>,
    /// Turn under which `mine_probability` was last written by the proportional estimate.
    pub last_updated_turn: Option<Turn>,
}

impl Tile {
    pub const fn is_opened(&self) -> bool {
        matches!(self.state, TileState::Opened)
    }

    /// Estimate pinned to a certain mine or a certain empty tile.
    pub const fn is_pinned(&self) -> bool {
        matches!(self.mine_probability, Some(0) | Some(100))
    }

    pub(crate) fn clear_estimate(&mut self) {
        self.mine_probability = None;
        self.last_updated_turn = None;
    }
}
