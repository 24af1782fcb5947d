use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Identifies the player action an estimate was computed for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Drops every earlier estimate and converges from scratch, used after decoding.
    Fresh,
    /// Ordinary player action, callers hand out increasing numbers.
    At(u32),
}

/// Estimates, for every unopened tile bordering an opened number, the chance in percent
/// that it holds a mine.
///
/// Runs repeated row-major passes over the opened numbers. A clue whose unopened
/// neighbors must all be mines (saturation) or must all be empty (exhaustion) pins them to
/// 100 or 0 and restarts the scan from the top. Otherwise its free neighbors get a
/// proportional estimate that, within one turn, is only ever raised. The scan stops once a
/// whole pass pins nothing.
pub fn infer(board: &Board, turn: Turn) -> Result<Board> {
    let mut next = board.clone();
    if turn == Turn::Fresh {
        next.tiles_mut().iter_mut().for_each(Tile::clear_estimate);
    }

    // every restarting pass pins at least one more tile
    let max_passes = 2 * usize::from(next.total_cells()) + 2;
    let mut passes = 0;

    loop {
        if passes == max_passes {
            log::warn!("Inference still pinning tiles after {} passes", passes);
            return Err(GameError::InferenceDiverged { passes });
        }
        passes += 1;

        match run_pass(next.tiles_mut(), turn) {
            Some(clue) => log::trace!("Clue at {:?} pinned neighbors, rescanning", clue),
            None => break,
        }
    }

    log::debug!("Inference for {:?} settled after {} passes", turn, passes);
    Ok(next)
}

/// One row-major scan. Returns the clue that pinned tiles, cutting the scan short.
fn run_pass(tiles: &mut Array2<Tile>, turn: Turn) -> Option<Coord2> {
    let (rows, cols) = tiles.dim();
    for row in 0..rows as Coord {
        for col in 0..cols as Coord {
            let clue = (row, col);
            let tile = tiles[clue.to_nd_index()];
            if !tile.is_opened() || tile.adjacent == 0 {
                continue;
            }

            let hood = ClueNeighborhood::gather(tiles, clue, tile.adjacent);
            if hood.unopened.is_empty() {
                continue;
            }

            if hood.saturate(tiles) || hood.exhaust(tiles) {
                return Some(clue);
            }
            hood.estimate(tiles, turn);
        }
    }
    None
}

/// Unopened neighbors of a single clue and what is already known about them.
#[derive(Debug)]
struct ClueNeighborhood {
    mines: u8,
    unopened: SmallVec<[Coord2; 8]>,
    guaranteed: u8,
    empty: u8,
}

impl ClueNeighborhood {
    fn gather(tiles: &Array2<Tile>, clue: Coord2, mines: u8) -> Self {
        let mut hood = Self {
            mines,
            unopened: SmallVec::new(),
            guaranteed: 0,
            empty: 0,
        };

        for (pos, neighbor) in tiles.iter_neighbor_cells_with_index(clue) {
            if !neighbor.state.is_unopened() {
                continue;
            }
            hood.unopened.push(pos);
            match neighbor.mine_probability {
                Some(100) => hood.guaranteed += 1,
                Some(0) => hood.empty += 1,
                _ => {}
            }
        }

        hood
    }

    fn free_neighbors<'a>(&'a self, tiles: &'a Array2<Tile>) -> impl Iterator<Item = Coord2> + 'a {
        self.unopened
            .iter()
            .copied()
            .filter(|&pos| !tiles[pos.to_nd_index()].is_pinned())
    }

    fn pin_free(&self, tiles: &mut Array2<Tile>, probability: u8) -> bool {
        let free: SmallVec<[Coord2; 8]> = self.free_neighbors(tiles).collect();
        for &pos in &free {
            tiles[pos.to_nd_index()].mine_probability = Some(probability);
        }
        !free.is_empty()
    }

    /// As many mines as tiles that could still hold one: all of them are mines.
    fn saturate(&self, tiles: &mut Array2<Tile>) -> bool {
        let could_hold = self.unopened.len() - usize::from(self.empty);
        usize::from(self.mines) == could_hold && self.pin_free(tiles, 100)
    }

    /// Every mine is already accounted for: the rest are empty.
    fn exhaust(&self, tiles: &mut Array2<Tile>) -> bool {
        self.mines == self.guaranteed && self.pin_free(tiles, 0)
    }

    fn estimate(&self, tiles: &mut Array2<Tile>, turn: Turn) {
        let not_mines = self.unopened.len() - usize::from(self.guaranteed);
        let candidates = not_mines - usize::from(self.empty);
        let mines_left = self.mines.saturating_sub(self.guaranteed);
        let free: SmallVec<[Coord2; 8]> = self.free_neighbors(tiles).collect();
        if free.is_empty() {
            return;
        }
        let probability = proportional_estimate(mines_left, candidates);

        for pos in free {
            let tile = &mut tiles[pos.to_nd_index()];
            let stale = tile.last_updated_turn != Some(turn);
            let raises = tile
                .mine_probability
                .is_none_or(|previous| probability > previous);
            if stale || raises {
                tile.mine_probability = Some(probability);
                tile.last_updated_turn = Some(turn);
            }
        }
    }
}

/// `100 * mines / candidates`, rounded half up and capped at 100.
fn proportional_estimate(mines: u8, candidates: usize) -> u8 {
    let candidates = candidates as u32;
    let scaled = (200 * u32::from(mines) + candidates) / (2 * candidates);
    scaled.min(100) as u8
}
