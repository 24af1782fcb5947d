use core::ops::Index;

use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable snapshot of a minefield and what the player has uncovered so far.
///
/// Every operation that changes the board returns a new snapshot and leaves `self` untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    /// A board with no mines yet, as it exists before the first reveal.
    pub fn empty(size: Coord2) -> Self {
        Self {
            tiles: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let tiles = mine_mask.map(|&mine| Tile {
            mine,
            ..Tile::default()
        });
        Self::from_tiles(tiles)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    /// Builds a board from tiles whose mine and state fields are final, deriving adjacency.
    pub(crate) fn from_tiles(tiles: Array2<Tile>) -> Self {
        let mut board = Self { tiles };
        board.recompute_adjacency();
        board
    }

    fn recompute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                self.tiles[coords.to_nd_index()].adjacent = self.adjacent_mine_count(coords);
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn total_cells(&self) -> CellCount {
        self.tiles.len() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut Array2<Tile> {
        &mut self.tiles
    }

    /// Tiles with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Tile)> {
        self.tiles
            .indexed_iter()
            .map(|((row, col), tile)| ((row as Coord, col as Coord), tile))
    }

    fn count_tiles(&self, pred: impl Fn(&Tile) -> bool) -> CellCount {
        self.tiles.iter().filter(|tile| pred(tile)).count() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.mine)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.state == TileState::Flagged)
    }

    pub fn opened_count(&self) -> CellCount {
        self.count_tiles(Tile::is_opened)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    /// First opened mine in row-major order, if the player stepped on one.
    pub fn exploded_mine(&self) -> Option<Coord2> {
        self.iter()
            .find(|(_, tile)| tile.mine && tile.is_opened())
            .map(|(coords, _)| coords)
    }

    pub fn all_safe_opened(&self) -> bool {
        self.tiles.iter().all(|tile| tile.mine || tile.is_opened())
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.tiles
            .iter_neighbor_cells(coords)
            .filter(|tile| tile.mine)
            .count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    /// Current estimates as a grid, `None` where nothing has been deduced.
    pub fn probabilities(&self) -> Array2<Option<u8>> {
        self.tiles.map(|tile| tile.mine_probability)
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.iter()
            .filter(|(_, tile)| tile.mine)
            .map(|(coords, _)| coords)
            .collect()
    }

    /// Switches a tile between Hidden and Flagged. Opened tiles are left as they are.
    pub fn toggle_flag(&self, coords: Coord2) -> Result<Self> {
        let coords = self.validate_coords(coords)?;
        let mut next = self.clone();
        let tile = &mut next.tiles[coords.to_nd_index()];
        tile.state = match tile.state {
            TileState::Hidden => TileState::Flagged,
            TileState::Flagged => TileState::Hidden,
            TileState::Opened => TileState::Opened,
        };
        Ok(next)
    }

    /// Opens a tile, flooding across zero-adjacency tiles.
    pub fn open(&self, coords: Coord2) -> Result<Self> {
        let coords = self.validate_coords(coords)?;
        Ok(cascade::open(self, coords))
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}
