use alloc::collections::VecDeque;
use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::*;

/// Opens `coords` and floods outward across zero-adjacency tiles, returning the new board.
///
/// Already opened tiles are a no-op. A mine or a numbered tile stops the flood at itself,
/// so the flood can never open a mine it did not start on. Flagged neighbors are skipped.
pub fn open(board: &Board, coords: Coord2) -> Board {
    if board[coords].is_opened() {
        return board.clone();
    }

    let mut next = board.clone();
    let tiles = next.tiles_mut();

    let mut visited = HashSet::new();
    visited.insert(coords);
    let mut to_visit = VecDeque::from([coords]);
    let mut opened = 0usize;

    while let Some(visit_coords) = to_visit.pop_front() {
        let tile = &mut tiles[visit_coords.to_nd_index()];
        if tile.is_opened() {
            continue;
        }

        tile.state = TileState::Opened;
        tile.clear_estimate();
        opened += 1;
        log::trace!(
            "Opened tile at {:?}, mine: {}, adjacent: {}",
            visit_coords,
            tile.mine,
            tile.adjacent
        );

        if tile.mine || tile.adjacent > 0 {
            continue;
        }

        // zero tiles have no mine neighbors, so flooding across them is always safe
        let neighbors: SmallVec<[Coord2; 8]> = tiles
            .iter_neighbor_cells_with_index(visit_coords)
            .filter(|(_, neighbor)| matches!(neighbor.state, TileState::Hidden))
            .map(|(pos, _)| pos)
            .collect();
        for pos in neighbors {
            if visited.insert(pos) {
                to_visit.push_back(pos);
            }
        }
    }

    log::debug!("Open at {:?} uncovered {} tiles", coords, opened);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn flood_fill_opens_zero_region() {
        let board = layout((3, 3), &[(2, 2)]);

        let next = open(&board, (0, 0));

        assert!(next[(0, 0)].is_opened());
        assert!(next[(1, 1)].is_opened());
        assert_eq!(next[(1, 1)].adjacent, 1);
        assert_eq!(next[(2, 2)].state, TileState::Hidden);
        assert_eq!(next.opened_count(), 8);
        // the input snapshot is untouched
        assert_eq!(board.opened_count(), 0);
    }

    #[test]
    fn numbered_tile_stops_the_flood() {
        let board = layout((1, 4), &[(0, 3)]);

        let next = open(&board, (0, 2));

        assert!(next[(0, 2)].is_opened());
        assert_eq!(next.opened_count(), 1);
    }

    #[test]
    fn opening_a_mine_marks_only_that_tile() {
        let board = layout((2, 2), &[(0, 0)]);

        let next = open(&board, (0, 0));

        assert!(next[(0, 0)].is_opened());
        assert_eq!(next.exploded_mine(), Some((0, 0)));
        assert_eq!(next.opened_count(), 1);
    }

    #[test]
    fn opened_tile_is_a_no_op() {
        let board = open(&layout((1, 3), &[(0, 2)]), (0, 0));

        assert_eq!(open(&board, (0, 1)), board);
    }

    #[test]
    fn flood_skips_flags() {
        let board = layout((1, 5), &[])
            .toggle_flag((0, 2))
            .unwrap();

        let next = open(&board, (0, 0));

        assert!(next[(0, 1)].is_opened());
        assert_eq!(next[(0, 2)].state, TileState::Flagged);
        assert_eq!(next[(0, 3)].state, TileState::Hidden);
    }

    #[test]
    fn flood_never_opens_mines() {
        let board = layout((5, 5), &[(2, 2), (4, 0)]);

        let next = open(&board, (0, 0));

        assert!(next.exploded_mine().is_none());
        assert_eq!(next.opened_count(), 23);
    }

    #[test]
    fn opening_clears_stale_estimate() {
        let mut board = layout((1, 2), &[(0, 1)]);
        board.tiles_mut()[[0, 0]].mine_probability = Some(40);

        let next = open(&board, (0, 0));

        assert_eq!(next[(0, 0)].mine_probability, None);
    }
}
