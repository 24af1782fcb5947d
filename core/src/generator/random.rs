use alloc::vec::Vec;
use ndarray::Array2;
use smallvec::SmallVec;

use super::*;

/// Purely random placement that keeps the block around the starting tile clear.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        config.validate(self.start)?;
        let (rows, cols) = config.size;

        let safe_zone: SmallVec<[usize; 25]> =
            neighbors(self.start, config.size, SAFE_ZONE_RADIUS, true)
                .map(|coords| index_of(coords, cols))
                .collect();
        let mut pool: Vec<usize> = (0..usize::from(config.total_cells()))
            .filter(|index| !safe_zone.contains(index))
            .collect();

        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..config.mines {
            let index = pool.swap_remove(rng.random_range(0..pool.len()));
            mines[coord_of(index, cols).to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on {}x{} avoiding {} tiles around {:?}",
            config.mines,
            rows,
            cols,
            safe_zone.len(),
            self.start
        );
        Ok(Board::from_mine_mask(&mines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_outside_safe_zone() {
        let config = GameConfig::new((9, 9), 40);
        for seed in 0..20 {
            let board = RandomBoardGenerator::new(seed, (4, 4))
                .generate(config)
                .unwrap();

            assert_eq!(board.mine_count(), 40);
            assert!(neighbors((4, 4), (9, 9), SAFE_ZONE_RADIUS, true).all(|pos| !board[pos].mine));
            assert_eq!(board.opened_count(), 0);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = Difficulty::Medium.config();
        let a = RandomBoardGenerator::new(7, (3, 5)).generate(config).unwrap();
        let b = RandomBoardGenerator::new(7, (3, 5)).generate(config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fills_every_tile_outside_safe_zone() {
        // 6x6 with a 3x3 corner zone leaves 27 tiles
        let config = GameConfig::new((6, 6), 27);
        let board = RandomBoardGenerator::new(1, (0, 0)).generate(config).unwrap();
        assert_eq!(board.mine_count(), 27);
    }

    #[test]
    fn rejects_more_mines_than_fit() {
        let config = GameConfig::new((6, 6), 28);
        let err = RandomBoardGenerator::new(1, (0, 0)).generate(config);
        assert_eq!(
            err,
            Err(GameError::TooManyMines {
                requested: 28,
                capacity: 27
            })
        );

        let config = GameConfig::new((5, 5), 1);
        let err = RandomBoardGenerator::new(1, (2, 2)).generate(config);
        assert!(matches!(err, Err(GameError::TooManyMines { capacity: 0, .. })));
    }

    #[test]
    fn rejects_start_outside_board() {
        let config = GameConfig::new((4, 4), 1);
        let err = RandomBoardGenerator::new(1, (0, 4)).generate(config);
        assert_eq!(err, Err(GameError::InvalidCoords));
    }

    #[test]
    fn generate_opens_first_click_and_estimates() {
        let config = Difficulty::Easy.config();
        let board = generate(config, (6, 4), 99, Turn::At(1)).unwrap();

        assert_eq!(board.mine_count(), config.mines);
        // the whole safe zone has zero mines so the click floods at least that far
        assert!(neighbors((6, 4), config.size, 1, true).all(|pos| board[pos].is_opened()));
        assert!(board.exploded_mine().is_none());
        assert!(board
            .iter()
            .filter(|(_, tile)| tile.mine_probability.is_some())
            .all(|(_, tile)| !tile.is_opened()));
    }
}
