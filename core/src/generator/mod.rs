use crate::*;
pub use random::*;

mod random;

/// Radius of the square around the first click that is kept free of mines.
pub const SAFE_ZONE_RADIUS: u8 = 2;

/// Produces a mine layout; every tile of the result is still Hidden.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// Lays mines around the first click, opens it, and estimates probabilities for `turn`.
pub fn generate(config: GameConfig, first: Coord2, seed: u64, turn: Turn) -> Result<Board> {
    let layout = RandomBoardGenerator::new(seed, first).generate(config)?;
    let opened = layout.open(first)?;
    infer(&opened, turn)
}
