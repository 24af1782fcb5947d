#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use cascade::open;
pub use codec::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod board;
mod cascade;
mod codec;
mod error;
mod game;
mod generator;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.min(mult(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Checks that the mines fit outside the safe zone around `first`.
    pub fn validate(&self, first: Coord2) -> Result<()> {
        let first = self.validate_coords(first)?;
        let safe_zone = neighbors(first, self.size, SAFE_ZONE_RADIUS, true).count() as CellCount;
        let capacity = self.total_cells() - safe_zone;
        if self.mines > capacity {
            Err(GameError::TooManyMines {
                requested: self.mines,
                capacity,
            })
        } else {
            Ok(())
        }
    }
}

/// Preset board sizes and mine densities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// `(rows, cols)`
    pub const fn size(self) -> Coord2 {
        match self {
            Self::Easy => (13, 8),
            Self::Medium => (16, 12),
            Self::Hard => (28, 20),
        }
    }

    pub const fn mine_percent(self) -> CellCount {
        match self {
            Self::Easy => 10,
            Self::Medium => 20,
            Self::Hard => 30,
        }
    }

    pub const fn config(self) -> GameConfig {
        let size = self.size();
        let mines = mult(size.0, size.1) * self.mine_percent() / 100;
        GameConfig::new_unchecked(size, mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_presets_floor_mine_share() {
        assert_eq!(Difficulty::Easy.config(), GameConfig::new((13, 8), 10));
        assert_eq!(Difficulty::Medium.config(), GameConfig::new((16, 12), 38));
        assert_eq!(Difficulty::Hard.config(), GameConfig::new((28, 20), 168));
    }

    #[test]
    fn new_clamps_size_and_mines() {
        let config = GameConfig::new((0, 4), 100);
        assert_eq!(config.size, (1, 4));
        assert_eq!(config.mines, 4);
    }

    #[test]
    fn validate_checks_safe_zone_capacity() {
        let config = GameConfig::new((9, 9), 56);
        assert_eq!(config.validate((4, 4)), Ok(()));
        // a corner click only clears 9 tiles
        assert_eq!(config.validate((0, 0)), Ok(()));

        let config = GameConfig::new((9, 9), 57);
        assert_eq!(
            config.validate((4, 4)),
            Err(GameError::TooManyMines {
                requested: 57,
                capacity: 56
            })
        );
        assert_eq!(config.validate((9, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn outcomes_report_updates() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::HitMine.has_update());
        assert!(MarkOutcome::Changed.has_update());
    }
}
