use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// A single game from the first click to a win or loss.
///
/// The board snapshot is replaced wholesale on every accepted action, a failing action leaves
/// the game exactly as it was.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    board: Option<Board>,
    turn: u32,
    state: GameState,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            board: None,
            turn: 0,
            state: Default::default(),
        }
    }

    pub fn from_difficulty(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty.config(), seed)
    }

    /// Resumes a shared game, returning it with the elapsed seconds stored in the link.
    pub fn load(text: &str) -> Result<(Self, u32)> {
        let (board, elapsed_secs) = decode(text)?;
        // opened mines are not kept in the link, so a loaded game is never lost
        let state = if board.all_safe_opened() {
            GameState::Won
        } else {
            GameState::InProgress
        };

        let game = Self {
            config: GameConfig::new_unchecked(board.size(), board.mine_count()),
            seed: 0,
            board: Some(board),
            turn: 0,
            state,
        };
        Ok((game, elapsed_secs))
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Current snapshot, `None` until the first reveal lays the mines.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn mines_left(&self) -> isize {
        let flags = self.board.as_ref().map_or(0, Board::flag_count);
        (self.config.mines as isize) - (flags as isize)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        let turn = self.turn + 1;
        let next = match &self.board {
            None => generate(self.config, coords, self.seed, Turn::At(turn))?,
            Some(board) if board[coords].is_opened() => return Ok(RevealOutcome::NoChange),
            Some(board) => infer(&board.open(coords)?, Turn::At(turn))?,
        };

        let outcome = if next[coords].mine {
            self.state = GameState::Lost;
            RevealOutcome::HitMine
        } else if next.all_safe_opened() {
            self.state = GameState::Won;
            RevealOutcome::Won
        } else {
            self.state = GameState::InProgress;
            RevealOutcome::Revealed
        };
        if self.state.is_finished() {
            log::debug!("Game ended {:?} on turn {}", self.state, turn);
        }

        self.turn = turn;
        self.board = Some(next);
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;
        let board = self.board.as_ref().ok_or(GameError::NotStarted)?;

        if board[coords].is_opened() {
            return Ok(MarkOutcome::NoChange);
        }

        let turn = self.turn + 1;
        let next = infer(&board.toggle_flag(coords)?, Turn::At(turn))?;
        self.turn = turn;
        self.board = Some(next);
        Ok(MarkOutcome::Changed)
    }

    /// Throws away every estimate and converges again from the current tiles.
    pub fn recalculate(&mut self) -> Result<()> {
        let board = self.board.as_ref().ok_or(GameError::NotStarted)?;
        self.board = Some(infer(board, Turn::Fresh)?);
        Ok(())
    }

    pub fn share(&self, elapsed_secs: u32) -> Result<String> {
        let board = self.board.as_ref().ok_or(GameError::NotStarted)?;
        Ok(encode(board, elapsed_secs))
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
