//! Compact text form of a board used in share links.
//!
//! The format is `<width>-<elapsed seconds>-<tiles>`, where tiles are written row-major, one
//! symbol per tile, and every run of two or more equal symbols is shortened to
//! `<run length><symbol>`. Adjacency and estimates are not stored; both follow from the layout
//! and are rebuilt on decode.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::iter;

use ndarray::Array2;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileSymbol {
    FlaggedMine,
    HiddenMine,
    Opened,
    Flagged,
    Hidden,
}

impl TileSymbol {
    /// Opened tiles lose their mine bit, an exploded mine decodes as an ordinary opened tile.
    pub const fn of(tile: &Tile) -> Self {
        use TileSymbol::*;
        match (tile.mine, tile.state) {
            (_, TileState::Opened) => Opened,
            (true, TileState::Flagged) => FlaggedMine,
            (true, TileState::Hidden) => HiddenMine,
            (false, TileState::Flagged) => Flagged,
            (false, TileState::Hidden) => Hidden,
        }
    }

    pub const fn as_char(self) -> char {
        use TileSymbol::*;
        match self {
            FlaggedMine => 'X',
            HiddenMine => 'M',
            Opened => 'O',
            Flagged => 'F',
            Hidden => 'H',
        }
    }

    pub const fn from_char(ch: char) -> core::result::Result<Self, FormatError> {
        use TileSymbol::*;
        Ok(match ch {
            'X' => FlaggedMine,
            'M' => HiddenMine,
            'O' => Opened,
            'F' => Flagged,
            'H' => Hidden,
            other => return Err(FormatError::InvalidSymbol(other)),
        })
    }

    pub const fn to_tile(self) -> Tile {
        use TileSymbol::*;
        let (mine, state) = match self {
            FlaggedMine => (true, TileState::Flagged),
            HiddenMine => (true, TileState::Hidden),
            Opened => (false, TileState::Opened),
            Flagged => (false, TileState::Flagged),
            Hidden => (false, TileState::Hidden),
        };
        Tile {
            mine,
            state,
            adjacent: 0,
            mine_probability: None,
            last_updated_turn: None,
        }
    }
}

pub fn encode(board: &Board, elapsed_secs: u32) -> String {
    let mut out = String::new();
    out.push_str(&board.width().to_string());
    out.push('-');
    out.push_str(&elapsed_secs.to_string());
    out.push('-');

    let mut symbols = board
        .tiles()
        .iter()
        .map(|tile| TileSymbol::of(tile).as_char())
        .peekable();
    while let Some(symbol) = symbols.next() {
        let mut run = 1usize;
        while symbols.next_if_eq(&symbol).is_some() {
            run += 1;
        }
        if run > 1 {
            out.push_str(&run.to_string());
        }
        out.push(symbol);
    }

    out
}

/// Rebuilds a board and its elapsed seconds from [`encode`] output, with estimates converged
/// from scratch.
pub fn decode(text: &str) -> Result<(Board, u32)> {
    let fields: Vec<&str> = text.split('-').collect();
    let &[width, elapsed_secs, packed] = fields.as_slice() else {
        return Err(FormatError::FieldCount(fields.len()).into());
    };

    let width: Coord = width
        .parse()
        .ok()
        .filter(|&width| width > 0)
        .ok_or(FormatError::InvalidWidth)?;
    let elapsed_secs: u32 = elapsed_secs
        .parse()
        .map_err(|_| FormatError::InvalidSeconds)?;

    let width = usize::from(width);
    let symbols = expand(packed, width)?;
    let len = symbols.len();
    if len == 0 || len % width != 0 {
        return Err(FormatError::LengthMismatch { len, width }.into());
    }

    let tiles: Vec<Tile> = symbols.into_iter().map(TileSymbol::to_tile).collect();
    let tiles = Array2::from_shape_vec((len / width, width), tiles)
        .map_err(|_| FormatError::LengthMismatch { len, width })?;
    let board = infer(&Board::from_tiles(tiles), Turn::Fresh)?;

    log::debug!(
        "Decoded {:?} board with {} mines at {}s",
        board.size(),
        board.mine_count(),
        elapsed_secs
    );
    Ok((board, elapsed_secs))
}

/// Undoes the run-length step, refusing to grow past the tallest board of this width.
fn expand(packed: &str, width: usize) -> core::result::Result<Vec<TileSymbol>, FormatError> {
    let max_len = width * usize::from(Coord::MAX);
    let mut symbols = Vec::new();
    let mut pending_run: Option<usize> = None;

    for ch in packed.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let run = pending_run
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|run| run.checked_add(digit as usize))
                .filter(|&run| run <= max_len)
                .ok_or(FormatError::InvalidRunLength)?;
            pending_run = Some(run);
            continue;
        }

        let symbol = TileSymbol::from_char(ch)?;
        let run = pending_run.take().unwrap_or(1);
        if run == 0 {
            return Err(FormatError::InvalidRunLength);
        }
        if symbols.len() + run > max_len {
            return Err(FormatError::TooTall {
                height: (symbols.len() + run).div_ceil(width),
            });
        }
        symbols.extend(iter::repeat_n(symbol, run));
    }

    if pending_run.is_some() {
        return Err(FormatError::DanglingRunLength);
    }

    Ok(symbols)
}
