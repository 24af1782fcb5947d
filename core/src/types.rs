use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`. Board sizes use the same shape, `(rows, cols)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major linear index of `(row, col)` on a board `width` columns wide.
pub const fn index_of((row, col): Coord2, width: Coord) -> usize {
    row as usize * width as usize + col as usize
}

/// Inverse of [`index_of`].
pub const fn coord_of(index: usize, width: Coord) -> Coord2 {
    let width = width as usize;
    ((index / width) as Coord, (index % width) as Coord)
}

/// All in-bounds coordinates within Chebyshev distance `radius` of `center`, row-major.
///
/// `radius = 1` is the usual 8-neighborhood, `radius = 2` with `include_self` is the
/// 5x5 block kept clear around the first click.
pub fn neighbors(center: Coord2, size: Coord2, radius: u8, include_self: bool) -> NeighborIter {
    NeighborIter::with_radius(center, size, radius, include_self)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0 as Coord, dim.1 as Coord);
        NeighborIter::new(index, size)
    }
}

pub trait NeighborCellIterExt<T>: NeighborIterExt {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)>;

    fn iter_neighbor_cells(&self, index: Coord2) -> impl Iterator<Item = T> {
        self.iter_neighbor_cells_with_index(index)
            .map(|(_, cell)| cell)
    }
}

impl<T: Copy> NeighborCellIterExt<T> for Array2<T> {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)> {
        self.iter_neighbors(index)
            .map(|index| (index, self[index.to_nd_index()]))
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i16, i16), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = i16::from(row) + d_row;
    if next_row < 0 || next_row >= i16::from(max_row) {
        return None;
    }

    let next_col = i16::from(col) + d_col;
    if next_col < 0 || next_col >= i16::from(max_col) {
        return None;
    }

    Some((next_row as Coord, next_col as Coord))
}

#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    radius: i16,
    include_self: bool,
    delta: (i16, i16),
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self::with_radius(center, bounds, 1, false)
    }

    fn with_radius(center: Coord2, bounds: Coord2, radius: u8, include_self: bool) -> Self {
        let radius = i16::from(radius);
        Self {
            center,
            bounds,
            radius,
            include_self,
            delta: (-radius, -radius),
        }
    }

    fn advance(&mut self) {
        if self.delta.1 < self.radius {
            self.delta.1 += 1;
        } else {
            self.delta = (self.delta.0 + 1, -self.radius);
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.delta.0 > self.radius {
                return None;
            }

            let delta = self.delta;
            self.advance();

            if delta == (0, 0) && !self.include_self {
                continue;
            }

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
