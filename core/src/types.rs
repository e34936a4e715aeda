use ndarray::Array2;

/// Single coordinate axis. Signed so that callers can probe past the edges of a field.
pub type Coord = isize;

/// Count type used for mine counts and cell counts.
pub type CellCount = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Field dimensions `(rows, cols)`.
pub type Size = (usize, usize);

/// Conversion of in-range field coordinates into an `ndarray` index.
pub trait ToNdIndex {
    fn to_nd_index(self) -> [usize; 2];
}

impl ToNdIndex for Coord2 {
    /// Only meaningful for coordinates that passed [`is_out_of_range`].
    fn to_nd_index(self) -> [usize; 2] {
        [self.0 as usize, self.1 as usize]
    }
}

pub const fn is_out_of_range((row, col): Coord2, (rows, cols): Size) -> bool {
    row < 0 || col < 0 || row as usize >= rows || col as usize >= cols
}

pub const fn area((rows, cols): Size) -> CellCount {
    rows.saturating_mul(cols)
}

/// Neighbour lookup on any grid shaped like a field.
pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        NeighborIter::new(center, self.dim())
    }
}

/// Moore neighbourhood offsets, row-major.
const NEIGHBOR_OFFSETS: [Coord2; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterates the in-range Moore neighbourhood of a cell, the cell itself excluded.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Size,
    offsets: core::slice::Iter<'static, Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Size) -> Self {
        Self {
            center,
            bounds,
            offsets: NEIGHBOR_OFFSETS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (row, col) = self.center;
        let bounds = self.bounds;
        self.offsets.find_map(|&(d_row, d_col)| {
            let shifted = (row.checked_add(d_row)?, col.checked_add(d_col)?);
            (!is_out_of_range(shifted, bounds)).then_some(shifted)
        })
    }
}
