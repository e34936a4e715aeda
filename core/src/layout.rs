use ndarray::Array2;

use crate::*;

/// Hidden truth of a field: where the mines are and how many surround every spot.
///
/// Built once by a [`MinefieldGenerator`] and never changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    near_mines: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn empty(size: Size) -> Self {
        Self {
            mine_mask: Array2::default(size),
            near_mines: Array2::zeros(size),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(size: Size, mine_coords: &[Coord2]) -> Result<Self> {
        if area(size) == 0 {
            return Err(FieldError::EmptyField);
        }

        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            if is_out_of_range(coords, size) {
                return Err(FieldError::InvalidCoords);
            }
            layout.place_mine(coords);
        }

        Ok(layout)
    }

    /// Puts a mine on `coords` and bumps the near-mine count of each neighbour.
    ///
    /// Returns `false` without touching anything when a mine is already there.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let index = coords.to_nd_index();
        if self.mine_mask[index] {
            return false;
        }

        self.mine_mask[index] = true;
        self.mine_count += 1;
        for pos in self.iter_neighbors(coords) {
            self.near_mines[pos.to_nd_index()] += 1;
        }
        true
    }

    pub fn size(&self) -> Size {
        self.mine_mask.dim()
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn is_out_of_range(&self, coords: Coord2) -> bool {
        is_out_of_range(coords, self.size())
    }

    /// Panics on out-of-range coordinates.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask[coords.to_nd_index()]
    }

    /// Panics on out-of-range coordinates.
    pub fn near_mine_count(&self, coords: Coord2) -> u8 {
        self.near_mines[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}
