use ndarray::Array2;

use crate::board::Board;
use crate::*;

/// A consistent snapshot of everything a player may see on a field.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub size: Size,
    pub mine_count: CellCount,
    pub spots: Array2<ExploredSpot>,
    pub last_touched: Option<Coord2>,
    pub explored_area_size: CellCount,
    pub ended: bool,
    pub won: bool,
}

impl Observation {
    pub(crate) fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            mine_count: board.mine_count(),
            spots: board.explored().clone(),
            last_touched: board.last_touched(),
            explored_area_size: board.explored_area_size(),
            ended: board.is_ended(),
            won: board.is_won(),
        }
    }

    pub fn spot(&self, coords: Coord2) -> Option<ExploredSpot> {
        if is_out_of_range(coords, self.size) {
            None
        } else {
            Some(self.spots[coords.to_nd_index()])
        }
    }

    pub fn iter_spots(&self) -> impl Iterator<Item = (Coord2, ExploredSpot)> + '_ {
        self.spots
            .indexed_iter()
            .map(|((row, col), &spot)| ((row as Coord, col as Coord), spot))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// Neighbours of `coords` currently showing `spot`.
    pub fn neighbors_showing(&self, coords: Coord2, spot: ExploredSpot) -> Vec<Coord2> {
        self.iter_neighbors(coords)
            .filter(|&pos| self.spots[pos.to_nd_index()] == spot)
            .collect()
    }

    pub fn unexplored(&self) -> Vec<Coord2> {
        self.iter_spots()
            .filter(|&(_, spot)| spot == ExploredSpot::Unexplored)
            .map(|(coords, _)| coords)
            .collect()
    }
}
