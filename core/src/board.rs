use ndarray::Array2;

use crate::*;

/// Permission of a field to be the source of a copy. Copying consumes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Transfer {
    Granted,
    Consumed,
}

impl Transfer {
    pub(crate) const fn from_grant(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Consumed }
    }

    pub(crate) fn take(&mut self) -> Result<()> {
        match self {
            Self::Granted => {
                *self = Self::Consumed;
                Ok(())
            }
            Self::Consumed => Err(FieldError::CopyForbidden),
        }
    }
}

/// Unsynchronized game state. [`Field`] serializes access to it.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    layout: MineLayout,
    explored: Array2<ExploredSpot>,
    explored_count: CellCount,
    flagged_count: CellCount,
    flagged_mine_count: CellCount,
    ended: bool,
    last_touched: Option<Coord2>,
    transfer: Transfer,
}

impl Board {
    pub(crate) fn new(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            explored: Array2::default(size),
            explored_count: 0,
            flagged_count: 0,
            flagged_mine_count: 0,
            ended: false,
            last_touched: None,
            transfer: Transfer::Granted,
        }
    }

    /// Consumes the transfer right and hands out a deep copy carrying `transfer`.
    ///
    /// Nobody has touched the copy yet, so it starts without a last touched spot.
    pub(crate) fn duplicate(&mut self, transfer: Transfer) -> Result<Self> {
        self.transfer.take()?;
        let mut copy = self.clone();
        copy.transfer = transfer;
        copy.last_touched = None;
        Ok(copy)
    }

    pub(crate) fn is_transferable(&self) -> bool {
        self.transfer == Transfer::Granted
    }

    pub(crate) fn size(&self) -> Size {
        self.layout.size()
    }

    pub(crate) fn mine_count(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub(crate) fn is_out_of_range(&self, coords: Coord2) -> bool {
        self.layout.is_out_of_range(coords)
    }

    pub(crate) fn spot_at(&self, coords: Coord2) -> Result<ExploredSpot> {
        if self.is_out_of_range(coords) {
            let (row, col) = coords;
            return Err(FieldError::OutOfRange { row, col });
        }
        Ok(self.explored[coords.to_nd_index()])
    }

    pub(crate) fn explored(&self) -> &Array2<ExploredSpot> {
        &self.explored
    }

    pub(crate) fn last_touched(&self) -> Option<Coord2> {
        self.last_touched
    }

    /// The outcome of a pick that will not reach the field, if any.
    pub(crate) fn pick_refusal(&self, coords: Coord2) -> Option<PickOutcome> {
        if self.is_ended() {
            Some(PickOutcome::AlreadyEnded)
        } else if self.is_out_of_range(coords)
            || self.explored[coords.to_nd_index()] == ExploredSpot::Flagged
        {
            Some(PickOutcome::NoChange)
        } else {
            None
        }
    }

    /// Whether a flag call would toggle anything.
    pub(crate) fn accepts_flag(&self, coords: Coord2) -> bool {
        !self.is_ended()
            && !self.is_out_of_range(coords)
            && self.explored[coords.to_nd_index()].is_unknown()
    }

    pub(crate) fn pick(&mut self, coords: Coord2) -> PickOutcome {
        if let Some(outcome) = self.pick_refusal(coords) {
            return outcome;
        }

        self.last_touched = Some(coords);

        if self.layout.contains_mine(coords) {
            self.explored[coords.to_nd_index()] = ExploredSpot::Exploded;
            self.explored_count += 1;
            self.ended = true;
            return PickOutcome::Exploded;
        }

        self.reveal_from(coords);

        if self.settle() {
            PickOutcome::Won
        } else {
            PickOutcome::Revealed
        }
    }

    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.accepts_flag(coords) {
            return FlagOutcome::NoChange;
        }

        let index = coords.to_nd_index();
        let has_mine = self.layout.contains_mine(coords);
        match self.explored[index] {
            ExploredSpot::Unexplored => {
                self.explored[index] = ExploredSpot::Flagged;
                self.flagged_count += 1;
                if has_mine {
                    self.flagged_mine_count += 1;
                }
            }
            ExploredSpot::Flagged => {
                self.explored[index] = ExploredSpot::Unexplored;
                self.flagged_count -= 1;
                if has_mine {
                    self.flagged_mine_count -= 1;
                }
            }
            ExploredSpot::Safe(_) | ExploredSpot::Exploded => return FlagOutcome::NoChange,
        }

        self.last_touched = Some(coords);

        if self.settle() {
            FlagOutcome::Won
        } else {
            FlagOutcome::Changed
        }
    }

    /// Opens `start` and floods outwards through every zero spot reached.
    ///
    /// Only unexplored spots are opened, so flags stop the flood and every spot is opened at most
    /// once.
    fn reveal_from(&mut self, start: Coord2) {
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let index = coords.to_nd_index();
            if self.explored[index] != ExploredSpot::Unexplored {
                continue;
            }

            let near_mines = self.layout.near_mine_count(coords);
            self.explored[index] = ExploredSpot::Safe(near_mines);
            self.explored_count += 1;

            if near_mines == 0 {
                to_visit.extend(
                    self.layout
                        .iter_neighbors(coords)
                        .filter(|pos| self.explored[pos.to_nd_index()] == ExploredSpot::Unexplored),
                );
            }
        }
    }

    /// Latches the ended flag once the game is won.
    fn settle(&mut self) -> bool {
        if self.is_won() {
            if !self.ended {
                log::debug!("Field won after touching {:?}", self.last_touched);
            }
            self.ended = true;
        }
        self.ended
    }

    pub(crate) fn is_ended(&self) -> bool {
        self.ended || self.is_won()
    }

    pub(crate) fn is_won(&self) -> bool {
        self.explored_count == self.layout.safe_cell_count()
            && self.flagged_mine_count == self.layout.mine_count()
    }

    pub(crate) fn explored_area_size(&self) -> CellCount {
        self.explored_count
    }

    #[cfg(test)]
    pub(crate) fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub(crate) fn correctly_identified_mine_count(&self) -> Option<CellCount> {
        self.is_ended().then_some(self.flagged_mine_count)
    }

    pub(crate) fn incorrectly_identified_mine_count(&self) -> Option<CellCount> {
        self.is_ended()
            .then_some(self.flagged_count - self.flagged_mine_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Size, mines: &[Coord2]) -> Board {
        Board::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    fn all_coords(size: Size) -> impl Iterator<Item = Coord2> {
        let (rows, cols) = size;
        (0..rows as Coord).flat_map(move |row| (0..cols as Coord).map(move |col| (row, col)))
    }

    #[test]
    fn single_pick_on_empty_field_opens_everything() {
        let mut board = board((5, 5), &[]);

        assert_eq!(board.pick((2, 3)), PickOutcome::Won);

        for coords in all_coords((5, 5)) {
            assert_eq!(board.spot_at(coords), Ok(ExploredSpot::Safe(0)));
        }
        assert_eq!(board.explored_area_size(), 25);
        assert!(board.is_won());
        assert!(board.is_ended());
    }

    #[test]
    fn picking_the_only_spot_of_a_full_field_explodes() {
        let mut board = board((1, 1), &[(0, 0)]);

        assert_eq!(board.pick((0, 0)), PickOutcome::Exploded);

        assert_eq!(board.spot_at((0, 0)), Ok(ExploredSpot::Exploded));
        assert!(board.is_ended());
        assert!(!board.is_won());
        assert_eq!(board.last_touched(), Some((0, 0)));
    }

    #[test]
    fn flood_fill_stops_at_numbers() {
        // . . . 1 *
        // . . . 1 1
        // . . . . .
        let mut board = board((3, 5), &[(0, 4)]);

        assert_eq!(board.pick((2, 0)), PickOutcome::Revealed);

        assert_eq!(board.spot_at((0, 3)), Ok(ExploredSpot::Safe(1)));
        assert_eq!(board.spot_at((1, 4)), Ok(ExploredSpot::Safe(1)));
        assert_eq!(board.spot_at((0, 4)), Ok(ExploredSpot::Unexplored));
        assert_eq!(board.explored_area_size(), 14);
        assert_eq!(board.last_touched(), Some((2, 0)));
    }

    #[test]
    fn numbered_pick_opens_a_single_spot() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.pick((1, 1)), PickOutcome::Revealed);

        assert_eq!(board.spot_at((1, 1)), Ok(ExploredSpot::Safe(1)));
        assert_eq!(board.explored_area_size(), 1);
    }

    #[test]
    fn flood_fill_is_complete_around_zero_spots() {
        let mines = [(0, 0), (3, 6), (6, 2), (5, 5), (1, 4)];
        let size = (7, 8);
        let mut board = board(size, &mines);

        for coords in all_coords(size) {
            if !mines.contains(&coords) {
                board.pick(coords);
            }
            let zeros = all_coords(size).filter(|&c| board.spot_at(c) == Ok(ExploredSpot::Safe(0)));
            for zero in zeros {
                for pos in board.layout.iter_neighbors(zero) {
                    assert_ne!(board.spot_at(pos), Ok(ExploredSpot::Unexplored));
                }
            }
        }
        assert_eq!(board.explored_area_size(), 7 * 8 - mines.len());
    }

    #[test]
    fn flood_fill_does_not_open_flags() {
        let mut board = board((3, 3), &[]);

        board.toggle_flag((2, 2));
        board.pick((0, 0));

        assert_eq!(board.spot_at((2, 2)), Ok(ExploredSpot::Flagged));
        assert_eq!(board.explored_area_size(), 8);
        assert!(!board.is_won());
    }

    #[test]
    fn flag_toggles_and_tracks_last_touched() {
        let mut board = board((4, 4), &[(3, 3)]);

        assert_eq!(board.toggle_flag((1, 2)), FlagOutcome::Changed);
        assert_eq!(board.spot_at((1, 2)), Ok(ExploredSpot::Flagged));
        assert_eq!(board.last_touched(), Some((1, 2)));

        assert_eq!(board.toggle_flag((1, 2)), FlagOutcome::Changed);
        assert_eq!(board.spot_at((1, 2)), Ok(ExploredSpot::Unexplored));
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn flag_on_safe_spot_is_ignored() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.pick((2, 2));
        board.pick((0, 1));

        assert_eq!(board.toggle_flag((2, 2)), FlagOutcome::NoChange);
        assert_eq!(board.spot_at((2, 2)), Ok(ExploredSpot::Safe(0)));
        assert_eq!(board.last_touched(), Some((0, 1)));
    }

    #[test]
    fn pick_on_flag_is_ignored() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.toggle_flag((0, 0));
        board.toggle_flag((1, 1));

        assert_eq!(board.pick((0, 0)), PickOutcome::NoChange);
        assert_eq!(board.spot_at((0, 0)), Ok(ExploredSpot::Flagged));
        assert_eq!(board.last_touched(), Some((1, 1)));
    }

    #[test]
    fn out_of_range_interactions_are_ignored() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.pick((-1, 0)), PickOutcome::NoChange);
        assert_eq!(board.pick((0, 3)), PickOutcome::NoChange);
        assert_eq!(board.toggle_flag((3, 0)), FlagOutcome::NoChange);
        assert_eq!(board.toggle_flag((Coord::MIN, Coord::MAX)), FlagOutcome::NoChange);
        assert_eq!(board.last_touched(), None);
        assert_eq!(
            board.spot_at((3, 1)),
            Err(FieldError::OutOfRange { row: 3, col: 1 })
        );
    }

    #[test]
    fn win_requires_every_mine_flagged() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.pick((0, 1));
        board.pick((1, 0));
        board.pick((1, 1));
        assert_eq!(board.explored_area_size(), 3);
        assert!(!board.is_won());
        assert!(!board.is_ended());

        assert_eq!(board.toggle_flag((0, 0)), FlagOutcome::Won);
        assert!(board.is_won());
        assert_eq!(board.correctly_identified_mine_count(), Some(1));
        assert_eq!(board.incorrectly_identified_mine_count(), Some(0));
    }

    #[test]
    fn nothing_changes_after_the_end() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.toggle_flag((2, 2));
        board.pick((0, 0));
        let ended = board.clone();

        assert_eq!(board.pick((1, 1)), PickOutcome::AlreadyEnded);
        assert_eq!(board.toggle_flag((2, 2)), FlagOutcome::NoChange);
        assert_eq!(board.toggle_flag((1, 2)), FlagOutcome::NoChange);

        assert_eq!(board.explored(), ended.explored());
        assert_eq!(board.last_touched(), Some((0, 0)));
    }

    #[test]
    fn identification_counts_stay_hidden_until_the_end() {
        let mut board = board((3, 3), &[(0, 0), (0, 2)]);
        board.toggle_flag((0, 0));
        board.toggle_flag((2, 2));

        assert_eq!(board.correctly_identified_mine_count(), None);
        assert_eq!(board.incorrectly_identified_mine_count(), None);

        board.pick((0, 2));

        assert_eq!(board.correctly_identified_mine_count(), Some(1));
        assert_eq!(board.incorrectly_identified_mine_count(), Some(1));
    }

    #[test]
    fn duplicate_consumes_the_transfer_right() {
        let mut source = board((3, 3), &[(1, 1)]);
        source.pick((0, 0));

        let copy = source.duplicate(Transfer::Consumed).unwrap();

        assert!(!source.is_transferable());
        assert!(!copy.is_transferable());
        assert_eq!(copy.explored(), source.explored());
        assert_eq!(source.last_touched(), Some((0, 0)));
        assert_eq!(copy.last_touched(), None);
        assert_eq!(
            source.duplicate(Transfer::Granted).unwrap_err(),
            FieldError::CopyForbidden
        );
    }
}
