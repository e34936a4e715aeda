use core::time::Duration;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;

use crate::board::{Board, Transfer};
use crate::*;

/// A minefield that solver threads play on.
///
/// `pick` and `flag` are serialized per field: each one holds the interaction gate for its whole
/// duration, including the throttling delay. Queries only take the state lock for a moment, so a
/// rendering loop is never stalled by a throttled solver.
///
/// A fresh field may be copied once. Copying hands the right on to the copy only when asked to,
/// which keeps a solver from forking the field it plays on.
#[derive(Debug)]
pub struct Field {
    size: Size,
    mine_count: CellCount,
    delay: Duration,
    gate: Mutex<()>,
    board: RwLock<Board>,
}

impl Field {
    /// Scatters mines at random.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_generator(config, RandomMinefieldGenerator::new())
    }

    pub fn with_generator<G: MinefieldGenerator>(config: FieldConfig, generator: G) -> Self {
        let layout = generator.generate(&config);
        log::debug!(
            "New {}x{} field with {} mines, delay {:?}",
            config.size().0,
            config.size().1,
            layout.mine_count(),
            config.delay()
        );
        Self::from_layout(layout, config.delay())
    }

    pub fn from_layout(layout: MineLayout, delay: Duration) -> Self {
        Self::assemble(Board::new(layout), delay)
    }

    /// Deep copy of `source`, keeping its delay. See [`Field::copy_with_delay`].
    pub fn copy_from(source: &Field, keep_transferable: bool) -> Result<Self> {
        Self::copy_with_delay(source, source.delay, keep_transferable)
    }

    /// Deep copy of `source` including its exploration progress.
    ///
    /// Consumes the right of `source` to be copied; fails with [`FieldError::CopyForbidden`] when
    /// it was already consumed. The copy may be copied again only if `keep_transferable` is set.
    pub fn copy_with_delay(
        source: &Field,
        delay: Duration,
        keep_transferable: bool,
    ) -> Result<Self> {
        let board = source
            .write_board()
            .duplicate(Transfer::from_grant(keep_transferable))
            .inspect_err(|_| log::warn!("Rejected copy of a non-transferable field"))?;
        log::debug!(
            "Copied {}x{} field, transferable copy: {}",
            source.size.0,
            source.size.1,
            keep_transferable
        );
        Ok(Self::assemble(board, delay))
    }

    /// Like [`Field::copy_with_delay`] with the delay in signed milliseconds.
    ///
    /// A negative delay fails with [`FieldError::NegativeDelay`] and leaves `source` copyable.
    pub fn copy_with_delay_millis(
        source: &Field,
        millis: i64,
        keep_transferable: bool,
    ) -> Result<Self> {
        Self::copy_with_delay(source, delay_from_millis(millis)?, keep_transferable)
    }

    fn assemble(board: Board, delay: Duration) -> Self {
        Self {
            size: board.size(),
            mine_count: board.mine_count(),
            delay,
            gate: Mutex::new(()),
            board: RwLock::new(board),
        }
    }

    /// Opens a spot, flooding outwards from zero spots.
    ///
    /// Out-of-range or flagged spots are ignored, as is everything after the end of the game.
    pub fn pick(&self, row: Coord, col: Coord) -> PickOutcome {
        let _gate = self.lock_gate();

        let refusal = self.read_board().pick_refusal((row, col));
        if let Some(outcome) = refusal {
            return outcome;
        }

        self.throttle();
        let outcome = self.write_board().pick((row, col));
        match outcome {
            PickOutcome::Exploded => log::debug!("Mine hit at ({}, {})", row, col),
            PickOutcome::Won => log::debug!("Field cleared by pick at ({}, {})", row, col),
            _ => {}
        }
        outcome
    }

    /// Flags an unexplored spot or takes an existing flag back.
    pub fn flag(&self, row: Coord, col: Coord) -> FlagOutcome {
        let _gate = self.lock_gate();

        if !self.read_board().accepts_flag((row, col)) {
            return FlagOutcome::NoChange;
        }

        self.throttle();
        self.write_board().toggle_flag((row, col))
    }

    fn throttle(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    pub fn rows(&self) -> usize {
        self.size.0
    }

    pub fn cols(&self) -> usize {
        self.size.1
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn area(&self) -> CellCount {
        area(self.size)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_transferable(&self) -> bool {
        self.read_board().is_transferable()
    }

    pub fn is_out_of_range(&self, row: Coord, col: Coord) -> bool {
        is_out_of_range((row, col), self.size)
    }

    /// Fails with [`FieldError::OutOfRange`] on coordinates outside of the field.
    pub fn explored_spot(&self, row: Coord, col: Coord) -> Result<ExploredSpot> {
        self.read_board().spot_at((row, col))
    }

    pub fn is_ended(&self) -> bool {
        self.read_board().is_ended()
    }

    pub fn is_won(&self) -> bool {
        self.read_board().is_won()
    }

    pub fn explored_area_size(&self) -> CellCount {
        self.read_board().explored_area_size()
    }

    /// Flags sitting on mines, `None` while the game is still on.
    pub fn correctly_identified_mine_count(&self) -> Option<CellCount> {
        self.read_board().correctly_identified_mine_count()
    }

    /// Flags sitting on safe spots, `None` while the game is still on.
    pub fn incorrectly_identified_mine_count(&self) -> Option<CellCount> {
        self.read_board().incorrectly_identified_mine_count()
    }

    pub fn last_touched(&self) -> Option<Coord2> {
        self.read_board().last_touched()
    }

    pub fn last_row(&self) -> Option<Coord> {
        self.last_touched().map(|(row, _)| row)
    }

    pub fn last_col(&self) -> Option<Coord> {
        self.last_touched().map(|(_, col)| col)
    }

    pub fn observe(&self) -> Observation {
        Observation::from_board(&self.read_board())
    }

    // Board updates are never interrupted halfway, so a poisoned lock still guards a consistent
    // board.
    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_board(&self) -> RwLockReadGuard<'_, Board> {
        self.board.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_board(&self) -> RwLockWriteGuard<'_, Board> {
        self.board.write().unwrap_or_else(PoisonError::into_inner)
    }
}
