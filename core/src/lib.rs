use core::time::Duration;
use serde::Serialize;

pub use error::*;
pub use field::*;
pub use generator::*;
pub use layout::*;
pub use observation::*;
pub use solver::*;
pub use spot::*;
pub use types::*;

mod board;
mod error;
mod field;
mod generator;
mod layout;
mod observation;
mod solver;
mod spot;
mod types;

/// Validated parameters of a freshly generated field.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FieldConfig {
    size: Size,
    mine_ratio: f64,
    delay: Duration,
}

impl FieldConfig {
    pub fn new(rows: usize, cols: usize, mine_ratio: f64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::EmptyField);
        }
        if !(0.0..=1.0).contains(&mine_ratio) {
            return Err(FieldError::InvalidMineRatio(mine_ratio));
        }
        Ok(Self {
            size: (rows, cols),
            mine_ratio,
            delay: Duration::ZERO,
        })
    }

    pub const fn with_delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    pub fn with_delay_millis(self, millis: i64) -> Result<Self> {
        Ok(self.with_delay(delay_from_millis(millis)?))
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    pub const fn mine_ratio(&self) -> f64 {
        self.mine_ratio
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    /// `round(rows * cols * mine_ratio)`, never more than the area.
    pub fn mine_count(&self) -> CellCount {
        let total = self.total_cells();
        let mines = (total as f64 * self.mine_ratio).round() as CellCount;
        mines.min(total)
    }
}

/// Interaction delay from signed milliseconds, rejecting negative values.
pub(crate) fn delay_from_millis(millis: i64) -> Result<Duration> {
    let millis = u64::try_from(millis).map_err(|_| FieldError::NegativeDelay(millis))?;
    Ok(Duration::from_millis(millis))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PickOutcome {
    /// Out of range or flagged, nothing happened.
    NoChange,
    Revealed,
    Exploded,
    Won,
    /// The game was over before the call.
    AlreadyEnded,
}

impl PickOutcome {
    pub const fn has_update(self) -> bool {
        use PickOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
            AlreadyEnded => false,
        }
    }

    /// Whether there is any reason to keep picking.
    pub const fn ends_game(self) -> bool {
        matches!(self, Self::Exploded | Self::Won | Self::AlreadyEnded)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}
