use serde::Serialize;

/// Near-mine count reported by an exploded spot.
pub const EXPLODED_NEAR_MINES: u8 = u8::MAX;

/// Player-visible state of a single spot.
///
/// Mines are not representable here: picking a mine turns the spot straight into
/// [`ExploredSpot::Exploded`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ExploredSpot {
    Unexplored,
    Safe(u8),
    Flagged,
    Exploded,
}

impl ExploredSpot {
    /// Whether the content under the spot is still unknown to the player.
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unexplored | Self::Flagged)
    }

    pub const fn near_mine_count(self) -> Option<u8> {
        match self {
            Self::Safe(count) => Some(count),
            Self::Exploded => Some(EXPLODED_NEAR_MINES),
            Self::Unexplored | Self::Flagged => None,
        }
    }
}

impl Default for ExploredSpot {
    fn default() -> Self {
        Self::Unexplored
    }
}
