use core::time::Duration;

use serde::Serialize;
use sweepfield_core::{CellCount, Field};

/// What a solver left behind on its field once a round is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub ended: bool,
    pub won: bool,
    pub explored: CellCount,
    pub correct_flags: Option<CellCount>,
    pub incorrect_flags: Option<CellCount>,
}

impl Standing {
    pub fn of(field: &Field) -> Self {
        let observation = field.observe();
        Self {
            ended: observation.ended,
            won: observation.won,
            explored: observation.explored_area_size,
            correct_flags: field.correctly_identified_mine_count(),
            incorrect_flags: field.incorrectly_identified_mine_count(),
        }
    }
}

/// Scoring policy applied to both players of a round.
pub trait Scorer {
    fn score_round(
        &self,
        own: &Standing,
        own_time: Duration,
        rival: &Standing,
        rival_time: Duration,
    ) -> u32;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultScorer;

impl DefaultScorer {
    const WIN: u32 = 100;
    const FASTER_WIN: u32 = 90;
    const SLOWER_WIN: u32 = 80;
    const MAX_EXPLORE: u32 = 40;
    const MAX_FLAGS: u32 = 20;

    fn explore_score(own: CellCount, rival: CellCount) -> u32 {
        if rival == 0 {
            return Self::MAX_EXPLORE;
        }
        let ratio = (20 * own as u64) / rival as u64;
        ratio.min(Self::MAX_EXPLORE as u64) as u32
    }

    fn flag_score(standing: &Standing) -> u32 {
        match (standing.correct_flags, standing.incorrect_flags) {
            (Some(_), Some(0)) => Self::MAX_FLAGS,
            (Some(correct), Some(incorrect)) => {
                let ratio = (10 * correct as u64) / (incorrect as u64 * 10);
                ratio.min(Self::MAX_FLAGS as u64) as u32
            }
            // the game never ended, so flags cannot be judged
            _ => 0,
        }
    }
}

impl Scorer for DefaultScorer {
    fn score_round(
        &self,
        own: &Standing,
        own_time: Duration,
        rival: &Standing,
        rival_time: Duration,
    ) -> u32 {
        match (own.won, rival.won) {
            (true, false) => Self::WIN,
            (false, true) => 0,
            (true, true) if own_time < rival_time => Self::FASTER_WIN,
            (true, true) => Self::SLOWER_WIN,
            (false, false) => {
                Self::explore_score(own.explored, rival.explored) + Self::flag_score(own)
            }
        }
    }
}
