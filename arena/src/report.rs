use core::fmt;

use serde::Serialize;

use crate::*;

/// How one solver fared in one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerRound {
    pub standing: Standing,
    pub elapsed_ms: u64,
    pub score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub one: PlayerRound,
    pub two: PlayerRound,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchReport {
    pub solver_one: String,
    pub solver_two: String,
    pub rows: usize,
    pub cols: usize,
    pub mine_ratio: f64,
    pub mine_count: usize,
    pub rounds: Vec<RoundReport>,
}

impl MatchReport {
    pub fn score_one(&self) -> u32 {
        self.rounds.iter().map(|round| round.one.score).sum()
    }

    pub fn score_two(&self) -> u32 {
        self.rounds.iter().map(|round| round.two.score).sum()
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Field {}x{} with {} mines (ratio {})",
            self.rows, self.cols, self.mine_count, self.mine_ratio
        )?;
        for round in &self.rounds {
            writeln!(
                f,
                "  round {}: {} {} in {}ms, {} {} in {}ms",
                round.round,
                self.solver_one,
                round.one.score,
                round.one.elapsed_ms,
                self.solver_two,
                round.two.score,
                round.two.elapsed_ms,
            )?;
        }
        write!(
            f,
            "Match between {} and {} score: {}/{}",
            self.solver_one,
            self.solver_two,
            self.score_one(),
            self.score_two()
        )
    }
}
