use rand::prelude::*;

use super::*;

/// Plays the two textbook rules on every number and guesses when neither applies.
///
/// A number whose flags are all placed has its remaining neighbours picked; a number with exactly
/// as many unknown neighbours as its count has them all flagged.
#[derive(Clone, Debug)]
pub struct NeighbourhoodSolver {
    rng: SmallRng,
}

impl NeighbourhoodSolver {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Applies the first rule that fires. Returns whether anything was played.
    fn play_deduction(field: &Field, obs: &Observation) -> bool {
        for (coords, spot) in obs.iter_spots() {
            let ExploredSpot::Safe(count) = spot else {
                continue;
            };
            if count == 0 {
                continue;
            }

            let hidden = obs.neighbors_showing(coords, ExploredSpot::Unexplored);
            if hidden.is_empty() {
                continue;
            }
            let flagged = obs.neighbors_showing(coords, ExploredSpot::Flagged).len();

            if flagged == usize::from(count) {
                for (row, col) in hidden {
                    field.pick(row, col);
                }
                return true;
            }
            if flagged + hidden.len() == usize::from(count) {
                for (row, col) in hidden {
                    field.flag(row, col);
                }
                return true;
            }
        }
        false
    }

    /// Returns `false` when there is nothing left to try.
    fn play_guess(&mut self, field: &Field, obs: &Observation) -> bool {
        if let Some(&(row, col)) = obs.unexplored().choose(&mut self.rng) {
            field.pick(row, col);
            return true;
        }

        // every spot is open or flagged but the game goes on, so some flag is wrong
        let flags: Vec<_> = obs
            .iter_spots()
            .filter(|&(_, spot)| spot == ExploredSpot::Flagged)
            .map(|(coords, _)| coords)
            .collect();
        match flags.choose(&mut self.rng) {
            Some(&(row, col)) => {
                field.flag(row, col);
                true
            }
            None => false,
        }
    }
}

impl Default for NeighbourhoodSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for NeighbourhoodSolver {
    fn name(&self) -> &str {
        "neighbourhood"
    }

    fn solve(&mut self, field: &Field) {
        loop {
            let obs = field.observe();
            if obs.ended {
                return;
            }
            if !Self::play_deduction(field, &obs) && !self.play_guess(field, &obs) {
                log::warn!("{} found nothing left to play on a running field", self.name());
                return;
            }
        }
    }
}
