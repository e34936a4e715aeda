use core::time::Duration;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use rand::prelude::*;
use sweepfield_core::{Field, RandomMinefieldGenerator};

use crate::*;

const POLL_INTERVAL: Duration = Duration::from_millis(1);
const GRACE_PERIOD: Duration = Duration::from_millis(10);

/// Plays two solvers against each other on identical copies of one field.
pub struct MatchRunner<S = DefaultScorer> {
    config: MatchConfig,
    scorer: S,
    rng: SmallRng,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self::with_scorer(config, DefaultScorer)
    }
}

impl<S: Scorer> MatchRunner<S> {
    pub fn with_scorer(config: MatchConfig, scorer: S) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self { config, scorer, rng }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn run(&mut self, one: SolverFactory, two: SolverFactory) -> Result<MatchReport> {
        self.config.validate()?;

        let rows = self.rng.random_range(self.config.row_range());
        let cols = self.rng.random_range(self.config.col_range());
        let mine_ratio = *self
            .config
            .mine_ratios
            .choose(&mut self.rng)
            .ok_or(MatchError::InvalidConfig("no mine ratio to choose from"))?;
        let field_config = self.config.field_config(rows, cols, mine_ratio)?;
        let generator = RandomMinefieldGenerator::seeded(self.rng.random());
        let mut template = Field::with_generator(field_config, generator);

        let mut report = MatchReport {
            solver_one: one().name().to_owned(),
            solver_two: two().name().to_owned(),
            rows,
            cols,
            mine_ratio,
            mine_count: template.mine_count(),
            rounds: Vec::with_capacity(self.config.rounds as usize),
        };
        log::info!(
            "Match between {} and {} on {rows}x{cols} with {} mines",
            report.solver_one,
            report.solver_two,
            report.mine_count
        );

        for round in 1..=self.config.rounds {
            let fields = [Arc::new(deal(&mut template)?), Arc::new(deal(&mut template)?)];
            let round_report = self.play_round(round, [one, two], fields)?;
            log::info!(
                "Round {round}: {} {}, {} {}",
                report.solver_one,
                round_report.one.score,
                report.solver_two,
                round_report.two.score
            );
            report.rounds.push(round_report);
        }

        Ok(report)
    }

    fn play_round(
        &mut self,
        round: u32,
        factories: [SolverFactory; 2],
        fields: [Arc<Field>; 2],
    ) -> Result<RoundReport> {
        let mut order = [0, 1];
        order.shuffle(&mut self.rng);

        let mut names = [String::new(), String::new()];
        let mut handles: [Option<JoinHandle<()>>; 2] = [None, None];
        let start = Instant::now();
        for player in order {
            let mut solver = factories[player]();
            names[player] = solver.name().to_owned();
            let field = Arc::clone(&fields[player]);
            let handle = thread::Builder::new()
                .name(format!("solver-{}-{}", player + 1, names[player]))
                .spawn(move || solver.solve(&field))?;
            handles[player] = Some(handle);
        }

        let budget = self.config.budget();
        let mut finished_at = [None; 2];
        loop {
            for player in 0..2 {
                let done = fields[player].is_ended()
                    || handles[player].as_ref().is_some_and(JoinHandle::is_finished);
                if finished_at[player].is_none() && done {
                    finished_at[player] = Some(start.elapsed());
                }
            }
            if finished_at.iter().all(Option::is_some) {
                break;
            }
            if start.elapsed() >= budget {
                log::warn!("Round {round} ran out of its {budget:?} budget");
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }

        let grace_end = Instant::now() + GRACE_PERIOD;
        while Instant::now() < grace_end
            && handles.iter().flatten().any(|handle| !handle.is_finished())
        {
            thread::sleep(POLL_INTERVAL);
        }

        for player in 0..2 {
            let Some(handle) = handles[player].take() else {
                continue;
            };
            if handle.is_finished() {
                handle
                    .join()
                    .map_err(|_| MatchError::SolverPanicked(names[player].clone()))?;
            } else if fields[player].is_ended() {
                return Err(MatchError::SolverDidNotTerminate(names[player].clone()));
            } else {
                // out of budget; the thread finishes on a field nobody reads anymore
                log::warn!("Abandoning {} on an unfinished field", names[player]);
            }
        }

        let standings = [Standing::of(&fields[0]), Standing::of(&fields[1])];
        let times = finished_at.map(|time| time.unwrap_or(budget));
        let player_round = |own: usize, rival: usize| PlayerRound {
            standing: standings[own],
            elapsed_ms: times[own].as_millis() as u64,
            score: self
                .scorer
                .score_round(&standings[own], times[own], &standings[rival], times[rival]),
        };

        Ok(RoundReport {
            round,
            one: player_round(0, 1),
            two: player_round(1, 0),
        })
    }
}

/// Hands out a copy that cannot be copied again and keeps `template` copyable for the next deal.
fn deal(template: &mut Field) -> Result<Field> {
    let dealt = Field::copy_from(template, true)?;
    *template = Field::copy_from(&dealt, true)?;
    Ok(dealt)
}

#[cfg(test)]
mod tests {
    use sweepfield_core::{FieldConfig, Solver};

    use super::*;

    fn small_config(mine_ratio: f64) -> MatchConfig {
        MatchConfig {
            min_rows: 5,
            max_rows: 8,
            min_cols: 5,
            max_cols: 8,
            mine_ratios: vec![mine_ratio],
            rounds: 2,
            budget_secs: 10,
            delay_ms: 0,
            seed: Some(11),
        }
    }

    struct Stubborn;

    impl Solver for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn solve(&mut self, field: &Field) {
            field.pick(0, 0);
            thread::sleep(Duration::from_millis(300));
        }
    }

    fn stubborn() -> Box<dyn Solver> {
        Box::new(Stubborn)
    }

    struct Clumsy;

    impl Solver for Clumsy {
        fn name(&self) -> &str {
            "clumsy"
        }

        fn solve(&mut self, _field: &Field) {
            panic!("clumsy solver tripped");
        }
    }

    fn clumsy() -> Box<dyn Solver> {
        Box::new(Clumsy)
    }

    #[test]
    fn dealt_fields_are_locked_and_identical() {
        let config = FieldConfig::new(6, 6, 0.2).unwrap();
        let mut template = Field::with_generator(config, RandomMinefieldGenerator::seeded(4));

        let first = deal(&mut template).unwrap();
        let second = deal(&mut template).unwrap();

        assert!(!first.is_transferable());
        assert!(!second.is_transferable());
        assert!(template.is_transferable());
        assert!(Field::copy_from(&first, false).is_err());

        // identical truths: the same pick sequence ends identically
        for row in 0..6 {
            for col in 0..6 {
                assert_eq!(first.pick(row, col), second.pick(row, col));
            }
        }
    }

    #[test]
    fn identical_solvers_score_identically() {
        let mut runner = MatchRunner::new(small_config(0.15));

        let report = runner
            .run(lookup_solver("line-by-line").unwrap(), lookup_solver("line-by-line").unwrap())
            .unwrap();

        assert_eq!(report.rounds.len(), 2);
        for round in &report.rounds {
            // line by line never flags, so both explode on the same mine
            assert!(!round.one.standing.won);
            assert_eq!(round.one.standing, round.two.standing);
            assert_eq!(round.one.score, 40);
            assert_eq!(round.two.score, 40);
        }
        assert_eq!(report.score_one(), report.score_two());
    }

    #[test]
    fn mine_free_field_is_won_by_both() {
        let mut runner = MatchRunner::new(small_config(0.0));

        let report = runner
            .run(lookup_solver("line-by-line").unwrap(), lookup_solver("neighbourhood").unwrap())
            .unwrap();

        for round in &report.rounds {
            assert!(round.one.standing.won);
            assert!(round.two.standing.won);
            assert!([80, 90].contains(&round.one.score));
            assert!([80, 90].contains(&round.two.score));
            assert!(round.one.score + round.two.score <= 170);
        }
    }

    #[test]
    fn seeded_matches_use_the_same_field() {
        let one = MatchRunner::new(small_config(0.15))
            .run(lookup_solver("line-by-line").unwrap(), lookup_solver("line-by-line").unwrap())
            .unwrap();
        let two = MatchRunner::new(small_config(0.15))
            .run(lookup_solver("line-by-line").unwrap(), lookup_solver("line-by-line").unwrap())
            .unwrap();

        assert_eq!((one.rows, one.cols, one.mine_count), (two.rows, two.cols, two.mine_count));
        assert_eq!(one.rounds[0].one.standing, two.rounds[0].one.standing);
    }

    #[test]
    fn solver_that_outlives_its_game_is_reported() {
        let mut runner = MatchRunner::new(small_config(0.0));

        let err = runner
            .run(stubborn, lookup_solver("line-by-line").unwrap())
            .unwrap_err();

        assert!(matches!(err, MatchError::SolverDidNotTerminate(name) if name == "stubborn"));
    }

    #[test]
    fn panicking_solver_is_reported() {
        let mut runner = MatchRunner::new(small_config(0.0));

        let err = runner
            .run(lookup_solver("line-by-line").unwrap(), clumsy)
            .unwrap_err();

        assert!(matches!(err, MatchError::SolverPanicked(name) if name == "clumsy"));
    }

    #[test]
    fn invalid_config_is_rejected_before_playing() {
        let mut config = small_config(0.1);
        config.rounds = 0;

        let err = MatchRunner::new(config)
            .run(lookup_solver("line-by-line").unwrap(), lookup_solver("line-by-line").unwrap())
            .unwrap_err();

        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }
}
