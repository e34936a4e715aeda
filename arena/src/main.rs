use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use sweepfield_arena::{MatchConfig, MatchRunner, SolverFactory, lookup_solver, solver_names};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Plays two minefield solvers against each other", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// TOML file with match settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rounds to play on the same field
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Wall-clock budget of a round in seconds
    #[arg(long)]
    budget_secs: Option<u64>,

    /// Delay of every pick and flag in milliseconds
    #[arg(long, allow_negative_numbers = true)]
    delay_ms: Option<i64>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    solver_one: String,

    solver_two: String,
}

impl Args {
    fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)
                .with_context(|| format!("Could not load {}", path.display()))?,
            None => MatchConfig::default(),
        };
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(budget_secs) = self.budget_secs {
            config.budget_secs = budget_secs;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn solver(name: &str) -> anyhow::Result<SolverFactory> {
    lookup_solver(name).with_context(|| {
        format!(
            "Unknown solver {name:?}, expected one of: {}",
            solver_names().collect::<Vec<_>>().join(", ")
        )
    })
}

fn init_logging(level: log::LevelFilter) {
    let level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let config = args.match_config()?;
    let one = solver(&args.solver_one)?;
    let two = solver(&args.solver_two)?;
    log::debug!("Match settings: {config:?}");

    let report = MatchRunner::new(config)
        .run(one, two)
        .context("Match could not be played")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
