use sweepfield_core::FieldError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid match configuration: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("Could not read match configuration")]
    Io(#[from] std::io::Error),
    #[error("Could not parse match configuration")]
    Parse(#[from] toml::de::Error),
    #[error("Solver {0} did not terminate at the end of the game")]
    SolverDidNotTerminate(String),
    #[error("Solver {0} panicked")]
    SolverPanicked(String),
}

pub type Result<T> = core::result::Result<T, MatchError>;
