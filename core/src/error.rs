use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum FieldError {
    #[error("A field needs at least one row and one column")]
    EmptyField,
    #[error("Mine ratio {0} is outside of [0, 1]")]
    InvalidMineRatio(f64),
    #[error("Interaction delay cannot be negative ({0}ms)")]
    NegativeDelay(i64),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Coordinates ({row}, {col}) are outside of the field")]
    OutOfRange { row: Coord, col: Coord },
    #[error("The source field cannot be copied further")]
    CopyForbidden,
}

pub type Result<T> = core::result::Result<T, FieldError>;
