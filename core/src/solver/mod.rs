use crate::*;
pub use line_by_line::*;
pub use neighbourhood::*;

mod line_by_line;
mod neighbourhood;

/// Something that plays a field until it ends or gives up.
///
/// A solver only ever sees the field it was handed and interacts with it through [`Field::pick`]
/// and [`Field::flag`]. It runs on its own thread and is expected to return once
/// [`Field::is_ended`] holds.
pub trait Solver: Send {
    fn name(&self) -> &str;

    fn solve(&mut self, field: &Field);
}
