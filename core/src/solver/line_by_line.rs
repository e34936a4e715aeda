use super::*;

/// Picks every spot column by column. Only wins on fields without mines.
#[derive(Clone, Debug, Default)]
pub struct LineByLineSolver;

impl Solver for LineByLineSolver {
    fn name(&self) -> &str {
        "line-by-line"
    }

    fn solve(&mut self, field: &Field) {
        for col in 0..field.cols() as Coord {
            for row in 0..field.rows() as Coord {
                if field.is_ended() {
                    return;
                }
                field.pick(row, col);
            }
        }
    }
}
