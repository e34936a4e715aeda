use rand::prelude::*;

use super::*;

/// Scatters mines uniformly at random, drawing a fresh spot whenever the drawn one already holds a
/// mine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: Option<u64>,
}

impl RandomMinefieldGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: &FieldConfig) -> MineLayout {
        let size = config.size();
        let (rows, cols) = size;
        let mines = config.mine_count();
        let mut layout = MineLayout::empty(size);

        // optimize for full boards
        if mines >= config.total_cells() {
            for row in 0..rows {
                for col in 0..cols {
                    layout.place_mine((row as Coord, col as Coord));
                }
            }
            return layout;
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        let mut attempts: usize = 0;
        while layout.mine_count() < mines {
            let row = rng.random_range(0..rows) as Coord;
            let col = rng.random_range(0..cols) as Coord;
            layout.place_mine((row, col));
            attempts += 1;
        }

        log::trace!(
            "Placed {} mines on {}x{} in {} draws",
            mines,
            rows,
            cols,
            attempts
        );
        layout
    }
}
