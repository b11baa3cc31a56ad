use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform placement by rejection sampling: draw an index, retry when it
/// already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        // a full board would never leave the sampling loop
        config.validate()?;

        let mut board = Board::empty(config.size())?;
        let total_cells = usize::from(config.total_cells());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut mines_placed = 0;
        let mut draws = 0u32;
        while mines_placed < config.mines {
            let index = rng.random_range(0..total_cells);
            draws += 1;
            if board.place_mine(index) {
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {:?} with seed {} after {} draws",
            mines_placed,
            config.size(),
            self.seed,
            draws
        );
        Ok(board)
    }
}
