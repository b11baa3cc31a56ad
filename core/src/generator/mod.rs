use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that builds a board with its mines placed.
pub trait MineGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board>;
}
