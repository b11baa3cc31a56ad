use alloc::vec::Vec;

use super::*;

/// Places mines at explicit indices.
///
/// Only the size of the config is used, the mine count of the resulting board
/// is the number of distinct indices.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<CellIndex>,
}

impl FixedMineGenerator {
    pub fn new(mines: Vec<CellIndex>) -> Self {
        Self { mines }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        let mut board = Board::empty(config.size())?;
        for &index in &self.mines {
            let index = board.validate_index(index)?;
            if !board.place_mine(index) {
                log::warn!("Duplicate mine at index {} ignored", index);
            }
        }

        if board.mine_count() >= board.total_cells() {
            return Err(GameError::TooManyMines {
                mines: board.mine_count(),
                total: board.total_cells(),
            });
        }
        Ok(board)
    }
}
