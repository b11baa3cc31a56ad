use crate::*;

pub const DEFAULT_ROWS: Coord = 9;
pub const DEFAULT_COLS: Coord = 9;
pub const DEFAULT_MINES: CellCount = 10;

/// Board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// Rejects layouts the placement loop could never finish.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let total = self.total_cells();
        if self.mines >= total {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                total,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_ROWS, DEFAULT_COLS, DEFAULT_MINES)
    }
}
