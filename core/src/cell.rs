/// Player-visible interaction state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellState {
    Idle,
    Flagged,
    Questioned,
    Revealed,
}

impl CellState {
    /// Next mark in the flag-mode cycle, `None` once revealed.
    pub const fn next_mark(self) -> Option<Self> {
        use CellState::*;
        match self {
            Idle => Some(Flagged),
            Flagged => Some(Questioned),
            Questioned => Some(Idle),
            Revealed => None,
        }
    }

    /// Whether the player has put a flag or question mark on the cell
    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Flagged | Self::Questioned)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Idle
    }
}

/// One grid position.
///
/// The mine flag and adjacency count are only written while the board places
/// mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    is_mine: bool,
    adjacent_mines: u8,
    state: CellState,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    /// A safe cell with no mines around it
    pub const fn is_empty(&self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn increment_adjacent(&mut self) {
        self.adjacent_mines += 1;
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}
