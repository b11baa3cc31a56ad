use std::fmt::Write;

use minesweep_core::*;

/// Terminal side of the observer contract: collects what happened during a
/// command so the session can report it after redrawing.
#[derive(Debug)]
pub struct TermView {
    cols: Coord,
    opened: usize,
    /// Set once a mine went off, the reveals that follow are the disclosure
    lost: bool,
    messages: Vec<String>,
}

impl TermView {
    pub fn new(cols: Coord) -> Self {
        Self {
            cols,
            opened: 0,
            lost: false,
            messages: Vec::new(),
        }
    }

    /// Prepares the view for a new board `cols` wide
    pub fn reset(&mut self, cols: Coord) {
        *self = Self::new(cols);
    }

    /// Messages gathered since the last call, oldest first
    pub fn take_messages(&mut self) -> Vec<String> {
        let opened = std::mem::take(&mut self.opened);
        let mut messages = std::mem::take(&mut self.messages);
        if opened > 1 {
            messages.insert(0, format!("Opened {opened} cells"));
        }
        messages
    }
}

impl GameObserver for TermView {
    fn on_mine_hit(&mut self, index: CellIndex) {
        let (row, col) = index_to_coords(index, self.cols);
        self.opened = 0;
        self.lost = true;
        self.messages
            .push(format!("Boom! Mine at row {row}, column {col}. Game over."));
    }

    fn on_cell_revealed(&mut self, _index: CellIndex) {
        if !self.lost {
            self.opened += 1;
        }
    }

    fn on_win(&mut self) {
        self.messages.push("All safe cells cleared, you win!".to_owned());
    }

    fn on_state_changed(&mut self, index: CellIndex, state: CellState) {
        log::debug!("Cell {} is now {:?}", index, state);
    }
}

pub fn cell_glyph(cell: Cell) -> char {
    match cell.state() {
        CellState::Idle => '.',
        CellState::Flagged => 'F',
        CellState::Questioned => '?',
        CellState::Revealed if cell.is_mine() => '*',
        CellState::Revealed => match cell.adjacent_mines() {
            0 => ' ',
            count => char::from(b'0' + count),
        },
    }
}

/// Board with row and column headers.
pub fn render_board(board: &Board) -> String {
    let (rows, cols) = board.size();
    let mut out = String::from("   ");
    for col in 0..cols {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');
    for row in 0..rows {
        let _ = write!(out, "{row:>3}");
        for col in 0..cols {
            let _ = write!(out, "{:>3}", cell_glyph(board.cell_at((row, col))));
        }
        out.push('\n');
    }
    out
}

pub fn render_status<O: GameObserver>(game: &Game<O>) -> String {
    let mode = match game.mode() {
        Mode::Reveal => "reveal",
        Mode::Flag => "flag",
    };
    let status = match game.status() {
        GameStatus::InProgress => "in progress",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    };
    format!(
        "mode: {mode} | mines left: {} | {status}",
        game.mines_left()
    )
}
