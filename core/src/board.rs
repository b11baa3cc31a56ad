use alloc::collections::VecDeque;
use core::ops::BitOr;
use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Outcome of a reveal on the board
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// A mine was opened at the given index, nothing was changed for it
    HitMine(CellIndex),
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine(_) => true,
        }
    }
}

/// Used to merge outcomes when opening several neighbors
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // the first mine wins
            (HitMine(index), _) => HitMine(index),
            (_, HitMine(index)) => HitMine(index),
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Grid of cells with its mines already placed.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Board without mines, ready for a generator to place them
    pub fn empty((rows, cols): Coord2) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        Ok(Self {
            cells: Array2::default((usize::from(rows), usize::from(cols))),
            mine_count: 0,
            revealed_count: 0,
            flagged_count: 0,
        })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions always come from a `Coord2`
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        cell_count(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Whether every cell without a mine has been revealed
    pub fn all_safe_revealed(&self) -> bool {
        self.revealed_count >= self.safe_cells()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        let total = self.total_cells();
        if index < usize::from(total) {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex { index, total })
        }
    }

    pub fn coords(&self, index: CellIndex) -> Coord2 {
        index_to_coords(index, self.cols())
    }

    pub fn index(&self, coords: Coord2) -> CellIndex {
        coords_to_index(coords, self.cols())
    }

    pub fn cell(&self, index: CellIndex) -> Result<Cell> {
        let index = self.validate_index(index)?;
        Ok(*self.cell_ref(index))
    }

    /// Cell at `(row, col)`, panics when out of bounds
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[nd_index(coords)]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn mine_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(index, _)| index)
    }

    /// On-grid neighbors of `index` in compass order.
    pub fn neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> + use<> {
        neighbor_indices(index, self.size())
    }

    /// Marks `index` as a mine and bumps its neighbors' counts.
    ///
    /// Returns `false` without touching anything when the cell already holds a
    /// mine.
    pub(crate) fn place_mine(&mut self, index: CellIndex) -> bool {
        debug_assert!(self.validate_index(index).is_ok());
        if self.cell_ref(index).is_mine() {
            return false;
        }
        self.cell_mut(index).set_mine();
        for neighbor in self.neighbors(index) {
            self.cell_mut(neighbor).increment_adjacent();
        }
        self.mine_count += 1;
        true
    }

    /// Reveals a single cell, flood filling from it when it is empty.
    ///
    /// Flagged and questioned cells are left alone. A mine is reported through
    /// the outcome and left closed, ending the game is up to the caller.
    pub fn reveal<O: GameObserver + ?Sized>(
        &mut self,
        index: CellIndex,
        observer: &mut O,
    ) -> Result<RevealOutcome> {
        let index = self.validate_index(index)?;
        Ok(self.reveal_cell(index, observer))
    }

    /// Opens every idle neighbor of a revealed number once the flags around
    /// it match that number.
    ///
    /// A questioned neighbor blocks the whole chord. Flags are not checked for
    /// correctness, a misplaced flag lets a mine open.
    pub fn chord_open<O: GameObserver + ?Sized>(
        &mut self,
        index: CellIndex,
        observer: &mut O,
    ) -> Result<RevealOutcome> {
        use CellState::*;

        let index = self.validate_index(index)?;
        let cell = *self.cell_ref(index);
        if !cell.is_revealed() || cell.adjacent_mines() == 0 {
            return Ok(RevealOutcome::NoChange);
        }

        let neighbors: SmallVec<[CellIndex; 8]> = self.neighbors(index).collect();
        if neighbors
            .iter()
            .any(|&neighbor| self.cell_ref(neighbor).state() == Questioned)
        {
            log::trace!("Chord at {} blocked by a question mark", index);
            return Ok(RevealOutcome::NoChange);
        }

        let flagged = neighbors
            .iter()
            .filter(|&&neighbor| self.cell_ref(neighbor).state() == Flagged)
            .count();
        if flagged != usize::from(cell.adjacent_mines()) {
            log::trace!(
                "Chord at {} needs {} flags, found {}",
                index,
                cell.adjacent_mines(),
                flagged
            );
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for neighbor in neighbors {
            // an earlier neighbor may have flood filled this one already
            if self.cell_ref(neighbor).state() != Idle {
                continue;
            }
            outcome = outcome | self.reveal_cell(neighbor, observer);
            if matches!(outcome, RevealOutcome::HitMine(_)) {
                break;
            }
        }
        Ok(outcome)
    }

    /// Advances the flag/question mark cycle of a closed cell.
    ///
    /// Returns the new state, or `None` when the cell is already revealed.
    pub fn cycle_mark<O: GameObserver + ?Sized>(
        &mut self,
        index: CellIndex,
        observer: &mut O,
    ) -> Result<Option<CellState>> {
        let index = self.validate_index(index)?;
        let current = self.cell_ref(index).state();
        let Some(next) = current.next_mark() else {
            return Ok(None);
        };

        match (current, next) {
            (_, CellState::Flagged) => self.flagged_count += 1,
            (CellState::Flagged, _) => self.flagged_count -= 1,
            _ => {}
        }
        self.cell_mut(index).set_state(next);
        observer.on_state_changed(index, next);
        Ok(Some(next))
    }

    /// Reveals every remaining cell, mines and marked cells included.
    pub fn reveal_all<O: GameObserver + ?Sized>(&mut self, observer: &mut O) {
        for index in 0..usize::from(self.total_cells()) {
            let state = self.cell_ref(index).state();
            if state == CellState::Revealed {
                continue;
            }
            if state == CellState::Flagged {
                self.flagged_count -= 1;
            }
            self.cell_mut(index).set_state(CellState::Revealed);
            self.revealed_count += 1;
            observer.on_cell_revealed(index);
        }
    }

    fn reveal_cell<O: GameObserver + ?Sized>(
        &mut self,
        index: CellIndex,
        observer: &mut O,
    ) -> RevealOutcome {
        let cell = *self.cell_ref(index);
        if cell.state() != CellState::Idle {
            return RevealOutcome::NoChange;
        }
        if cell.is_mine() {
            log::debug!("Mine hit at {:?}", self.coords(index));
            return RevealOutcome::HitMine(index);
        }

        self.open_safe(index, observer);
        log::debug!(
            "Open cell at {:?}, mine count: {}",
            self.coords(index),
            cell.adjacent_mines()
        );
        if cell.is_empty() {
            self.flood_fill(index, observer);
        }
        RevealOutcome::Revealed
    }

    /// Opens the connected region of empty cells around `origin` plus the
    /// numbered cells bordering it. Marked cells stop the expansion.
    ///
    /// Only idle cells are opened and an empty cell is queued in the same step
    /// that opens it, so the revealed state is the membership test and no cell
    /// is queued twice.
    fn flood_fill<O: GameObserver + ?Sized>(&mut self, origin: CellIndex, observer: &mut O) {
        let mut pending = VecDeque::from([origin]);
        log::trace!("Starting flood-fill from {:?}", self.coords(origin));

        while let Some(index) = pending.pop_front() {
            for neighbor in self.neighbors(index) {
                let cell = *self.cell_ref(neighbor);
                // skip marked or already opened cells
                if cell.state() != CellState::Idle {
                    continue;
                }

                self.open_safe(neighbor, observer);
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    self.coords(neighbor),
                    cell.adjacent_mines()
                );

                if cell.is_empty() {
                    pending.push_back(neighbor);
                }
            }
        }
    }

    fn open_safe<O: GameObserver + ?Sized>(&mut self, index: CellIndex, observer: &mut O) {
        debug_assert!(!self.cell_ref(index).is_mine());
        self.cell_mut(index).set_state(CellState::Revealed);
        self.revealed_count += 1;
        observer.on_cell_revealed(index);
    }

    fn cell_ref(&self, index: CellIndex) -> &Cell {
        &self.cells[nd_index(self.coords(index))]
    }

    fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        let coords = self.coords(index);
        &mut self.cells[nd_index(coords)]
    }
}

fn nd_index((row, col): Coord2) -> [usize; 2] {
    [usize::from(row), usize::from(col)]
}
