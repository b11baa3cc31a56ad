use crate::*;

/// What a single activation does to a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Reveal,
    Flag,
}

impl Mode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Reveal => Self::Flag,
            Self::Flag => Self::Reveal,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Reveal
    }
}

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// Every safe cell was revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome of activating a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActivateOutcome {
    NoChange,
    Revealed,
    /// Flag mode moved the cell to a new mark
    Marked(CellState),
    Won,
    Lost,
}

impl ActivateOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Game controller: owns the board, the interaction mode, and the win/loss
/// status, and reports every change to its observer.
#[derive(Clone, Debug)]
pub struct Game<O = ()> {
    board: Board,
    mode: Mode,
    status: GameStatus,
    triggered_mine: Option<CellIndex>,
    observer: O,
}

impl<O: GameObserver> Game<O> {
    pub fn new(board: Board, observer: O) -> Self {
        Self {
            board,
            mode: Default::default(),
            status: Default::default(),
            triggered_mine: None,
            observer,
        }
    }

    /// Builds the board with `generator` and starts a game on it
    pub fn generate<G: MineGenerator>(
        generator: G,
        config: BoardConfig,
        observer: O,
    ) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?, observer))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("Mode set to {:?}", mode);
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, index: CellIndex) -> Result<Cell> {
        self.board.cell(index)
    }

    /// The mine that ended the game, if it was lost
    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.board.flagged_count() as isize)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Discards the current board and starts over on `board`, keeping the mode
    pub fn new_game(&mut self, board: Board) {
        log::debug!(
            "New game on {:?} with {} mines",
            board.size(),
            board.mine_count()
        );
        self.board = board;
        self.status = GameStatus::InProgress;
        self.triggered_mine = None;
    }

    /// Entry point for player input.
    ///
    /// A double activation always attempts a chord, a single one reveals or
    /// cycles the mark depending on the mode. Nothing happens once the game
    /// has ended.
    pub fn activate_cell(&mut self, index: CellIndex, double: bool) -> Result<ActivateOutcome> {
        let index = self.board.validate_index(index)?;
        if double {
            return self.chord_open(index);
        }
        match self.mode {
            Mode::Reveal => self.reveal(index),
            Mode::Flag => self.cycle_mark(index),
        }
    }

    /// Reveal regardless of mode, marked cells absorb the activation
    pub fn reveal(&mut self, index: CellIndex) -> Result<ActivateOutcome> {
        if self.status.is_finished() {
            self.board.validate_index(index)?;
            return Ok(ActivateOutcome::NoChange);
        }
        let outcome = self.board.reveal(index, &mut self.observer)?;
        Ok(self.settle(outcome))
    }

    /// Flag mode step regardless of mode
    pub fn cycle_mark(&mut self, index: CellIndex) -> Result<ActivateOutcome> {
        if self.status.is_finished() {
            self.board.validate_index(index)?;
            return Ok(ActivateOutcome::NoChange);
        }
        Ok(match self.board.cycle_mark(index, &mut self.observer)? {
            Some(state) => ActivateOutcome::Marked(state),
            None => ActivateOutcome::NoChange,
        })
    }

    pub fn chord_open(&mut self, index: CellIndex) -> Result<ActivateOutcome> {
        if self.status.is_finished() {
            self.board.validate_index(index)?;
            return Ok(ActivateOutcome::NoChange);
        }
        let outcome = self.board.chord_open(index, &mut self.observer)?;
        Ok(self.settle(outcome))
    }

    /// Turns a board outcome into a status transition
    fn settle(&mut self, outcome: RevealOutcome) -> ActivateOutcome {
        match outcome {
            RevealOutcome::NoChange => ActivateOutcome::NoChange,
            RevealOutcome::HitMine(index) => {
                self.lose(index);
                ActivateOutcome::Lost
            }
            RevealOutcome::Revealed if self.board.all_safe_revealed() => {
                self.win();
                ActivateOutcome::Won
            }
            RevealOutcome::Revealed => ActivateOutcome::Revealed,
        }
    }

    fn win(&mut self) {
        if self.status.is_finished() {
            return;
        }
        self.status = GameStatus::Won;
        log::debug!(
            "Won after revealing {} cells",
            self.board.revealed_count()
        );
        self.observer.on_win();
    }

    fn lose(&mut self, index: CellIndex) {
        if self.status.is_finished() {
            return;
        }
        self.status = GameStatus::Lost;
        self.triggered_mine = Some(index);
        log::debug!("Lost on mine at {:?}", self.board.coords(index));
        self.observer.on_mine_hit(index);
        self.board.reveal_all(&mut self.observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn game(rows: Coord, cols: Coord, mines: &[CellIndex]) -> Game<Vec<GameEvent>> {
        Game::generate(
            FixedMineGenerator::new(mines.to_vec()),
            BoardConfig::new_unchecked(rows, cols, 0),
            Vec::new(),
        )
        .unwrap()
    }

    fn count_wins(game: &Game<Vec<GameEvent>>) -> usize {
        game.observer()
            .iter()
            .filter(|&&event| event == GameEvent::Won)
            .count()
    }

    #[test]
    fn revealing_corner_next_to_mine_opens_only_it() {
        let mut game = game(3, 3, &[4]);

        let outcome = game.activate_cell(0, false).unwrap();

        assert_eq!(outcome, ActivateOutcome::Revealed);
        assert_eq!(game.board().revealed_count(), 1);
        assert_eq!(game.observer(), &vec![GameEvent::CellRevealed(0)]);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn mine_hit_loses_and_discloses_board() {
        let mut game = game(3, 3, &[4]);
        game.activate_cell(0, false).unwrap();
        game.observer_mut().clear();

        let outcome = game.activate_cell(4, false).unwrap();

        assert_eq!(outcome, ActivateOutcome::Lost);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), Some(4));
        assert!(game.board().cells().all(|cell| cell.is_revealed()));
        let events = game.observer();
        assert_eq!(events[0], GameEvent::MineHit(4));
        assert_eq!(events.len(), 1 + 8);
        assert_eq!(count_wins(&game), 0);
    }

    #[test]
    fn zero_region_cascade_from_far_corner() {
        // 5x5 with a single mine in the top-left corner
        let mut game = game(5, 5, &[0]);

        let outcome = game.activate_cell(24, false).unwrap();

        assert_eq!(outcome, ActivateOutcome::Won);
        assert_eq!(game.board().revealed_count(), 24);
        assert!(!game.cell(0).unwrap().is_revealed());
        assert_eq!(count_wins(&game), 1);
    }

    #[test]
    fn win_fires_once_at_seventy_one_on_default_board() {
        // ten mines along the top: the whole first row and the start of the second
        let mines: Vec<CellIndex> = (0..10).collect();
        let mut game = game(9, 9, &mines);
        assert_eq!(game.board().safe_cells(), 71);

        for index in 10..81 {
            game.activate_cell(index, false).unwrap();
            if game.board().revealed_count() < 71 {
                assert_eq!(game.status(), GameStatus::InProgress);
            }
        }

        assert_eq!(game.board().revealed_count(), 71);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(count_wins(&game), 1);

        // replaying the winning reveal changes nothing
        assert_eq!(
            game.activate_cell(80, false).unwrap(),
            ActivateOutcome::NoChange
        );
        assert_eq!(count_wins(&game), 1);
    }

    #[test]
    fn win_on_single_safe_cell() {
        let mut game = game(1, 2, &[0]);

        assert_eq!(game.activate_cell(1, false).unwrap(), ActivateOutcome::Won);
        assert_eq!(
            game.observer(),
            &vec![GameEvent::CellRevealed(1), GameEvent::Won]
        );
        assert_eq!(game.triggered_mine(), None);
    }

    #[test]
    fn flag_mode_cycles_marks() {
        let mut game = game(3, 3, &[4]);
        game.set_mode(Mode::Flag);

        let outcomes: Vec<_> = (0..3)
            .map(|_| game.activate_cell(0, false).unwrap())
            .collect();

        assert_eq!(
            outcomes,
            [
                ActivateOutcome::Marked(CellState::Flagged),
                ActivateOutcome::Marked(CellState::Questioned),
                ActivateOutcome::Marked(CellState::Idle),
            ]
        );
        assert_eq!(
            game.observer(),
            &vec![
                GameEvent::StateChanged(0, CellState::Flagged),
                GameEvent::StateChanged(0, CellState::Questioned),
                GameEvent::StateChanged(0, CellState::Idle),
            ]
        );
    }

    #[test]
    fn flag_mode_leaves_revealed_cell_alone() {
        let mut game = game(3, 3, &[4]);
        game.activate_cell(0, false).unwrap();
        game.set_mode(Mode::Flag);

        assert_eq!(
            game.activate_cell(0, false).unwrap(),
            ActivateOutcome::NoChange
        );
        assert_eq!(game.cell(0).unwrap().state(), CellState::Revealed);
    }

    #[test]
    fn reveal_mode_absorbs_marked_cells() {
        let mut game = game(3, 3, &[4]);
        game.set_mode(Mode::Flag);
        game.activate_cell(4, false).unwrap();
        game.activate_cell(0, false).unwrap();
        game.activate_cell(0, false).unwrap();
        game.set_mode(Mode::Reveal);

        assert_eq!(
            game.activate_cell(4, false).unwrap(),
            ActivateOutcome::NoChange
        );
        assert_eq!(
            game.activate_cell(0, false).unwrap(),
            ActivateOutcome::NoChange
        );
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.cell(0).unwrap().state(), CellState::Questioned);
    }

    #[test]
    fn double_activation_chords_in_either_mode() {
        let mut game = game(3, 3, &[0]);
        game.activate_cell(4, false).unwrap();
        game.set_mode(Mode::Flag);
        game.activate_cell(0, false).unwrap();

        let outcome = game.activate_cell(4, true).unwrap();

        assert_eq!(outcome, ActivateOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.mines_left(), 0);
    }

    #[test]
    fn chord_with_wrong_flag_loses() {
        let mut game = game(3, 3, &[0]);
        game.activate_cell(4, false).unwrap();
        game.cycle_mark(8).unwrap();

        let outcome = game.activate_cell(4, true).unwrap();

        assert_eq!(outcome, ActivateOutcome::Lost);
        assert_eq!(game.triggered_mine(), Some(0));
        assert!(game.board().cells().all(|cell| cell.is_revealed()));
    }

    #[test]
    fn finished_game_ignores_input() {
        let mut game = game(3, 3, &[4]);
        game.activate_cell(4, false).unwrap();
        let events = game.observer().len();

        assert_eq!(
            game.activate_cell(0, false).unwrap(),
            ActivateOutcome::NoChange
        );
        assert_eq!(game.activate_cell(0, true).unwrap(), ActivateOutcome::NoChange);
        game.set_mode(Mode::Flag);
        assert_eq!(
            game.activate_cell(1, false).unwrap(),
            ActivateOutcome::NoChange
        );
        assert_eq!(game.observer().len(), events);
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn invalid_index_is_an_error() {
        let mut game = game(3, 3, &[4]);

        assert_eq!(
            game.activate_cell(9, false),
            Err(GameError::InvalidIndex { index: 9, total: 9 })
        );
        assert!(game.activate_cell(9, true).is_err());
        assert!(game.observer().is_empty());
    }

    #[test]
    fn mines_left_follows_flags() {
        let mut game = game(3, 3, &[0, 8]);
        assert_eq!(game.mines_left(), 2);

        game.toggle_mode();
        game.activate_cell(1, false).unwrap();
        game.activate_cell(2, false).unwrap();
        game.activate_cell(3, false).unwrap();
        assert_eq!(game.mines_left(), -1);

        game.activate_cell(1, false).unwrap();
        assert_eq!(game.mines_left(), 0);
    }

    #[test]
    fn new_game_resets_status_and_keeps_mode() {
        let mut game = game(3, 3, &[4]);
        game.activate_cell(4, false).unwrap();
        game.set_mode(Mode::Flag);

        let board = RandomMineGenerator::new(3)
            .generate(BoardConfig::default())
            .unwrap();
        game.new_game(board);

        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.triggered_mine(), None);
        assert_eq!(game.mode(), Mode::Flag);
        assert_eq!(game.board().size(), (9, 9));
        assert_eq!(game.board().revealed_count(), 0);
    }

    #[test]
    fn too_many_mines_fails_at_construction() {
        let result = Game::generate(
            RandomMineGenerator::new(0),
            BoardConfig::new_unchecked(9, 9, 81),
            (),
        );
        assert!(matches!(
            result,
            Err(GameError::TooManyMines { mines: 81, total: 81 })
        ));
    }
}
