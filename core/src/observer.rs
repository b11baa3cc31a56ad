use alloc::vec::Vec;

use crate::*;

/// Notifications raised by the engine for the presentation layer.
///
/// The engine only ever calls out through this trait, it never reads back
/// from it. Every method has an empty default so a front end implements only
/// what it renders.
pub trait GameObserver {
    /// A mine was revealed, `index` is the cell that triggered it
    fn on_mine_hit(&mut self, index: CellIndex) {
        let _ = index;
    }

    fn on_cell_revealed(&mut self, index: CellIndex) {
        let _ = index;
    }

    fn on_win(&mut self) {}

    /// A flag or question mark was placed or cleared
    fn on_state_changed(&mut self, index: CellIndex, state: CellState) {
        let _ = (index, state);
    }
}

/// Silent observer.
impl GameObserver for () {}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn on_mine_hit(&mut self, index: CellIndex) {
        (**self).on_mine_hit(index)
    }

    fn on_cell_revealed(&mut self, index: CellIndex) {
        (**self).on_cell_revealed(index)
    }

    fn on_win(&mut self) {
        (**self).on_win()
    }

    fn on_state_changed(&mut self, index: CellIndex, state: CellState) {
        (**self).on_state_changed(index, state)
    }
}

/// Owned form of an observer callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    MineHit(CellIndex),
    CellRevealed(CellIndex),
    Won,
    StateChanged(CellIndex, CellState),
}

/// Records every callback in order.
impl GameObserver for Vec<GameEvent> {
    fn on_mine_hit(&mut self, index: CellIndex) {
        self.push(GameEvent::MineHit(index));
    }

    fn on_cell_revealed(&mut self, index: CellIndex) {
        self.push(GameEvent::CellRevealed(index));
    }

    fn on_win(&mut self) {
        self.push(GameEvent::Won);
    }

    fn on_state_changed(&mut self, index: CellIndex, state: CellState) {
        self.push(GameEvent::StateChanged(index, state));
    }
}
