use std::io::{BufRead, Write};

use anyhow::Context;
use minesweep_core::*;

use crate::command::{Command, HELP};
use crate::view::{TermView, render_board, render_status};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One terminal sitting, possibly spanning several games.
#[derive(Debug)]
pub struct Session {
    game: Game<TermView>,
    config: BoardConfig,
    seed: u64,
}

impl Session {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        let board = RandomMineGenerator::new(seed).generate(config)?;
        log::info!("Starting game with seed {}", seed);
        Ok(Self::with_board(board, config, seed))
    }

    /// Session starting on a prepared board, later games use `config`
    pub fn with_board(board: Board, config: BoardConfig, seed: u64) -> Self {
        let view = TermView::new(board.cols());
        Self {
            game: Game::new(board, view),
            config,
            seed,
        }
    }

    pub fn game(&self) -> &Game<TermView> {
        &self.game
    }

    pub fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Activate(coords) => {
                let index = self.index(coords)?;
                self.game.activate_cell(index, false)?;
            }
            Command::Chord(coords) => {
                let index = self.index(coords)?;
                self.game.activate_cell(index, true)?;
            }
            Command::SetMode(mode) => self.game.set_mode(mode),
            Command::ToggleMode => {
                self.game.toggle_mode();
            }
            Command::NewGame => {
                // consecutive seeds keep a seeded sitting reproducible
                self.seed = self.seed.wrapping_add(1);
                let board = RandomMineGenerator::new(self.seed).generate(self.config)?;
                log::info!("Starting game with seed {}", self.seed);
                self.game.observer_mut().reset(board.cols());
                self.game.new_game(board);
            }
            Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Reads commands from `input` until `q` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> anyhow::Result<()> {
        writeln!(output, "{HELP}\n")?;
        self.draw(output)?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{err}")?;
                    continue;
                }
            };
            log::debug!("Command: {:?}", command);

            match self.handle(command) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err @ GameError::InvalidIndex { .. }) => {
                    writeln!(output, "{err}")?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            if command == Command::Help {
                writeln!(output, "{HELP}")?;
                continue;
            }
            self.draw(output)?;
        }
        Ok(())
    }

    fn draw<W: Write>(&mut self, output: &mut W) -> anyhow::Result<()> {
        write!(output, "{}", render_board(self.game.board()))?;
        for message in self.game.observer_mut().take_messages() {
            writeln!(output, "{message}")?;
        }
        writeln!(output, "{}", render_status(&self.game))?;
        output.flush()?;
        Ok(())
    }

    /// Coordinates past the last column would wrap into the next row, so both
    /// axes are checked before converting.
    fn index(&self, (row, col): Coord2) -> Result<CellIndex> {
        let board = self.game.board();
        let (rows, cols) = board.size();
        if row >= rows || col >= cols {
            return Err(GameError::InvalidIndex {
                index: coords_to_index((row, col), cols),
                total: board.total_cells(),
            });
        }
        Ok(board.index((row, col)))
    }
}
