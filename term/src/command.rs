use minesweep_core::{Coord, Coord2, Mode};
use thiserror::Error;

/// One line of player input
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Single activation, meaning depends on the mode
    Activate(Coord2),
    /// Double activation, always a chord
    Chord(Coord2),
    SetMode(Mode),
    ToggleMode,
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, type `h` for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("`{0}` is not a valid row or column")]
    InvalidCoord(String),
}

pub const HELP: &str = "\
commands:
  <row> <col>     activate a cell (reveal or mark, depending on the mode)
  d <row> <col>   double activation: open the neighbors of a satisfied number
  m               toggle between reveal and flag mode
  r | f           switch to reveal | flag mode
  n               new game
  h               this help
  q               quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match first {
            "q" | "quit" => Self::Quit,
            "h" | "help" | "?" => Self::Help,
            "n" | "new" => Self::NewGame,
            "m" | "mode" => Self::ToggleMode,
            "r" | "reveal" => Self::SetMode(Mode::Reveal),
            "f" | "flag" => Self::SetMode(Mode::Flag),
            "d" | "double" => Self::Chord(parse_coords(words.next(), words.next())?),
            row if row.bytes().all(|byte| byte.is_ascii_digit()) => {
                Self::Activate(parse_coords(Some(row), words.next())?)
            }
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

fn parse_coords(row: Option<&str>, col: Option<&str>) -> Result<Coord2, CommandError> {
    let (Some(row), Some(col)) = (row, col) else {
        return Err(CommandError::MissingCoords);
    };
    Ok((parse_coord(row)?, parse_coord(col)?))
}

fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
}
