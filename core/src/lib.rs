//! Minesweeper board engine.
//!
//! [`Board`] owns the grid and does placement, flood fill, and chording.
//! [`Game`] drives it from player input and reports every change through a
//! [`GameObserver`].

#![no_std]

extern crate alloc;

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use observer::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod game;
mod generator;
mod observer;
mod types;
