use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Conditions that halt the Chip8.
///
/// Each carries the address of the instruction that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("returned from a subroutine with an empty stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("called a subroutine with a full stack at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("fetched an instruction outside of the program at {pc:#05X}")]
    OutOfBoundsFetch { pc: u16 },
}

/// Reasons a ROM can't be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no such path: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("ROM is {size} bytes but at most {} fit in memory", MAX_PROGRAM_SIZE)]
    TooLarge { size: usize },

    #[error("unable to read ROM")]
    Io(#[from] io::Error),
}
