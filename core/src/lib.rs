pub use crate::chip8::{Chip8, Status};
pub use crate::constants::CLOCK_SPEED;
pub use crate::error::{Fault, LoadError};
pub use crate::instruction::Instruction;
pub use crate::keypad::Keypad;
pub use crate::rom::Rom;
pub use crate::trace::{LogTracer, NullTracer, Tracer};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod keypad;
pub mod opcode;
mod operations;
mod rom;
pub mod state;
mod trace;
