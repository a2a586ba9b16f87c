use log::{error, trace, warn};

use crate::error::Fault;
use crate::instruction::Instruction;

/// # Tracer
/// A sink for what the CPU is doing, handed to the Chip8 when it's created.
///
/// Every method has an empty default so sinks only implement what they care about.
pub trait Tracer {
    /// Called before an instruction is executed.
    ///
    /// # Arguments
    /// * `pc` the address the opcode was fetched from
    /// * `op` the raw opcode
    /// * `instruction` what the opcode decoded to
    fn instruction(&mut self, _pc: u16, _op: u16, _instruction: &Instruction) {}

    /// Called when an opcode doesn't decode to any instruction.
    fn unknown_opcode(&mut self, _pc: u16, _op: u16) {}

    /// Called once when the Chip8 halts.
    fn halted(&mut self, _fault: &Fault) {}
}

/// Forwards to the `log` facade; nothing is printed until the host installs a logger.
#[derive(Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn instruction(&mut self, pc: u16, op: u16, instruction: &Instruction) {
        trace!("{:04X} {:04X} {}", pc, op, instruction);
    }

    fn unknown_opcode(&mut self, pc: u16, op: u16) {
        warn!("unknown opcode {:04X} at {:04X}", op, pc);
    }

    fn halted(&mut self, fault: &Fault) {
        error!("halted: {}", fault);
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {}
