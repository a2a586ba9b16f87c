use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use crate::constants::PROGRAM_START;
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::rom::Rom;
use crate::state::{FrameBuffer, State};
use crate::trace::{LogTracer, Tracer};

/// What happened during a single CPU cycle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// An instruction ran and the Chip8 is ready for the next one
    Running,
    /// The opcode wasn't an instruction; it was skipped and execution continues
    UnknownOpcode(u16),
    /// The Chip8 has stopped for good
    Halted(Fault),
}

impl Status {
    pub fn is_halted(&self) -> bool {
        matches!(self, Status::Halted(_))
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - where the loaded program ends, past which nothing is fetched
///  - whether it has halted and why
///  - how many unknown opcodes it has skipped
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU one cycle at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    program_end: usize,
    halted: Option<Fault>,
    unknown_opcodes: usize,
    rng: StdRng,
    tracer: Box<dyn Tracer>,
}

impl Chip8 {
    /// Creates a Chip8 with nothing loaded
    ///
    /// # Arguments
    /// * `tracer` where to report executed instructions, unknown opcodes and halts
    pub fn new(tracer: Box<dyn Tracer>) -> Self {
        Chip8::with_rng(tracer, StdRng::from_entropy())
    }

    /// Creates a Chip8 whose random numbers are reproducible
    ///
    /// # Arguments
    /// * `tracer` where to report executed instructions, unknown opcodes and halts
    /// * `seed` seeds the generator behind `Cxkk`
    pub fn with_seed(tracer: Box<dyn Tracer>, seed: u64) -> Self {
        Chip8::with_rng(tracer, StdRng::seed_from_u64(seed))
    }

    fn with_rng(tracer: Box<dyn Tracer>, rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            program_end: PROGRAM_START as usize,
            halted: None,
            unknown_opcodes: 0,
            rng,
            tracer,
        }
    }

    /// Resets the Chip8 and loads a rom at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `rom` a program that is known to fit in memory
    pub fn load_rom(&mut self, rom: &Rom) {
        let start = PROGRAM_START as usize;
        let end = start + rom.len();

        self.state = State::new();
        self.state.memory[start..end].copy_from_slice(rom.bytes());
        self.program_end = end;
        self.halted = None;
        self.unknown_opcodes = 0;
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at pc and moves pc past it
    /// - decodes it, skipping it if it isn't an instruction
    /// - executes it
    ///
    /// Once halted every further call does nothing and reports the same fault.
    ///
    /// # Arguments
    /// * `keys` the keypad as it is right now
    pub fn step(&mut self, keys: &dyn Keypad) -> Status {
        if let Some(fault) = self.halted {
            return Status::Halted(fault);
        }

        let pc = self.state.pc;
        let op = match self.get_op() {
            Some(op) => op,
            None => return self.halt(Fault::OutOfBoundsFetch { pc }),
        };
        self.state.pc += 0x2;

        match Instruction::decode(op) {
            Some(instruction) => {
                self.tracer.instruction(pc, op, &instruction);
                match instruction.execute(&self.state, keys, &mut self.rng) {
                    Ok(state) => {
                        self.state = state;
                        Status::Running
                    }
                    Err(fault) => self.halt(fault),
                }
            }
            None => {
                self.unknown_opcodes += 1;
                self.tracer.unknown_opcode(pc, op);
                Status::UnknownOpcode(op)
            }
        }
    }

    fn halt(&mut self, fault: Fault) -> Status {
        self.tracer.halted(&fault);
        self.halted = Some(fault);
        Status::Halted(fault)
    }

    /// Decrements each non-zero timer by one.
    /// Meant to be called at `TIMER_FREQUENCY` no matter how fast the CPU runs.
    pub fn tick_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }

    /// Whether the buzzer should be sounding
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns whether the display should be redrawn and lowers the draw flag
    pub fn consume_redraw_flag(&mut self) -> bool {
        std::mem::replace(&mut self.state.draw_flag, false)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn unknown_opcodes(&self) -> usize {
        self.unknown_opcodes
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    ///
    /// Returns `None` when either byte lies past the end of the loaded program.
    fn get_op(&self) -> Option<u16> {
        let pc = self.state.pc as usize;
        if pc + 1 >= self.program_end {
            return None;
        }
        let left = u16::from(self.state.memory[pc]);
        let right = u16::from(self.state.memory[pc + 1]);
        Some(left << 8 | right)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Box::new(LogTracer))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::constants::MAX_PROGRAM_SIZE;
    use crate::trace::NullTracer;

    const NO_KEYS: [bool; 16] = [false; 16];

    fn chip8_with(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(Box::new(NullTracer), 0x8);
        chip8.load_rom(&Rom::new(program.to_vec()).unwrap());
        chip8
    }

    #[derive(Default)]
    struct Recorded {
        instructions: Vec<Instruction>,
        unknown: Vec<u16>,
        faults: Vec<Fault>,
    }

    struct RecordingTracer(Rc<RefCell<Recorded>>);

    impl Tracer for RecordingTracer {
        fn instruction(&mut self, _pc: u16, _op: u16, instruction: &Instruction) {
            self.0.borrow_mut().instructions.push(*instruction);
        }

        fn unknown_opcode(&mut self, _pc: u16, op: u16) {
            self.0.borrow_mut().unknown.push(op);
        }

        fn halted(&mut self, fault: &Fault) {
            self.0.borrow_mut().faults.push(*fault);
        }
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = chip8_with(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), Some(0xAABB));
    }

    #[test]
    fn test_loads_rom_at_program_start() {
        let chip8 = chip8_with(&[0x12, 0x34, 0x56]);
        assert_eq!(chip8.state.memory[0x200..0x203], [0x12, 0x34, 0x56]);
        assert_eq!(chip8.state.memory[0x203], 0x0);
        assert_eq!(chip8.state.pc, 0x200);
    }

    #[test]
    fn test_loading_resets_the_machine() {
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        assert!(chip8.step(&NO_KEYS).is_halted());
        chip8.load_rom(&Rom::new(vec![0x60, 0x01]).unwrap());
        assert!(!chip8.is_halted());
        assert_eq!(chip8.step(&NO_KEYS), Status::Running);
        assert_eq!(chip8.state.v[0x0], 0x1);
    }

    #[test]
    fn test_runs_a_program_off_its_end() {
        let mut chip8 = chip8_with(&[0x60, 0x05, 0x70, 0x03]);
        assert_eq!(chip8.step(&NO_KEYS), Status::Running);
        assert_eq!(chip8.step(&NO_KEYS), Status::Running);
        assert_eq!(chip8.state.v[0x0], 0x8);
        assert_eq!(
            chip8.step(&NO_KEYS),
            Status::Halted(Fault::OutOfBoundsFetch { pc: 0x204 })
        );
        assert!(chip8.is_halted());
    }

    #[test]
    fn test_unloaded_chip8_halts_immediately() {
        let mut chip8 = Chip8::with_seed(Box::new(NullTracer), 0x8);
        assert_eq!(
            chip8.step(&NO_KEYS),
            Status::Halted(Fault::OutOfBoundsFetch { pc: 0x200 })
        );
    }

    #[test]
    fn test_halts_when_jumping_past_memory() {
        // V0 = FF; JP V0, FFF
        let mut chip8 = chip8_with(&[0x60, 0xFF, 0xBF, 0xFF]);
        chip8.step(&NO_KEYS);
        chip8.step(&NO_KEYS);
        assert_eq!(chip8.state.pc, 0x10FE);
        assert_eq!(
            chip8.step(&NO_KEYS),
            Status::Halted(Fault::OutOfBoundsFetch { pc: 0x10FE })
        );
    }

    #[test]
    fn test_full_rom_runs_to_the_end_of_memory() {
        let mut program = vec![0x0; MAX_PROGRAM_SIZE];
        // JP FFE
        program[0..2].copy_from_slice(&[0x1F, 0xFE]);
        // LD V1, 2A at the last addressable instruction
        program[MAX_PROGRAM_SIZE - 2..].copy_from_slice(&[0x61, 0x2A]);
        let mut chip8 = chip8_with(&program);
        chip8.step(&NO_KEYS);
        assert_eq!(chip8.step(&NO_KEYS), Status::Running);
        assert_eq!(chip8.state.v[0x1], 0x2A);
        assert_eq!(
            chip8.step(&NO_KEYS),
            Status::Halted(Fault::OutOfBoundsFetch { pc: 0x1000 })
        );
    }

    #[test]
    fn test_skips_unknown_opcodes() {
        let mut chip8 = chip8_with(&[0x50, 0x01, 0x60, 0x01]);
        let before = *chip8.state();
        assert_eq!(chip8.step(&NO_KEYS), Status::UnknownOpcode(0x5001));
        assert_eq!(chip8.unknown_opcodes(), 1);
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v, before.v);
        assert_eq!(chip8.state.i, before.i);
        assert_eq!(chip8.step(&NO_KEYS), Status::Running);
        assert_eq!(chip8.state.v[0x0], 0x1);
    }

    #[test]
    fn test_return_with_empty_stack_halts() {
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        let fault = Fault::StackUnderflow { pc: 0x200 };
        assert_eq!(chip8.step(&NO_KEYS), Status::Halted(fault));
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.sp, 0x0);
        // Stays halted without touching anything
        assert_eq!(chip8.step(&NO_KEYS), Status::Halted(fault));
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_deep_recursion_overflows_stack() {
        // CALL 200, forever
        let mut chip8 = chip8_with(&[0x22, 0x00]);
        for _ in 0..16 {
            assert_eq!(chip8.step(&NO_KEYS), Status::Running);
        }
        assert_eq!(
            chip8.step(&NO_KEYS),
            Status::Halted(Fault::StackOverflow { pc: 0x200 })
        );
    }

    #[test]
    fn test_waits_for_key_across_cycles() {
        let mut chip8 = chip8_with(&[0xF3, 0x0A]);
        let before = *chip8.state();
        for _ in 0..3 {
            assert_eq!(chip8.step(&NO_KEYS), Status::Running);
            assert_eq!(*chip8.state(), before);
        }
        let mut keys = NO_KEYS;
        keys[0x5] = true;
        assert_eq!(chip8.step(&keys), Status::Running);
        assert_eq!(chip8.state.v[0x3], 0x5);
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_ticks_timers_down_to_zero() {
        // V0 = 3; DT = V0; ST = V0
        let mut chip8 = chip8_with(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18]);
        for _ in 0..3 {
            chip8.step(&NO_KEYS);
        }
        assert!(chip8.sound_active());
        for _ in 0..5 {
            chip8.tick_timers();
        }
        assert_eq!(chip8.state.delay_timer, 0x0);
        assert_eq!(chip8.state.sound_timer, 0x0);
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_timers_are_independent_of_cycles() {
        // V0 = 9; DT = V0; JP 204
        let mut chip8 = chip8_with(&[0x60, 0x09, 0xF0, 0x15, 0x12, 0x04]);
        for _ in 0..50 {
            chip8.step(&NO_KEYS);
        }
        assert_eq!(chip8.state.delay_timer, 0x9);
        chip8.tick_timers();
        assert_eq!(chip8.state.delay_timer, 0x8);
    }

    #[test]
    fn test_consumes_redraw_flag() {
        // LD I, 050; DRW V0, V0, 5
        let mut chip8 = chip8_with(&[0xA0, 0x50, 0xD0, 0x05]);
        chip8.step(&NO_KEYS);
        assert!(!chip8.consume_redraw_flag());
        chip8.step(&NO_KEYS);
        assert!(chip8.consume_redraw_flag());
        assert!(!chip8.consume_redraw_flag());
        assert_eq!(chip8.frame_buffer()[0..4], [1, 1, 1, 1]);
    }

    #[test]
    fn test_reports_to_tracer() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut chip8 = Chip8::with_seed(Box::new(RecordingTracer(recorded.clone())), 0x8);
        chip8.load_rom(&Rom::new(vec![0x60, 0x05, 0xFF, 0xFF, 0x00, 0xEE]).unwrap());
        for _ in 0..4 {
            chip8.step(&NO_KEYS);
        }
        let recorded = recorded.borrow();
        assert_eq!(
            recorded.instructions,
            vec![Instruction::LdByte(0x0, 0x05), Instruction::Ret]
        );
        assert_eq!(recorded.unknown, vec![0xFFFF]);
        assert_eq!(recorded.faults, vec![Fault::StackUnderflow { pc: 0x204 }]);
    }
}
