use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    STACK_DEPTH,
};

/// The FrameBuffer is a flat row-major grid of 0/1 pixels indexed by `y * DISPLAY_WIDTH + x`
pub type FrameBuffer = [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry, borrow and collision flag
/// - (i) a 12-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - they are counted down by the driver, not by the CPU
///
/// ## Memory
/// - 16 entry stack
///     - stores return addresses when subroutines are called
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved and holds the sprite sheet at `FONT_BASE`
///     - 0x200..0x1000 holds the ROM and working data
/// - 64x32 frame buffer
///     - stores the contents of the next frame to be drawn
///     - `draw_flag` is raised whenever it changes
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_BASE as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    /// The memory index `offset` bytes past I, wrapping at the end of memory
    pub fn address(&self, offset: usize) -> usize {
        (self.i as usize + offset) % MEMORY_SIZE
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_state {
    use super::*;

    #[test]
    fn test_starts_at_program_start() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
    }

    #[test]
    fn test_sprite_sheet_is_loaded_at_font_base() {
        let state = State::new();
        assert_eq!(state.memory[0x050..0x055], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(state.memory[0x09B..0x0A0], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn test_program_space_is_zeroed() {
        let state = State::new();
        assert!(state.memory[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_address_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.i = 0xFFF;
        assert_eq!(state.address(0), 0xFFF);
        assert_eq!(state.address(1), 0x000);
        assert_eq!(state.address(2), 0x001);
    }
}
