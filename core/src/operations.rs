use ::rand::{Rng, RngCore};

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, GLYPH_SIZE, STACK_DEPTH,
};
use crate::error::Fault;
use crate::keypad::Keypad;
use crate::state::State;

// Every operation sees the pc already bumped past its own opcode.

/// The address the executing opcode was fetched from
fn origin(state: &State) -> u16 {
    state.pc.wrapping_sub(0x2)
}

/// if condition then pc += 2
fn skip_if(condition: bool, state: &State) -> State {
    let pc = if condition { state.pc + 0x2 } else { state.pc };
    State { pc, ..*state }
}

/// clear
pub fn clr(state: &State) -> State {
    State {
        frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
}

/// PC = STACK.pop()
pub fn rts(state: &State) -> Result<State, Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow { pc: origin(state) });
    }
    let sp = state.sp - 0x1;
    Ok(State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    })
}

/// PC = addr
pub fn jump(addr: u16, state: &State) -> State {
    State { pc: addr, ..*state }
}

/// STACK.push(PC); PC = addr
pub fn call(addr: u16, state: &State) -> Result<State, Fault> {
    if state.sp as usize == STACK_DEPTH {
        return Err(Fault::StackOverflow { pc: origin(state) });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: addr,
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
pub fn ske(x: u8, kk: u8, state: &State) -> State {
    skip_if(state.v[x as usize] == kk, state)
}

/// if Vx != kk then pc += 2
pub fn skne(x: u8, kk: u8, state: &State) -> State {
    skip_if(state.v[x as usize] != kk, state)
}

/// if Vx == Vy then pc += 2
pub fn skre(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] == state.v[y as usize], state)
}

/// Vx = kk
pub fn load(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State { v, ..*state }
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State { v, ..*state }
}

/// Vx = Vy
pub fn mv(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State { v, ..*state }
}

/// Vx |= Vy
pub fn or(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State { v, ..*state }
}

/// Vx &= Vy
pub fn and(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State { v, ..*state }
}

/// Vx ^= Vy
pub fn xor(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State { v, ..*state }
}

/// Vx += Vy; VF = overflow
pub fn addr(x: u8, y: u8, state: &State) -> State {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = if over { 0x1 } else { 0x0 };
    State { v, ..*state }
}

/// Vx -= Vy; VF = !underflow
pub fn sub(x: u8, y: u8, state: &State) -> State {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = if under { 0x0 } else { 0x1 };
    State { v, ..*state }
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(x: u8, state: &State) -> State {
    let mut v = state.v;
    let lsb = v[x as usize] & 0x1;
    v[x as usize] >>= 1;
    v[0xF] = lsb;
    State { v, ..*state }
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(x: u8, y: u8, state: &State) -> State {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = if under { 0x0 } else { 0x1 };
    State { v, ..*state }
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(x: u8, state: &State) -> State {
    let mut v = state.v;
    let msb = v[x as usize] >> 7;
    v[x as usize] <<= 1;
    v[0xF] = msb;
    State { v, ..*state }
}

/// if Vx != Vy then pc +=2
pub fn skrne(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] != state.v[y as usize], state)
}

/// I = addr
pub fn loadi(addr: u16, state: &State) -> State {
    State {
        i: addr & ADDRESS_MASK,
        ..*state
    }
}

/// PC = V0 + addr
pub fn jumpi(addr: u16, state: &State) -> State {
    State {
        pc: u16::from(state.v[0x0]) + addr,
        ..*state
    }
}

/// Vx = rand_byte & kk
pub fn rand(x: u8, kk: u8, state: &State, rng: &mut dyn RngCore) -> State {
    let rand_byte: u8 = rng.gen();
    let mut v = state.v;
    v[x as usize] = rand_byte & kk;
    State { v, ..*state }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixel anywhere in the sprite was erased
pub fn draw(x: u8, y: u8, n: u8, state: &State) -> State {
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;
    let mut collision = 0x0;

    let left = state.v[x as usize] as usize;
    let top = state.v[y as usize] as usize;

    for byte in 0..n as usize {
        let row = (top + byte) % DISPLAY_HEIGHT;
        let sprite = state.memory[state.address(byte)];
        for bit in 0..8 {
            let col = (left + bit) % DISPLAY_WIDTH;
            let pixel_value = (sprite >> (7 - bit)) & 1;
            let pixel = &mut frame_buffer[row * DISPLAY_WIDTH + col];
            collision |= pixel_value & *pixel;
            *pixel ^= pixel_value;
        }
    }
    v[0xF] = collision;

    State {
        draw_flag: state.draw_flag || n > 0,
        v,
        frame_buffer,
        ..*state
    }
}

/// if Vx.pressed then pc += 2
pub fn skpr(x: u8, state: &State, keys: &dyn Keypad) -> State {
    skip_if(keys.is_key_down(state.v[x as usize] & 0xF), state)
}

/// if !Vx.pressed then pc += 2
pub fn skup(x: u8, state: &State, keys: &dyn Keypad) -> State {
    skip_if(!keys.is_key_down(state.v[x as usize] & 0xF), state)
}

/// Vx = DT
pub fn moved(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State { v, ..*state }
}

/// await keypress for Vx
/// Without a key down the pc is wound back so this instruction runs again next cycle
pub fn keyd(x: u8, state: &State, keys: &dyn Keypad) -> State {
    match keys.first_key_down() {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key;
            State { v, ..*state }
        }
        None => State {
            pc: origin(state),
            ..*state
        },
    }
}

/// DT = Vx
pub fn loads(x: u8, state: &State) -> State {
    State {
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
pub fn ld(x: u8, state: &State) -> State {
    State {
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx
/// I stays 12 bits wide, wrapping past 0xFFF
pub fn addi(x: u8, state: &State) -> State {
    State {
        i: (state.i + u16::from(state.v[x as usize])) & ADDRESS_MASK,
        ..*state
    }
}

/// I = FONT_BASE + Vx * 5
/// Set I to the memory address of the sprite for the hex digit in Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(x: u8, state: &State) -> State {
    let digit = u16::from(state.v[x as usize] & 0xF);
    State {
        i: FONT_BASE + digit * GLYPH_SIZE,
        ..*state
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(x: u8, state: &State) -> State {
    let value = state.v[x as usize];
    let bcd = [value / 100 % 10, value / 10 % 10, value % 10];
    let mut memory = state.memory;
    for (offset, digit) in bcd.iter().enumerate() {
        memory[state.address(offset)] = *digit;
    }
    State { memory, ..*state }
}

/// mem[I..=I+x] = V0..=Vx
/// Fill memory starting at address i with V0..=Vx
pub fn stor(x: u8, state: &State) -> State {
    let mut memory = state.memory;
    for register in 0..=x as usize {
        memory[state.address(register)] = state.v[register];
    }
    State { memory, ..*state }
}

/// V0..=Vx = mem[I..=I+x]
/// Fill V0..=Vx with memory starting at address i
pub fn read(x: u8, state: &State) -> State {
    let mut v = state.v;
    for register in 0..=x as usize {
        v[register] = state.memory[state.address(register)];
    }
    State { v, ..*state }
}
