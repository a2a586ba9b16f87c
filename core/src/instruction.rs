use std::fmt;

use ::rand::RngCore;

use crate::error::Fault;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// # Instructions
/// Every classic Chip-8 instruction along with the operands extracted from its opcode.
///
/// Registers are named by their index (`x`, `y`), addresses are 12 bits (`addr`)
/// and immediate values are a single byte (`kk`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the display
    Cls,
    /// `00EE` return from a subroutine
    Ret,
    /// `1nnn` jump to addr
    Jp(u16),
    /// `2nnn` call the subroutine at addr
    Call(u16),
    /// `3xkk` skip if Vx == kk
    SeByte(u8, u8),
    /// `4xkk` skip if Vx != kk
    SneByte(u8, u8),
    /// `5xy0` skip if Vx == Vy
    SeReg(u8, u8),
    /// `6xkk` Vx = kk
    LdByte(u8, u8),
    /// `7xkk` Vx += kk
    AddByte(u8, u8),
    /// `8xy0` Vx = Vy
    LdReg(u8, u8),
    /// `8xy1` Vx |= Vy
    Or(u8, u8),
    /// `8xy2` Vx &= Vy
    And(u8, u8),
    /// `8xy3` Vx ^= Vy
    Xor(u8, u8),
    /// `8xy4` Vx += Vy with carry
    AddReg(u8, u8),
    /// `8xy5` Vx -= Vy with borrow
    Sub(u8, u8),
    /// `8xy6` Vx >>= 1
    Shr(u8),
    /// `8xy7` Vx = Vy - Vx with borrow
    Subn(u8, u8),
    /// `8xyE` Vx <<= 1
    Shl(u8),
    /// `9xy0` skip if Vx != Vy
    SneReg(u8, u8),
    /// `Annn` I = addr
    LdI(u16),
    /// `Bnnn` jump to addr + V0
    JpV0(u16),
    /// `Cxkk` Vx = random & kk
    Rnd(u8, u8),
    /// `Dxyn` draw an n byte sprite at (Vx, Vy)
    Drw(u8, u8, u8),
    /// `Ex9E` skip if the key in Vx is down
    Skp(u8),
    /// `ExA1` skip if the key in Vx is up
    Sknp(u8),
    /// `Fx07` Vx = DT
    LdVxDt(u8),
    /// `Fx0A` wait for a key and store it in Vx
    LdVxKey(u8),
    /// `Fx15` DT = Vx
    LdDtVx(u8),
    /// `Fx18` ST = Vx
    LdStVx(u8),
    /// `Fx1E` I += Vx
    AddI(u8),
    /// `Fx29` I = address of the glyph for Vx
    LdFont(u8),
    /// `Fx33` store the BCD digits of Vx at I..I+3
    Bcd(u8),
    /// `Fx55` store V0..=Vx at I
    Store(u8),
    /// `Fx65` read V0..=Vx from I
    Read(u8),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode.
    ///
    /// Returns `None` for opcodes that aren't part of the instruction set.
    pub fn decode(op: u16) -> Option<Instruction> {
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        let instruction = match op.key() {
            0x00E0 => Instruction::Cls,
            0x00EE => Instruction::Ret,
            0x1000 => Instruction::Jp(addr),
            0x2000 => Instruction::Call(addr),
            0x3000 => Instruction::SeByte(x, kk),
            0x4000 => Instruction::SneByte(x, kk),
            0x5000 => Instruction::SeReg(x, y),
            0x6000 => Instruction::LdByte(x, kk),
            0x7000 => Instruction::AddByte(x, kk),
            0x8000 => Instruction::LdReg(x, y),
            0x8001 => Instruction::Or(x, y),
            0x8002 => Instruction::And(x, y),
            0x8003 => Instruction::Xor(x, y),
            0x8004 => Instruction::AddReg(x, y),
            0x8005 => Instruction::Sub(x, y),
            0x8006 => Instruction::Shr(x),
            0x8007 => Instruction::Subn(x, y),
            0x800E => Instruction::Shl(x),
            0x9000 => Instruction::SneReg(x, y),
            0xA000 => Instruction::LdI(addr),
            0xB000 => Instruction::JpV0(addr),
            0xC000 => Instruction::Rnd(x, kk),
            0xD000 => Instruction::Drw(x, y, n),
            0xE09E => Instruction::Skp(x),
            0xE0A1 => Instruction::Sknp(x),
            0xF007 => Instruction::LdVxDt(x),
            0xF00A => Instruction::LdVxKey(x),
            0xF015 => Instruction::LdDtVx(x),
            0xF018 => Instruction::LdStVx(x),
            0xF01E => Instruction::AddI(x),
            0xF029 => Instruction::LdFont(x),
            0xF033 => Instruction::Bcd(x),
            0xF055 => Instruction::Store(x),
            0xF065 => Instruction::Read(x),
            _ => return None,
        };
        Some(instruction)
    }

    /// Applies the Instruction to a State, producing the next State.
    ///
    /// The pc in `state` must already point past this instruction's opcode.
    ///
    /// # Arguments
    /// * `state` the state before the instruction
    /// * `keys` the keypad polled by key instructions
    /// * `rng` the source of random bytes for `Cxkk`
    pub fn execute(
        &self,
        state: &State,
        keys: &dyn Keypad,
        rng: &mut dyn RngCore,
    ) -> Result<State, Fault> {
        let next = match *self {
            Instruction::Cls => clr(state),
            Instruction::Ret => rts(state)?,
            Instruction::Jp(addr) => jump(addr, state),
            Instruction::Call(addr) => call(addr, state)?,
            Instruction::SeByte(x, kk) => ske(x, kk, state),
            Instruction::SneByte(x, kk) => skne(x, kk, state),
            Instruction::SeReg(x, y) => skre(x, y, state),
            Instruction::LdByte(x, kk) => load(x, kk, state),
            Instruction::AddByte(x, kk) => add(x, kk, state),
            Instruction::LdReg(x, y) => mv(x, y, state),
            Instruction::Or(x, y) => or(x, y, state),
            Instruction::And(x, y) => and(x, y, state),
            Instruction::Xor(x, y) => xor(x, y, state),
            Instruction::AddReg(x, y) => addr(x, y, state),
            Instruction::Sub(x, y) => sub(x, y, state),
            Instruction::Shr(x) => shr(x, state),
            Instruction::Subn(x, y) => subn(x, y, state),
            Instruction::Shl(x) => shl(x, state),
            Instruction::SneReg(x, y) => skrne(x, y, state),
            Instruction::LdI(addr) => loadi(addr, state),
            Instruction::JpV0(addr) => jumpi(addr, state),
            Instruction::Rnd(x, kk) => rand(x, kk, state, rng),
            Instruction::Drw(x, y, n) => draw(x, y, n, state),
            Instruction::Skp(x) => skpr(x, state, keys),
            Instruction::Sknp(x) => skup(x, state, keys),
            Instruction::LdVxDt(x) => moved(x, state),
            Instruction::LdVxKey(x) => keyd(x, state, keys),
            Instruction::LdDtVx(x) => loads(x, state),
            Instruction::LdStVx(x) => ld(x, state),
            Instruction::AddI(x) => addi(x, state),
            Instruction::LdFont(x) => ldspr(x, state),
            Instruction::Bcd(x) => bcd(x, state),
            Instruction::Store(x) => stor(x, state),
            Instruction::Read(x) => read(x, state),
        };
        Ok(next)
    }
}

/// Disassembles into the conventional mnemonics
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jp(addr) => write!(f, "JP {:03X}", addr),
            Instruction::Call(addr) => write!(f, "CALL {:03X}", addr),
            Instruction::SeByte(x, kk) => write!(f, "SE V{:X}, {:02X}", x, kk),
            Instruction::SneByte(x, kk) => write!(f, "SNE V{:X}, {:02X}", x, kk),
            Instruction::SeReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LdByte(x, kk) => write!(f, "LD V{:X}, {:02X}", x, kk),
            Instruction::AddByte(x, kk) => write!(f, "ADD V{:X}, {:02X}", x, kk),
            Instruction::LdReg(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::Shr(x) => write!(f, "SHR V{:X}", x),
            Instruction::Subn(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::Shl(x) => write!(f, "SHL V{:X}", x),
            Instruction::SneReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LdI(addr) => write!(f, "LD I, {:03X}", addr),
            Instruction::JpV0(addr) => write!(f, "JP V0, {:03X}", addr),
            Instruction::Rnd(x, kk) => write!(f, "RND V{:X}, {:02X}", x, kk),
            Instruction::Drw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            Instruction::Skp(x) => write!(f, "SKP V{:X}", x),
            Instruction::Sknp(x) => write!(f, "SKNP V{:X}", x),
            Instruction::LdVxDt(x) => write!(f, "LD V{:X}, DT", x),
            Instruction::LdVxKey(x) => write!(f, "LD V{:X}, K", x),
            Instruction::LdDtVx(x) => write!(f, "LD DT, V{:X}", x),
            Instruction::LdStVx(x) => write!(f, "LD ST, V{:X}", x),
            Instruction::AddI(x) => write!(f, "ADD I, V{:X}", x),
            Instruction::LdFont(x) => write!(f, "LD F, V{:X}", x),
            Instruction::Bcd(x) => write!(f, "LD B, V{:X}", x),
            Instruction::Store(x) => write!(f, "LD [I], V{:X}", x),
            Instruction::Read(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
