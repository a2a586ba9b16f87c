/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble, which selects its family.
    /// `[f___]`
    fn family(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;

    /// The key an Opcode is dispatched on.
    ///
    /// Most families are identified by their first nibble alone, but some share it:
    /// - `0___` only `00E0` and `00EE` exist, so the whole opcode is the key
    /// - `5__0`, `8___` and `9__0` are told apart by their last nibble
    /// - `E___` and `F___` are told apart by their last byte
    fn key(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }

    fn key(&self) -> u16 {
        match self.family() {
            0x0 => *self,
            0x5 | 0x8 | 0x9 => self & 0xF00F,
            0xE | 0xF => self & 0xF0FF,
            _ => self & 0xF000,
        }
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_family() {
        let op: u16 = 0xABCD;
        assert_eq!(op.family(), 0xA);
    }

    #[test]
    fn test_x() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op: u16 = 0xABCD;
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0xABCD;
        assert_eq!(op.kk(), 0x00CD);
    }

    #[test]
    fn test_addr() {
        let op: u16 = 0xABCD;
        assert_eq!(op.addr(), 0x0BCD);
    }

    #[test]
    fn test_key_system_family_is_whole_opcode() {
        assert_eq!(0x00E0u16.key(), 0x00E0);
        assert_eq!(0x00EEu16.key(), 0x00EE);
        assert_eq!(0x0123u16.key(), 0x0123);
    }

    #[test]
    fn test_key_arithmetic_family_keeps_last_nibble() {
        assert_eq!(0x8AB4u16.key(), 0x8004);
        assert_eq!(0x8ABEu16.key(), 0x800E);
    }

    #[test]
    fn test_key_register_skips_keep_last_nibble() {
        assert_eq!(0x5AB0u16.key(), 0x5000);
        assert_eq!(0x5001u16.key(), 0x5001);
        assert_eq!(0x9AB0u16.key(), 0x9000);
    }

    #[test]
    fn test_key_input_and_misc_families_keep_last_byte() {
        assert_eq!(0xE59Eu16.key(), 0xE09E);
        assert_eq!(0xE5A1u16.key(), 0xE0A1);
        assert_eq!(0xF733u16.key(), 0xF033);
    }

    #[test]
    fn test_key_other_families_keep_first_nibble() {
        assert_eq!(0x1ABCu16.key(), 0x1000);
        assert_eq!(0xD123u16.key(), 0xD000);
    }
}
