/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// Whoever owns the host's input implements this so instructions can poll it.
/// Implementations must answer immediately; the CPU never waits on them.
pub trait Keypad {
    /// Whether `key` (0x0..=0xF) is currently held down
    fn is_key_down(&self, key: u8) -> bool;

    /// The lowest-numbered key currently held down, if any
    fn first_key_down(&self) -> Option<u8> {
        (0x0..=0xF).find(|&key| self.is_key_down(key))
    }
}

impl Keypad for [bool; 16] {
    fn is_key_down(&self, key: u8) -> bool {
        self.get(key as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod test_keypad {
    use super::*;

    #[test]
    fn test_array_reports_pressed_keys() {
        let mut keys = [false; 16];
        keys[0xA] = true;
        assert!(keys.is_key_down(0xA));
        assert!(!keys.is_key_down(0xB));
    }

    #[test]
    fn test_out_of_range_keys_are_never_down() {
        let keys = [true; 16];
        assert!(!keys.is_key_down(0x10));
    }

    #[test]
    fn test_first_key_down_is_lowest() {
        let mut keys = [false; 16];
        assert_eq!(keys.first_key_down(), None);
        keys[0xC] = true;
        keys[0x3] = true;
        assert_eq!(keys.first_key_down(), Some(0x3));
    }
}
