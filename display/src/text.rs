use std::io::{self, Write};

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::state::FrameBuffer;

/// # Text Display
/// Renders frames as text for terminals and logs: a `*` per lit pixel inside a box.
pub struct TextDisplay<W: Write> {
    out: W,
}

impl TextDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        TextDisplay::new(io::stdout())
    }
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        TextDisplay { out }
    }

    /// Formats a Chip-8 FrameBuffer as lines of text, framed by a border.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn frame_to_text(frame: &FrameBuffer) -> String {
        let border = format!("+{}+\n", "-".repeat(DISPLAY_WIDTH));
        let mut text = String::with_capacity((DISPLAY_WIDTH + 3) * (DISPLAY_HEIGHT + 2));
        text.push_str(&border);
        for row in frame.chunks(DISPLAY_WIDTH) {
            text.push('|');
            text.extend(row.iter().map(|&pixel| if pixel == 1 { '*' } else { ' ' }));
            text.push_str("|\n");
        }
        text.push_str(&border);
        text
    }

    /// Writes a Chip-8 FrameBuffer as text.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        self.out.write_all(Self::frame_to_text(frame).as_bytes())?;
        self.out.flush()
    }
}
