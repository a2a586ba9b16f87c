pub use crate::display::Display;
pub use crate::text::TextDisplay;

mod display;
mod text;
