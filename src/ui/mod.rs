//! Rendering module
//!
//! Block font, frame layout and the terminal renderer.

pub mod font;
pub mod frame;
pub mod terminal;

pub use font::{Glyph, Text};
pub use frame::{Frame, Placement};
pub use terminal::{Renderer, TerminalRenderer};
