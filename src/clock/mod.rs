//! Clock module
//!
//! The countdown state machine plus the text conversions around it.

pub mod countdown;
pub mod format;
pub mod parse;

pub use countdown::{Countdown, Phase, ResumePolicy};
pub use format::{duration_to_text, PAUSE_MARKER};
pub use parse::{parse_duration, DurationParseError};
