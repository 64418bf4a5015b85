//! Section module
//!
//! Scheduled intervals and the side processes they own.

pub mod process;
pub mod section;

pub use process::ProcessHandle;
pub use section::Section;
