//! Section Timer - A terminal countdown scheduler
//!
//! Runs an ordered list of named sections, each with a duration and an
//! optional command that lives exactly as long as the section does.

pub mod clock;
pub mod config;
pub mod error;
pub mod section;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use clock::{Countdown, ResumePolicy};
pub use config::{Config, ScheduleFile};
pub use error::{Error, Result};
pub use section::Section;
pub use tasks::{Control, Outcome, RunReport, Scheduler, SchedulerOptions};
pub use utils::signals::quit_on_signal;
