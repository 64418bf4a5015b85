//! Background tasks module
//!
//! The scheduler loop and the tasks that feed it input.

pub mod input;
pub mod scheduler;

// Re-export main types
pub use input::{keyboard_input_task, map_key, Control};
pub use scheduler::{
    Outcome, RunReport, Scheduler, SchedulerOptions, SectionEnd, SpawnFailurePolicy,
};
