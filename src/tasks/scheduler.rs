//! Scheduler loop: runs sections in order and multiplexes their events

use std::time::Duration;
use serde::Deserialize;
use tokio::{
    sync::mpsc,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use super::input::Control;
use crate::{
    clock::{Countdown, ResumePolicy},
    error::{Error, Result},
    section::Section,
    ui::{Frame, Renderer, Text},
};

/// What to do when a section's command fails to start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnFailurePolicy {
    /// Log it and keep counting down without the command
    #[default]
    Continue,
    /// End the whole run with the spawn error
    Abort,
}

/// Knobs for the scheduler loop
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    /// Redraw period
    pub tick: Duration,
    /// Expiry check period of each countdown
    pub check_every: Duration,
    pub resume: ResumePolicy,
    pub on_spawn_failure: SpawnFailurePolicy,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            check_every: Duration::from_secs(1),
            resume: ResumePolicy::default(),
            on_spawn_failure: SpawnFailurePolicy::default(),
        }
    }
}

/// Why a section stopped being active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd {
    Expired,
    Skipped,
    Quit,
}

/// How the run as a whole ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every section ran to expiry or was skipped
    Completed,
    /// The user (or a termination signal) quit
    Quit,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Title and end reason of every section that became active, in order
    pub sections: Vec<(String, SectionEnd)>,
}

/// Drives one section at a time through its countdown
pub struct Scheduler<R> {
    renderer: R,
    options: SchedulerOptions,
}

impl<R: Renderer> Scheduler<R> {
    pub fn new(renderer: R, options: SchedulerOptions) -> Self {
        Self { renderer, options }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run every section in order until the list is exhausted or the user quits.
    ///
    /// Whatever ends a section, its process is stopped before the next
    /// section starts or this returns. A failed stop is logged and the run
    /// carries on.
    pub async fn run(
        &mut self,
        sections: &mut [Section],
        input: &mut mpsc::Receiver<Control>,
    ) -> Result<RunReport> {
        let mut report = RunReport {
            outcome: Outcome::Completed,
            sections: Vec::with_capacity(sections.len()),
        };
        let mut input_open = true;
        let total = sections.len();

        for (index, section) in sections.iter_mut().enumerate() {
            info!(
                "Section {} started ({}/{}, {:?})",
                section.title(),
                index + 1,
                total,
                section.duration()
            );

            let result = self.run_section(section, input, &mut input_open).await;
            if let Err(e) = section.stop().await {
                warn!("{}", e);
            }

            let end = match result {
                Ok(end) => end,
                Err(e) => {
                    error!("Section {} failed: {}", section.title(), e);
                    return Err(e);
                }
            };
            info!("Section {} ended: {:?}", section.title(), end);
            report.sections.push((section.title().to_string(), end));

            if end == SectionEnd::Quit {
                report.outcome = Outcome::Quit;
                break;
            }
        }

        info!("Schedule finished: {:?}", report.outcome);
        Ok(report)
    }

    async fn run_section(
        &mut self,
        section: &mut Section,
        input: &mut mpsc::Receiver<Control>,
        input_open: &mut bool,
    ) -> Result<SectionEnd> {
        let mut countdown = section.create_countdown(self.options.resume, self.options.check_every);
        self.render(section.title_text(), &countdown)?;

        if let Err(e) = section.execute() {
            match self.options.on_spawn_failure {
                SpawnFailurePolicy::Continue => warn!("{}", e),
                SpawnFailurePolicy::Abort => return Err(e),
            }
        }

        let tick = self.options.tick;
        let mut ticker = time::interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                control = input.recv(), if *input_open => match control {
                    Some(Control::Quit) => return Ok(SectionEnd::Quit),
                    Some(Control::Skip) => return Ok(SectionEnd::Skipped),
                    Some(Control::Pause) => {
                        countdown.pause();
                        self.render(section.title_text(), &countdown)?;
                    }
                    Some(Control::Resume) => {
                        countdown.resume();
                        self.render(section.title_text(), &countdown)?;
                    }
                    None => {
                        warn!("Input channel closed, continuing without keyboard control");
                        *input_open = false;
                    }
                },
                _ = countdown.expired() => return Ok(SectionEnd::Expired),
                _ = ticker.tick() => {
                    debug!("Tick: {} {:?} left", countdown.title(), countdown.remaining());
                    self.render(section.title_text(), &countdown)?;
                }
            }
        }
    }

    fn render(&mut self, title: &Text, countdown: &Countdown) -> Result<()> {
        let body = display_body(&countdown.display_text())?;
        self.renderer.render(&Frame::compose(title, &body))
    }
}

fn display_body(shown: &str) -> Result<Text> {
    Text::new(shown).map_err(|reason| Error::DisplayText {
        text: shown.to_string(),
        reason,
    })
}
