//! A named interval with an optional side command

use std::time::Duration;
use tracing::debug;

use super::process::ProcessHandle;
use crate::{
    clock::{parse_duration, Countdown, ResumePolicy},
    error::{Error, Result, SectionFault},
    ui::Text,
};

#[derive(Debug)]
pub struct Section {
    title: Text,
    duration: Duration,
    process: ProcessHandle,
}

impl Section {
    /// Build a section from its schedule name and raw time string.
    ///
    /// The title is the upper-cased name.
    pub fn parse(
        name: &str,
        time: &str,
        cmd: Option<String>,
        inherit_output: bool,
    ) -> std::result::Result<Self, SectionFault> {
        let duration = parse_duration(time)?;
        Self::new(&name.to_uppercase(), duration, cmd, inherit_output)
    }

    pub fn new(
        title: &str,
        duration: Duration,
        cmd: Option<String>,
        inherit_output: bool,
    ) -> std::result::Result<Self, SectionFault> {
        Ok(Self {
            title: Text::new(title)?,
            duration,
            process: ProcessHandle::new(cmd, inherit_output),
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn title_text(&self) -> &Text {
        &self.title
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn command(&self) -> Option<&str> {
        self.process.command()
    }

    pub fn is_running(&self) -> bool {
        self.process.is_running()
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.pid()
    }

    /// Fresh running countdown for this section's duration
    pub fn create_countdown(&self, policy: ResumePolicy, check_every: Duration) -> Countdown {
        Countdown::start(self.title(), self.duration, policy, check_every)
    }

    /// Launch the section's command, if it has one
    pub fn execute(&mut self) -> Result<()> {
        self.process.start().map_err(|source| Error::Spawn {
            section: self.title().to_string(),
            source,
        })
    }

    /// Kill the section's command; fine to call when nothing is running
    pub async fn stop(&mut self) -> Result<()> {
        if self.process.is_running() {
            debug!("Stopping process of section {}", self.title());
        }
        self.process.stop().await.map_err(|source| Error::Kill {
            section: self.title().to_string(),
            source,
        })
    }
}
