//! Configuration: CLI arguments and the schedule file

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use clap::Parser;
use serde::Deserialize;
use tracing::warn;

use crate::{
    clock::{parse_duration, ResumePolicy},
    error::{Error, Result, SectionFault},
    section::Section,
    tasks::{SchedulerOptions, SpawnFailurePolicy},
};

/// Default location of the schedule file
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

/// Written to the config path on first run
pub const SAMPLE_CONFIG: &str = r#"# Sections run in this order; names may repeat
schedule = ["section", "break"]

[settings]
# "restart" runs the full interval again after a pause, "continue" picks up where it stopped
resume = "restart"
# "abort" refuses to start on a bad section, "skip" leaves it out
on_invalid_section = "abort"
# "continue" keeps counting when a command fails to start, "abort" ends the run
on_spawn_failure = "continue"
inherit_output = true
tick = "1s"

[sections.break]
time = "5s"

[sections.section]
time = "5s"
cmd = 'echo "hello world"'
"#;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "section-timer")]
#[command(about = "A terminal countdown scheduler for work/break sections")]
#[command(version)]
pub struct Config {
    /// Path to the schedule file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable debug logging in the --log-file output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Env-filter directive for the active log destination.
    ///
    /// stderr shares the screen with the countdown, so it only ever gets warnings.
    pub fn log_filter(&self) -> String {
        let level = match self.log_file {
            Some(_) => self.log_level(),
            None => "warn",
        };
        format!("section_timer={}", level)
    }
}

/// What to do with a schedule entry that cannot be built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidSectionPolicy {
    #[default]
    Abort,
    Skip,
}

/// `[settings]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub resume: ResumePolicy,
    pub on_invalid_section: InvalidSectionPolicy,
    pub on_spawn_failure: SpawnFailurePolicy,
    pub inherit_output: bool,
    pub tick: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resume: ResumePolicy::default(),
            on_invalid_section: InvalidSectionPolicy::default(),
            on_spawn_failure: SpawnFailurePolicy::default(),
            inherit_output: true,
            tick: "1s".to_string(),
        }
    }
}

/// One `[sections.<name>]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub cmd: Option<String>,
}

/// The whole schedule file
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    #[serde(default)]
    pub schedule: Vec<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionConfig>,
}

impl ScheduleFile {
    pub fn from_toml(path: &Path, text: &str) -> Result<Self> {
        let file: Self = toml::from_str(text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        if file.schedule.is_empty() {
            return Err(Error::EmptySchedule);
        }
        Ok(file)
    }

    /// Read and parse the schedule file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &text)
    }

    /// Loop options derived from `[settings]`
    pub fn options(&self) -> Result<SchedulerOptions> {
        let tick = parse_duration(&self.settings.tick).map_err(|e| Error::InvalidSetting {
            key: "tick",
            reason: e.to_string(),
        })?;
        if tick.is_zero() {
            return Err(Error::InvalidSetting {
                key: "tick",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(SchedulerOptions {
            tick,
            resume: self.settings.resume,
            on_spawn_failure: self.settings.on_spawn_failure,
            ..SchedulerOptions::default()
        })
    }

    /// Turn every schedule entry into a [`Section`], in order
    pub fn build_sections(&self) -> Result<Vec<Section>> {
        let mut sections = Vec::with_capacity(self.schedule.len());
        for name in &self.schedule {
            match self.build_section(name) {
                Ok(section) => sections.push(section),
                Err(reason) => match self.settings.on_invalid_section {
                    InvalidSectionPolicy::Abort => {
                        return Err(Error::InvalidSection {
                            name: name.clone(),
                            reason,
                        });
                    }
                    InvalidSectionPolicy::Skip => {
                        warn!("Skipping section {}: {}", name, reason);
                    }
                },
            }
        }

        if sections.is_empty() {
            return Err(Error::EmptySchedule);
        }
        Ok(sections)
    }

    fn build_section(&self, name: &str) -> std::result::Result<Section, SectionFault> {
        let entry = self
            .sections
            .get(name)
            .ok_or_else(|| SectionFault::Missing(name.to_string()))?;
        Section::parse(
            name,
            &entry.time,
            entry.cmd.clone(),
            self.settings.inherit_output,
        )
    }
}

/// Write [`SAMPLE_CONFIG`] to `path`, never overwriting an existing file
pub fn write_sample(path: &Path) -> Result<()> {
    let sample_err = |source| Error::SampleWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(sample_err)?;
    file.write_all(SAMPLE_CONFIG.as_bytes()).map_err(sample_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(text: &str) -> Result<ScheduleFile> {
        ScheduleFile::from_toml(Path::new("test.toml"), text)
    }

    #[test]
    fn test_verbose_only_raises_file_logging() {
        let args = |extra: &[&str]| {
            let argv = ["section-timer"].iter().chain(extra).copied();
            Config::try_parse_from(argv).unwrap()
        };

        assert_eq!(args(&[]).log_filter(), "section_timer=warn");
        assert_eq!(args(&["-v"]).log_filter(), "section_timer=warn");
        assert_eq!(args(&["--log-file", "run.log"]).log_filter(), "section_timer=info");
        assert_eq!(args(&["-v", "--log-file", "run.log"]).log_filter(), "section_timer=debug");
    }

    #[test]
    fn test_sample_config_is_valid() {
        let file = parse(SAMPLE_CONFIG).unwrap();
        let sections = file.build_sections().unwrap();
        let titles: Vec<_> = sections.iter().map(Section::title).collect();
        assert_eq!(titles, ["SECTION", "BREAK"]);
        assert_eq!(sections[0].command(), Some(r#"echo "hello world""#));
        assert_eq!(sections[1].command(), None);
        assert_eq!(file.options().unwrap().tick, Duration::from_secs(1));
    }

    #[test]
    fn test_settings_default_when_absent() {
        let file = parse(
            r#"
            schedule = ["work"]
            [sections.work]
            time = "25m"
            "#,
        )
        .unwrap();
        assert_eq!(file.settings.resume, ResumePolicy::Restart);
        assert_eq!(file.settings.on_invalid_section, InvalidSectionPolicy::Abort);
        assert_eq!(file.settings.on_spawn_failure, SpawnFailurePolicy::Continue);
        assert!(file.settings.inherit_output);
    }

    #[test]
    fn test_repeated_names_build_separate_sections() {
        let file = parse(
            r#"
            schedule = ["work", "rest", "work"]
            [sections.work]
            time = "25m"
            [sections.rest]
            time = "5m"
            "#,
        )
        .unwrap();
        assert_eq!(file.build_sections().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_schedule_is_rejected() {
        assert!(matches!(parse("schedule = []"), Err(Error::EmptySchedule)));
        assert!(matches!(parse(""), Err(Error::EmptySchedule)));
    }

    #[test]
    fn test_abort_on_invalid_section() {
        let file = parse(
            r#"
            schedule = ["work", "lunch"]
            [sections.work]
            time = "25x"
            "#,
        )
        .unwrap();
        match file.build_sections() {
            Err(Error::InvalidSection { name, reason }) => {
                assert_eq!(name, "work");
                assert!(matches!(reason, SectionFault::Duration(_)));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_skip_invalid_sections() {
        let file = parse(
            r#"
            schedule = ["work", "lunch", "rest"]
            [settings]
            on_invalid_section = "skip"
            [sections.work]
            time = "25x"
            [sections.rest]
            time = "5m"
            "#,
        )
        .unwrap();
        let sections = file.build_sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title(), "REST");
    }

    #[test]
    fn test_overlong_title_is_an_invalid_section() {
        let name = "a".repeat(20_000);
        let text = format!(
            "schedule = [\"{name}\", \"rest\"]\n\
             [sections.{name}]\ntime = \"1s\"\n\
             [sections.rest]\ntime = \"5m\"\n"
        );

        let file = parse(&text).unwrap();
        match file.build_sections() {
            Err(Error::InvalidSection { reason, .. }) => {
                assert!(matches!(reason, SectionFault::TooWide(20_000)));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let skipping = text.replace(
            "[sections.rest]",
            "[settings]\non_invalid_section = \"skip\"\n[sections.rest]",
        );
        let sections = parse(&skipping).unwrap().build_sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title(), "REST");
    }

    #[test]
    fn test_skipping_everything_is_empty_schedule() {
        let file = parse(
            r#"
            schedule = ["lunch"]
            [settings]
            on_invalid_section = "skip"
            "#,
        )
        .unwrap();
        assert!(matches!(file.build_sections(), Err(Error::EmptySchedule)));
    }

    #[test]
    fn test_bad_tick_is_rejected() {
        let file = parse(
            r#"
            schedule = ["work"]
            [settings]
            tick = "0s"
            [sections.work]
            time = "1m"
            "#,
        )
        .unwrap();
        assert!(matches!(file.options(), Err(Error::InvalidSetting { key: "tick", .. })));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(parse("schedule = "), Err(Error::ConfigParse { .. })));
        assert!(matches!(
            parse("schedule = [\"a\"]\n[settings]\nresume = \"sometimes\""),
            Err(Error::ConfigParse { .. })
        ));
    }
}
