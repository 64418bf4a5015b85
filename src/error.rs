//! Error types for the section timer

use std::{io, path::PathBuf};
use thiserror::Error;

use crate::clock::DurationParseError;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the scheduler and its collaborators can report
#[derive(Debug, Error)]
pub enum Error {
    /// Config file exists but could not be read
    #[error("could not read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape
    #[error("could not parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config file was missing and the sample could not be written
    #[error("could not create default config file {}: {source}", path.display())]
    SampleWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Schedule list is empty, or every section in it was skipped
    #[error("could not locate schedule in config file")]
    EmptySchedule,

    /// A single schedule entry could not be turned into a section
    #[error("could not create section `{name}`: {reason}")]
    InvalidSection { name: String, reason: SectionFault },

    /// A `[settings]` value is out of range or malformed
    #[error("invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    /// Section command failed to start
    #[error("section `{section}`: could not execute command: {source}")]
    Spawn {
        section: String,
        #[source]
        source: io::Error,
    },

    /// Section command could not be killed
    #[error("section `{section}`: could not stop command: {source}")]
    Kill {
        section: String,
        #[source]
        source: io::Error,
    },

    /// Terminal setup or teardown failed
    #[error("could not init terminal: {0}")]
    Terminal(#[source] io::Error),

    /// Countdown text has a character the block font cannot draw
    #[error("could not draw countdown {text:?}: {reason}")]
    DisplayText { text: String, reason: SectionFault },

    /// Drawing a frame failed
    #[error("could not render window: {0}")]
    Render(#[source] io::Error),

    /// OS signal handler could not be registered
    #[error("could not install signal handler: {0}")]
    Signal(#[source] io::Error),
}

/// Why a schedule entry was rejected
#[derive(Debug, Error)]
pub enum SectionFault {
    #[error("no [sections.{0}] table in config file")]
    Missing(String),

    #[error("could not parse time: {0}")]
    Duration(#[from] DurationParseError),

    #[error("could not create font: unsupported character {0:?}")]
    Glyph(char),

    #[error("could not create font: {0} characters do not fit on screen")]
    TooWide(usize),
}
