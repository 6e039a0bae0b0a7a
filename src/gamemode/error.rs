//! Descriptor loading errors.
//!
//! The `Display` text of every variant is the exact diagnostic shown to the
//! author of the file, so it always names the directory, file and line.

use std::path::PathBuf;
use thiserror::Error;

use super::ConfigKind;

/// First error found while loading a descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Config file {dir}\\{file}.txt doesn't exist")]
    FileNotFound { dir: &'static str, file: String },

    // io::Error is neither Clone nor Eq; keep its message only
    #[error("IO error when reading `{}`: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("Error parsing {dir}\\{file}.txt, line {line}: [{section}] section can only have one line")]
    DuplicateSingleSection {
        dir: &'static str,
        file: String,
        line: usize,
        section: &'static str,
    },

    #[error("Error parsing {dir}\\{file}.txt, line {line}, section [{section}]: {reason}")]
    MalformedRecord {
        dir: &'static str,
        file: String,
        line: usize,
        section: &'static str,
        reason: String,
    },

    #[error("Error parsing {dir}\\{file}.txt, line {line}: unknown section [{name}]")]
    UnknownSection {
        dir: &'static str,
        file: String,
        line: usize,
        name: String,
    },

    #[error("Error parsing {dir}\\{file}.txt, line {line}, section [mods]: incorrect mod specified: {raw}")]
    UnknownModifier {
        dir: &'static str,
        file: String,
        line: usize,
        raw: String,
    },

    #[error("Error parsing {dir}\\{file}.txt, line {line}: data outside of any section")]
    OrphanLine {
        dir: &'static str,
        file: String,
        line: usize,
    },
}

/// Why a descriptor cannot be started from the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Invalid(ConfigError),

    #[error("{0} configs are applied per map and cannot be launched")]
    NotAGameMode(ConfigKind),

    #[error("[{0}] section is required to launch")]
    MissingSection(&'static str),
}

impl ConfigError {
    /// 1-based line the error points at, if it comes from a file line.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::FileNotFound { .. } | Self::Io { .. } => None,
            Self::DuplicateSingleSection { line, .. }
            | Self::MalformedRecord { line, .. }
            | Self::UnknownSection { line, .. }
            | Self::UnknownModifier { line, .. }
            | Self::OrphanLine { line, .. } => Some(*line),
        }
    }
}
