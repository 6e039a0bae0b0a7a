//! Tool settings from `gmcfg.toml`.
//!
//! ```toml
//! root = "C:/Games/Half-Life/half_payne"   # game directory
//! kinds = ["cgm", "bmm", "sagm"]           # kinds scanned by `list` / `check`
//! verbose = false
//! ```
//!
//! Every field is optional. Command-line flags win over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::gamemode::ConfigKind;

/// Settings file name, looked up in the game directory.
pub const FILE_NAME: &str = "gmcfg.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Settings file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Settings validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Game directory; defaults to the executable's directory.
    pub root: Option<PathBuf>,
    /// Kinds scanned when no kind is given on the command line.
    pub kinds: Vec<String>,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            kinds: vec!["cgm".into(), "bmm".into(), "sagm".into()],
            verbose: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|err| SettingsError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.config_kinds().map(|_| ())
    }

    /// `kinds` parsed into [`ConfigKind`]s, deduplicated in order.
    pub fn config_kinds(&self) -> Result<Vec<ConfigKind>, SettingsError> {
        if self.kinds.is_empty() {
            return Err(SettingsError::Validation("`kinds` must not be empty".into()));
        }

        let mut kinds = Vec::with_capacity(self.kinds.len());
        for raw in &self.kinds {
            let kind: ConfigKind = raw
                .parse()
                .map_err(|err: String| SettingsError::Validation(format!("`kinds`: {err}")))?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }

    /// Apply command-line overrides.
    pub fn merge_cli(&mut self, root: Option<&Path>, verbose: bool) {
        if let Some(root) = root {
            self.root = Some(root.to_path_buf());
        }
        self.verbose |= verbose;
    }
}
