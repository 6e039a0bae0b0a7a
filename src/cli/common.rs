//! Shared state for all commands: where the game is and what to scan.

use anyhow::{Context as _, Result};

use super::Cli;
use crate::gamemode::{ConfigKind, Storage};
use crate::logger;
use crate::settings::{self, Settings};

/// Resolved game directory and settings.
#[derive(Debug, Clone)]
pub struct Context {
    pub storage: Storage,
    pub settings: Settings,
}

impl Context {
    /// Locate the game directory, read settings and apply CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let base = match &cli.root {
            Some(root) => Storage::new(root),
            None => Storage::from_executable().context("cannot locate the game directory")?,
        };

        let settings_path = cli
            .config
            .clone()
            .unwrap_or_else(|| base.game_dir().join(settings::FILE_NAME));
        let mut settings = Settings::load(&settings_path)
            .with_context(|| format!("failed to load settings from `{}`", settings_path.display()))?;
        settings.merge_cli(cli.root.as_deref(), cli.verbose);
        if settings.verbose {
            logger::set_verbose(true);
        }

        let storage = match &settings.root {
            Some(root) => Storage::new(root),
            None => base,
        };

        Ok(Self { storage, settings })
    }

    /// The requested kind, or every kind from settings.
    pub fn kinds(&self, requested: Option<ConfigKind>) -> Result<Vec<ConfigKind>> {
        match requested {
            Some(kind) => Ok(vec![kind]),
            None => Ok(self.settings.config_kinds()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_settings_root_is_used_without_flag() {
        let dir = TempDir::new().unwrap();
        let settings_path = dir.path().join("custom.toml");
        fs::write(&settings_path, "root = \"/games/hp\"\nkinds = [\"bmm\"]\n").unwrap();

        let cli = Cli::try_parse_from(["gmcfg", "-C", settings_path.to_str().unwrap(), "list"]).unwrap();
        let ctx = Context::resolve(&cli).unwrap();
        assert_eq!(ctx.storage.game_dir(), Path::new("/games/hp"));
        assert_eq!(ctx.kinds(None).unwrap(), vec![ConfigKind::Bmm]);
        assert_eq!(ctx.kinds(Some(ConfigKind::Map)).unwrap(), vec![ConfigKind::Map]);
    }

    #[test]
    fn test_root_flag_wins_and_finds_settings() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(settings::FILE_NAME), "root = \"/elsewhere\"\n").unwrap();

        let cli = Cli::try_parse_from(["gmcfg", "--root", dir.path().to_str().unwrap(), "list"]).unwrap();
        let ctx = Context::resolve(&cli).unwrap();
        assert_eq!(ctx.storage.game_dir(), dir.path());
    }
}
