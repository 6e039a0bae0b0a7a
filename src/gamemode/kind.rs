//! Config kinds and their on-disk directories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which family a descriptor file belongs to.
///
/// Each kind owns one directory under the game directory; the same file
/// grammar is used for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    /// Per-map configs applied to the regular campaign.
    Map,
    /// Variety / custom game modes.
    #[serde(alias = "custom")]
    Cgm,
    /// Black Mesa Minute: beat the map before the clock runs out.
    Bmm,
    /// Score attack.
    Sagm,
}

impl ConfigKind {
    pub const ALL: [Self; 4] = [Self::Map, Self::Cgm, Self::Bmm, Self::Sagm];

    /// Directory (relative to the game directory) holding this kind's files.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Map => "map_cfg",
            Self::Cgm => "cgm_cfg",
            Self::Bmm => "bmm_cfg",
            Self::Sagm => "sagm_cfg",
        }
    }

    /// Value of the `gamemode` console variable, if this kind is a game mode.
    pub const fn command(self) -> Option<&'static str> {
        match self {
            Self::Map => None,
            Self::Cgm => Some("cgm"),
            Self::Bmm => Some("bmm"),
            Self::Sagm => Some("sagm"),
        }
    }

    /// Human-readable game mode name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Map => "Map config",
            Self::Cgm => "Custom",
            Self::Bmm => "Black Mesa Minute",
            Self::Sagm => "Score Attack",
        }
    }

    /// Label used when a file has no `[name]` section.
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Map => "Unnamed map config",
            Self::Cgm => "Custom game mode",
            Self::Bmm => "Black Mesa Minute",
            Self::Sagm => "Score Attack",
        }
    }

    /// Launcher group for configs that are not inside a subdirectory.
    pub const fn default_group(self) -> &'static str {
        match self {
            Self::Cgm => "Main Game - Variety",
            other => other.display_name(),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ConfigKind {
    type Err = String;

    /// Accepts the short command (`cgm`), the directory name (`cgm_cfg`)
    /// and a few long aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "map" | "map_cfg" => Ok(Self::Map),
            "cgm" | "cgm_cfg" | "custom" | "variety" => Ok(Self::Cgm),
            "bmm" | "bmm_cfg" | "black-mesa-minute" => Ok(Self::Bmm),
            "sagm" | "sagm_cfg" | "score-attack" => Ok(Self::Sagm),
            other => Err(format!("unknown config kind `{other}`")),
        }
    }
}
