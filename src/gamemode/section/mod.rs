//! Section registry for descriptor files.
//!
//! # Module Structure
//!
//! ```text
//! section/
//! ├── allowed    # loadout item and spawnable entity allow-lists
//! ├── validate   # per-section validators
//! └── mod.rs     # SectionKind, SectionSpec and the static table (this file)
//! ```
//!
//! # Sections
//!
//! | Section                  | Single | Record grammar                                        |
//! |--------------------------|--------|-------------------------------------------------------|
//! | `[name]`                 | yes    | display name (truncated to 53 chars if over 54)       |
//! | `[description]`          | no     | free text                                             |
//! | `[start_map]`            | yes    | map name                                              |
//! | `[start_position]`       | yes    | `x y z [angle]`                                       |
//! | `[end_map]`              | yes    | map name                                              |
//! | `[end_trigger]`          | no     | `map index-or-target [const]`                         |
//! | `[change_level_prevent]` | no     | next map name                                         |
//! | `[loadout]`              | no     | `item [count]`                                        |
//! | `[entity_spawn]`         | no     | `map entity x y z [angle]`                            |
//! | `[entity_use]`           | no     | `map index-or-target [const]`                         |
//! | `[sound]`                | no     | `map index-or-target path [delay] [const]`            |
//! | `[sound_prevent]`        | no     | `map index-or-target [const]`                         |
//! | `[music]`                | no     | `map index-or-target path [delay] [pos] [const] [looping]` |
//! | `[playlist]`             | no     | `shuffle` or file/directory paths                     |
//! | `[max_commentary]`       | no     | same as `[sound]`                                     |
//! | `[mods]`                 | no     | `modifier [params...]`                                |
//! | `[timer_pause]`          | no     | `map index-or-target [const]`                         |
//! | `[timer_resume]`         | no     | `map index-or-target [const]`                         |
//! | `[intermission]`         | no     | `map index-or-target next_map [x y z angle] [strip]`  |

pub mod allowed;
mod validate;

pub(crate) use validate::LOADOUT_MAX_COUNT;

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use super::Record;
use crate::modifier::ActiveModifier;

/// Every section a descriptor file may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Name,
    Description,
    StartMap,
    StartPosition,
    EndMap,
    EndTrigger,
    ChangeLevelPrevent,
    Loadout,
    EntitySpawn,
    EntityUse,
    Sound,
    SoundPrevent,
    Music,
    Playlist,
    MaxCommentary,
    Mods,
    TimerPause,
    TimerResume,
    Intermission,
}

impl SectionKind {
    /// Look up a section by its header keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        SECTIONS
            .iter()
            .find(|spec| spec.keyword == keyword)
            .map(|spec| spec.kind)
    }

    /// The static spec for this section.
    pub fn spec(self) -> &'static SectionSpec {
        // SECTIONS is ordered like the enum
        &SECTIONS[self as usize]
    }

    #[inline]
    pub fn keyword(self) -> &'static str {
        self.spec().keyword
    }

    /// Sections whose records are keyed by (map, model index or target name).
    pub const fn is_keyed(self) -> bool {
        matches!(
            self,
            Self::EndTrigger
                | Self::EntityUse
                | Self::Sound
                | Self::SoundPrevent
                | Self::Music
                | Self::MaxCommentary
                | Self::TimerPause
                | Self::TimerResume
                | Self::Intermission
        )
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.keyword())
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Why a validator refused a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Malformed(String),
    UnknownModifier,
}

impl From<&str> for Rejection {
    fn from(reason: &str) -> Self {
        Self::Malformed(reason.to_owned())
    }
}

impl From<String> for Rejection {
    fn from(reason: String) -> Self {
        Self::Malformed(reason)
    }
}

/// Side products of validation that outlive the records themselves.
#[derive(Debug, Default, Clone)]
pub struct Collected {
    pub sounds_to_precache: FxHashSet<String>,
    pub entities_to_precache: FxHashSet<String>,
    pub playlist: Vec<String>,
    pub playlist_shuffle: bool,
    pub mods: Vec<ActiveModifier>,
}

impl Collected {
    pub fn clear(&mut self) {
        self.sounds_to_precache.clear();
        self.entities_to_precache.clear();
        self.playlist.clear();
        self.playlist_shuffle = false;
        self.mods.clear();
    }
}

/// What a validator can see and write besides the record.
pub struct ValidateCx<'a> {
    /// Game directory; relative playlist paths resolve against it.
    pub game_dir: &'a Path,
    pub collected: &'a mut Collected,
}

/// Validates (and may normalize) one record.
pub type Validator = fn(&mut Record, &mut ValidateCx<'_>) -> Result<(), Rejection>;

/// Static description of a section.
pub struct SectionSpec {
    pub kind: SectionKind,
    pub keyword: &'static str,
    /// Only one record allowed.
    pub single: bool,
    pub validate: Validator,
}

impl fmt::Debug for SectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionSpec")
            .field("kind", &self.kind)
            .field("keyword", &self.keyword)
            .field("single", &self.single)
            .finish_non_exhaustive()
    }
}

const fn spec(kind: SectionKind, keyword: &'static str, single: bool, validate: Validator) -> SectionSpec {
    SectionSpec {
        kind,
        keyword,
        single,
        validate,
    }
}

/// Section table, in `SectionKind` declaration order.
pub static SECTIONS: [SectionSpec; 19] = [
    spec(SectionKind::Name, "name", true, validate::name),
    spec(SectionKind::Description, "description", false, validate::description),
    spec(SectionKind::StartMap, "start_map", true, validate::any),
    spec(SectionKind::StartPosition, "start_position", true, validate::start_position),
    spec(SectionKind::EndMap, "end_map", true, validate::any),
    spec(SectionKind::EndTrigger, "end_trigger", false, validate::keyed),
    spec(SectionKind::ChangeLevelPrevent, "change_level_prevent", false, validate::any),
    spec(SectionKind::Loadout, "loadout", false, validate::loadout),
    spec(SectionKind::EntitySpawn, "entity_spawn", false, validate::entity_spawn),
    spec(SectionKind::EntityUse, "entity_use", false, validate::keyed),
    spec(SectionKind::Sound, "sound", false, validate::keyed_sound),
    spec(SectionKind::SoundPrevent, "sound_prevent", false, validate::keyed),
    spec(SectionKind::Music, "music", false, validate::keyed_music),
    spec(SectionKind::Playlist, "playlist", false, validate::playlist),
    spec(SectionKind::MaxCommentary, "max_commentary", false, validate::keyed_sound),
    spec(SectionKind::Mods, "mods", false, validate::mods),
    spec(SectionKind::TimerPause, "timer_pause", false, validate::keyed),
    spec(SectionKind::TimerResume, "timer_resume", false, validate::keyed),
    spec(SectionKind::Intermission, "intermission", false, validate::intermission),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, spec) in SECTIONS.iter().enumerate() {
            assert_eq!(spec.kind as usize, i, "{} out of order", spec.keyword);
            assert_eq!(spec.kind.spec().keyword, spec.keyword);
        }
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(SectionKind::from_keyword("mods"), Some(SectionKind::Mods));
        assert_eq!(
            SectionKind::from_keyword("change_level_prevent"),
            Some(SectionKind::ChangeLevelPrevent)
        );
        assert_eq!(SectionKind::from_keyword("bogus"), None);
        assert_eq!(SectionKind::from_keyword("Mods"), None);
    }

    #[test]
    fn test_single_sections() {
        let single: Vec<_> = SECTIONS.iter().filter(|s| s.single).map(|s| s.keyword).collect();
        assert_eq!(single, vec!["name", "start_map", "start_position", "end_map"]);
    }

    #[test]
    fn test_display_uses_brackets() {
        assert_eq!(SectionKind::TimerPause.to_string(), "[timer_pause]");
    }
}
