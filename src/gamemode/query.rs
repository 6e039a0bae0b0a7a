//! Query API over a loaded [`ConfigModel`].
//!
//! Two families:
//! - read-only accessors (name, maps, start position, loadout, ...)
//! - consuming matches: the first record keyed to a runtime event is
//!   returned and, unless flagged `const`, removed so it fires only once.
//!
//! Matching always walks records in file order; the first match wins.

use serde::Serialize;

use super::section::{LOADOUT_MAX_COUNT, SectionKind};
use super::{ConfigModel, LaunchError, Record};
use crate::modifier::{ActiveModifier, ModifierId, PlayerState};

/// Model index the game reports for a level change event.
pub const CHANGE_LEVEL_MODEL_INDEX: i32 = -1;

/// Minimum delay for cues fired on level change, so they survive the
/// transition.
const CHANGE_LEVEL_MIN_DELAY: f32 = 0.101;

const CONST_FLAG: &str = "const";
const LOOPING_FLAG: &str = "looping";
const STRIP_FLAG: &str = "strip";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StartPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Facing angle; `None` when the 4th token is absent.
    pub angle: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intermission {
    pub to_map: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub angle: Option<f32>,
    /// Strip the player's weapons on arrival.
    pub stripped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySpawn {
    pub entity: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundCue {
    pub path: String,
    pub delay: f32,
    pub constant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicCue {
    pub path: String,
    pub delay: f32,
    pub initial_pos: f32,
    pub looping: bool,
    pub constant: bool,
}

impl ConfigModel {
    // ========================================================================
    // Read-only accessors
    // ========================================================================

    /// `[name]`, or the kind's default label when the section is absent.
    pub fn display_name(&self) -> &str {
        self.first_line(SectionKind::Name)
            .unwrap_or(self.kind().default_label())
    }

    /// All `[description]` lines, each terminated by `\n`.
    pub fn description(&self) -> String {
        self.records(SectionKind::Description)
            .iter()
            .map(|record| format!("{}\n", record.line))
            .collect()
    }

    pub fn start_map(&self) -> Option<&str> {
        self.first_line(SectionKind::StartMap)
    }

    pub fn end_map(&self) -> Option<&str> {
        self.first_line(SectionKind::EndMap)
    }

    pub fn start_position(&self) -> Option<StartPosition> {
        let record = self.records(SectionKind::StartPosition).first()?;
        Some(StartPosition {
            x: record.num(0)?,
            y: record.num(1)?,
            z: record.num(2)?,
            angle: record.num(3),
        })
    }

    /// Loadout items, one entry per unit of each line's count.
    pub fn loadout(&self) -> Vec<&str> {
        self.records(SectionKind::Loadout)
            .iter()
            .flat_map(|record| {
                let count = record
                    .num(1)
                    .map_or(1, |n| n.ceil().clamp(0.0, LOADOUT_MAX_COUNT) as usize);
                std::iter::repeat_n(record.arg(0), count)
            })
            .collect()
    }

    /// Whether changing level to `next_map` is blocked.
    pub fn is_change_level_prevented(&self, next_map: &str) -> bool {
        self.records(SectionKind::ChangeLevelPrevent)
            .iter()
            .any(|record| record.line == next_map)
    }

    /// First `[intermission]` entry for the event. Not consumed.
    pub fn intermission(&self, map: &str, model_index: i32, target_name: &str) -> Option<Intermission> {
        let record = self
            .records(SectionKind::Intermission)
            .iter()
            .find(|record| record.matches_key(map, model_index, target_name))?;

        Some(Intermission {
            to_map: record.arg(2).to_owned(),
            x: record.num(3),
            y: record.num(4),
            z: record.num(5),
            angle: record.num(6),
            stripped: record.arg(7) == STRIP_FLAG,
        })
    }

    pub fn active_modifiers(&self) -> &[ActiveModifier] {
        &self.collected.mods
    }

    pub fn is_modifier_active(&self, id: ModifierId) -> bool {
        self.collected.mods.iter().any(|m| m.id() == id)
    }

    /// Apply every active modifier to the player, in `[mods]` order.
    pub fn apply_modifiers(&self, player: &mut PlayerState) {
        for modifier in &self.collected.mods {
            modifier.apply(player);
        }
    }

    /// Sounds referenced by `[sound]`/`[max_commentary]`, sorted.
    pub fn sounds_to_precache(&self) -> Vec<&str> {
        let mut sounds: Vec<&str> = self.collected.sounds_to_precache.iter().map(String::as_str).collect();
        sounds.sort_unstable();
        sounds
    }

    /// Entities referenced by `[entity_spawn]`, sorted.
    pub fn entities_to_precache(&self) -> Vec<&str> {
        let mut entities: Vec<&str> = self.collected.entities_to_precache.iter().map(String::as_str).collect();
        entities.sort_unstable();
        entities
    }

    pub fn playlist(&self) -> &[String] {
        &self.collected.playlist
    }

    pub fn playlist_shuffle(&self) -> bool {
        self.collected.playlist_shuffle
    }

    // ========================================================================
    // Consuming matches
    // ========================================================================

    /// Fire the first record of a keyed `section` matching the event.
    ///
    /// Returns `true` on a match; non-`const` records are removed.
    pub fn mark_model_index(
        &mut self,
        section: SectionKind,
        map: &str,
        model_index: i32,
        target_name: &str,
    ) -> bool {
        self.take_match(section, map, model_index, target_name).is_some()
    }

    /// Like [`Self::mark_model_index`] for `[sound]`/`[max_commentary]`.
    pub fn mark_sound(
        &mut self,
        section: SectionKind,
        map: &str,
        model_index: i32,
        target_name: &str,
    ) -> Option<SoundCue> {
        let (record, constant) = self.take_match(section, map, model_index, target_name)?;

        let delay = (3..record.len()).find_map(|i| record.num(i)).unwrap_or(0.0);
        Some(SoundCue {
            path: record.arg(2).to_owned(),
            delay: clamp_level_change_delay(model_index, delay),
            constant,
        })
    }

    /// Like [`Self::mark_model_index`] for `[music]`.
    ///
    /// The first number after the path is the delay, any later number the
    /// initial playback position.
    pub fn mark_music(
        &mut self,
        section: SectionKind,
        map: &str,
        model_index: i32,
        target_name: &str,
    ) -> Option<MusicCue> {
        let (record, constant) = self.take_match(section, map, model_index, target_name)?;

        let mut delay = None;
        let mut initial_pos = None;
        for value in (3..record.len()).filter_map(|i| record.num(i)) {
            if delay.is_none() {
                delay = Some(value);
            } else {
                initial_pos = Some(value);
            }
        }

        Some(MusicCue {
            path: record.arg(2).to_owned(),
            delay: clamp_level_change_delay(model_index, delay.unwrap_or(0.0)),
            initial_pos: initial_pos.unwrap_or(0.0),
            looping: record.has_flag(3, LOOPING_FLAG),
            constant,
        })
    }

    /// Remove and return every `[entity_spawn]` entry for `map`.
    pub fn drain_entity_spawns(&mut self, map: &str) -> Vec<EntitySpawn> {
        let Some(records) = self.sections.get_mut(&SectionKind::EntitySpawn) else {
            return Vec::new();
        };

        let (matched, rest): (Vec<Record>, Vec<Record>) =
            std::mem::take(records).into_iter().partition(|record| record.arg(0) == map);
        *records = rest;

        matched
            .into_iter()
            .map(|record| EntitySpawn {
                entity: record.arg(1).to_owned(),
                x: record.num(2).unwrap_or_default(),
                y: record.num(3).unwrap_or_default(),
                z: record.num(4).unwrap_or_default(),
                angle: record.num(5).unwrap_or(0.0),
            })
            .collect()
    }

    // ========================================================================
    // Launch
    // ========================================================================

    /// Console commands that start this scenario.
    pub fn launch_commands(&self) -> Result<Vec<String>, LaunchError> {
        if let Some(err) = self.error() {
            return Err(LaunchError::Invalid(err.clone()));
        }
        let command = self.kind().command().ok_or(LaunchError::NotAGameMode(self.kind()))?;
        let start_map = self.start_map().ok_or(LaunchError::MissingSection("start_map"))?;
        if self.start_position().is_none() {
            return Err(LaunchError::MissingSection("start_position"));
        }

        Ok(vec![
            format!("gamemode_config {}", self.config_name().replace('\\', "/")),
            format!("gamemode {command}"),
            format!("map {start_map}"),
        ])
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn first_line(&self, section: SectionKind) -> Option<&str> {
        self.records(section).first().map(|record| record.line.as_str())
    }

    /// Find the first matching record; remove it unless it is `const`.
    fn take_match(
        &mut self,
        section: SectionKind,
        map: &str,
        model_index: i32,
        target_name: &str,
    ) -> Option<(Record, bool)> {
        if !section.is_keyed() {
            return None;
        }
        let records = self.sections.get_mut(&section)?;
        let index = records
            .iter()
            .position(|record| record.matches_key(map, model_index, target_name))?;

        // Sound-like sections carry a path in token 2, so flags start at 3
        let flags_start = match section {
            SectionKind::Sound | SectionKind::MaxCommentary | SectionKind::Music => 3,
            _ => 2,
        };
        let constant = records[index].has_flag(flags_start, CONST_FLAG);

        let record = if constant {
            records[index].clone()
        } else {
            records.remove(index)
        };
        Some((record, constant))
    }
}

fn clamp_level_change_delay(model_index: i32, delay: f32) -> f32 {
    if model_index == CHANGE_LEVEL_MODEL_INDEX && delay < CHANGE_LEVEL_MIN_DELAY {
        CHANGE_LEVEL_MIN_DELAY
    } else {
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamemode::model::tests::load_str;
    use tempfile::TempDir;

    #[test]
    fn test_start_position() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "pos", "[start_map]\nc1a0\n[start_position]\n1 -2.5 64\n");

        let pos = model.start_position().unwrap();
        assert_eq!((pos.x, pos.y, pos.z), (1.0, -2.5, 64.0));
        assert_eq!(pos.angle, None);
        assert_eq!(model.start_map(), Some("c1a0"));
        assert_eq!(model.end_map(), None);

        let model = load_str(&dir, "pos2", "[start_position]\n1 2 3 270\n");
        assert_eq!(model.start_position().unwrap().angle, Some(270.0));
    }

    #[test]
    fn test_name_and_description() {
        let dir = TempDir::new().unwrap();
        let long = "N".repeat(70);
        let model = load_str(
            &dir,
            "named",
            &format!("[name]\n{long}\n[description]\nFirst line.\nSecond line.\n"),
        );
        assert_eq!(model.display_name().len(), 53);
        assert_eq!(model.description(), "First line.\nSecond line.\n");

        let model = load_str(&dir, "unnamed", "[start_map]\nc1a0\n");
        assert_eq!(model.display_name(), "Custom game mode");
        assert_eq!(model.description(), "");
    }

    #[test]
    fn test_loadout_expansion() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "loadout", "[loadout]\nweapon_crowbar\nmedkit 3\nslowmotion 1.2\n");
        assert_eq!(
            model.loadout(),
            vec!["weapon_crowbar", "medkit", "medkit", "medkit", "slowmotion", "slowmotion"]
        );
    }

    #[test]
    fn test_change_level_prevent() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "clp", "[change_level_prevent]\nc1a1\nc2a1\n");
        assert!(model.is_change_level_prevented("c1a1"));
        assert!(!model.is_change_level_prevented("c1a2"));
    }

    #[test]
    fn test_consume_once_and_const() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(&dir, "prevent", "[sound_prevent]\nc1a0 42\nc1a0 42 const\n");

        // Transient record fires first and is removed
        assert!(model.mark_model_index(SectionKind::SoundPrevent, "c1a0", 42, ""));
        assert_eq!(model.records(SectionKind::SoundPrevent).len(), 1);

        // Then the const record keeps matching
        for _ in 0..3 {
            assert!(model.mark_model_index(SectionKind::SoundPrevent, "c1a0", 42, ""));
        }
        assert_eq!(model.records(SectionKind::SoundPrevent).len(), 1);
        assert!(!model.mark_model_index(SectionKind::SoundPrevent, "c1a1", 42, ""));
    }

    #[test]
    fn test_transient_record_fires_once() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(&dir, "once", "[timer_pause]\nc1a0 door\n");

        assert!(model.mark_model_index(SectionKind::TimerPause, "c1a0", 3, "door"));
        assert!(!model.mark_model_index(SectionKind::TimerPause, "c1a0", 3, "door"));
    }

    #[test]
    fn test_first_match_wins() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(
            &dir,
            "order",
            "[sound]\nc1a0 button a.wav\nc1a0 7 b.wav\n",
        );

        // Both records match (target name and model index); file order decides
        let cue = model.mark_sound(SectionKind::Sound, "c1a0", 7, "button").unwrap();
        assert_eq!(cue.path, "a.wav");
        let cue = model.mark_sound(SectionKind::Sound, "c1a0", 7, "button").unwrap();
        assert_eq!(cue.path, "b.wav");
        assert!(model.mark_sound(SectionKind::Sound, "c1a0", 7, "button").is_none());
    }

    #[test]
    fn test_sound_delay_and_level_change_clamp() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(
            &dir,
            "sound",
            "[sound]\nc1a0 5 a.wav 2.5\nc1a0 -1 b.wav\n[max_commentary]\nc1a0 9 max.wav const\n",
        );

        let cue = model.mark_sound(SectionKind::Sound, "c1a0", 5, "").unwrap();
        assert_eq!(cue.delay, 2.5);
        assert!(!cue.constant);

        let cue = model.mark_sound(SectionKind::Sound, "c1a0", CHANGE_LEVEL_MODEL_INDEX, "").unwrap();
        assert_eq!(cue.delay, 0.101);

        let cue = model.mark_sound(SectionKind::MaxCommentary, "c1a0", 9, "").unwrap();
        assert!(cue.constant);
        assert_eq!(cue.delay, 0.0);
        assert!(model.mark_sound(SectionKind::MaxCommentary, "c1a0", 9, "").is_some());
        assert_eq!(model.sounds_to_precache(), vec!["a.wav", "b.wav", "max.wav"]);
    }

    #[test]
    fn test_music_cue() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(
            &dir,
            "music",
            "[music]\nc1a0 3 music/theme.mp3 looping 1.5 30 const\nc1a1 4 music/end.mp3\n",
        );

        let cue = model.mark_music(SectionKind::Music, "c1a0", 3, "").unwrap();
        assert_eq!(cue.path, "music/theme.mp3");
        assert_eq!(cue.delay, 1.5);
        assert_eq!(cue.initial_pos, 30.0);
        assert!(cue.looping);
        assert!(cue.constant);

        let cue = model.mark_music(SectionKind::Music, "c1a1", 4, "").unwrap();
        assert_eq!((cue.delay, cue.initial_pos), (0.0, 0.0));
        assert!(!cue.looping);
        assert!(model.mark_music(SectionKind::Music, "c1a1", 4, "").is_none());
    }

    #[test]
    fn test_music_level_change_clamp() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(
            &dir,
            "music_change",
            "[music]\nc1a0 -1 music/short.mp3\nc1a1 -1 music/long.mp3 2.5\n",
        );

        let cue = model.mark_music(SectionKind::Music, "c1a0", CHANGE_LEVEL_MODEL_INDEX, "").unwrap();
        assert_eq!(cue.delay, 0.101);

        let cue = model.mark_music(SectionKind::Music, "c1a1", CHANGE_LEVEL_MODEL_INDEX, "").unwrap();
        assert_eq!(cue.delay, 2.5);
    }

    #[test]
    fn test_oversized_loadout_is_rejected() {
        let dir = TempDir::new().unwrap();
        for (name, line) in [("inf", "medkit inf"), ("huge", "medkit 1e12")] {
            let model = load_str(&dir, name, &format!("[loadout]\n{line}\n"));
            assert!(!model.is_valid(), "{line}");
            assert!(model.loadout().is_empty());
        }
    }

    #[test]
    fn test_drain_entity_spawns() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(
            &dir,
            "spawns",
            "[entity_spawn]\nc1a0 monster_zombie 1 2 3\nc1a1 monster_headcrab 4 5 6 90\nc1a0 item_healthkit 7 8 9 180\n",
        );

        let spawns = model.drain_entity_spawns("c1a0");
        assert_eq!(spawns.len(), 2);
        assert_eq!(spawns[0].entity, "monster_zombie");
        assert_eq!(spawns[0].angle, 0.0);
        assert_eq!(spawns[1].entity, "item_healthkit");
        assert_eq!((spawns[1].x, spawns[1].angle), (7.0, 180.0));

        assert!(model.drain_entity_spawns("c1a0").is_empty());
        assert_eq!(model.drain_entity_spawns("c1a1").len(), 1);
        assert_eq!(model.entities_to_precache(), vec!["item_healthkit", "monster_headcrab", "monster_zombie"]);
    }

    #[test]
    fn test_intermission_is_not_consumed() {
        let dir = TempDir::new().unwrap();
        let model = load_str(
            &dir,
            "inter",
            "[intermission]\nc1a0 c1a1 c2a1 10 20 30 90 strip\nc1a0 12 c3a1\n",
        );

        let hit = model.intermission("c1a0", 0, "c1a1").unwrap();
        assert_eq!(hit.to_map, "c2a1");
        assert_eq!((hit.x, hit.angle), (Some(10.0), Some(90.0)));
        assert!(hit.stripped);
        assert!(model.intermission("c1a0", 0, "c1a1").is_some());

        let hit = model.intermission("c1a0", 12, "").unwrap();
        assert_eq!(hit.to_map, "c3a1");
        assert_eq!(hit.x, None);
        assert!(!hit.stripped);
    }

    #[test]
    fn test_non_keyed_section_never_matches() {
        let dir = TempDir::new().unwrap();
        let mut model = load_str(&dir, "loadout", "[loadout]\nmedkit 3\n");
        assert!(!model.mark_model_index(SectionKind::Loadout, "medkit", 3, ""));
        assert_eq!(model.loadout().len(), 3);
    }

    #[test]
    fn test_modifiers_are_queryable() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "mods", "[mods]\ninfinite_ammo\nbleeding 30 2 5\n");

        assert!(model.is_modifier_active(ModifierId::InfiniteAmmo));
        assert!(model.is_modifier_active(ModifierId::Bleeding));
        assert!(!model.is_modifier_active(ModifierId::Superhot));

        let mut player = PlayerState::default();
        model.apply_modifiers(&mut player);
        assert!(player.rules.infinite_ammo);
        assert!(player.bleeding.active);
        assert_eq!(player.bleeding.handicap, 30);
    }

    #[test]
    fn test_launch_commands() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "launch", "[start_map]\nc1a0\n[start_position]\n0 0 0\n");
        assert_eq!(
            model.launch_commands().unwrap(),
            vec!["gamemode_config launch", "gamemode cgm", "map c1a0"]
        );

        let model = load_str(&dir, "nopos", "[start_map]\nc1a0\n");
        assert!(matches!(
            model.launch_commands(),
            Err(LaunchError::MissingSection("start_position"))
        ));

        let model = load_str(&dir, "broken", "[bogus]\n");
        assert!(matches!(model.launch_commands(), Err(LaunchError::Invalid(_))));
    }
}
