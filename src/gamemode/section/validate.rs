//! Per-section record validators.
//!
//! Each validator receives a freshly tokenized record and returns the
//! reason it is malformed, if any. Some validators also normalize the
//! record or collect side products (precache sets, playlist, modifiers).

use jwalk::WalkDir;
use std::path::Path;

use super::allowed::{is_allowed_entity, is_allowed_item};
use super::{Rejection, ValidateCx};
use crate::gamemode::Record;
use crate::modifier;

type Outcome = Result<(), Rejection>;

/// Longest `[name]` kept as-is.
const NAME_MAX_LEN: usize = 54;
/// Length a too-long `[name]` is cut to.
const NAME_TRUNCATED_LEN: usize = 53;

/// Largest repeat count a `[loadout]` line may ask for.
pub(crate) const LOADOUT_MAX_COUNT: f32 = 999.0;

const AUDIO_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3"];

pub(super) fn any(_: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    Ok(())
}

pub(super) fn name(record: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    if record.line.chars().count() > NAME_MAX_LEN {
        let truncated: String = record.line.chars().take(NAME_TRUNCATED_LEN).collect();
        *record = Record::parse(&truncated);
    }
    Ok(())
}

pub(super) fn description(record: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    if record.is_empty() {
        return Err("description not provided".into());
    }
    Ok(())
}

pub(super) fn start_position(record: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    if record.len() < 3 {
        return Err("not enough coordinates provided".into());
    }
    check_coordinates(record, 0..record.len().min(4))
}

pub(super) fn loadout(record: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    let item = record.arg(0);
    if !is_allowed_item(item) {
        return Err(format!("incorrect loadout item name: {item}").into());
    }
    let count_ok = |n: f32| n.is_finite() && n <= LOADOUT_MAX_COUNT;
    if record.len() >= 2 && !record.num(1).is_some_and(count_ok) {
        return Err("loadout item count incorrectly specified".into());
    }
    Ok(())
}

pub(super) fn entity_spawn(record: &mut Record, cx: &mut ValidateCx<'_>) -> Outcome {
    if record.len() < 5 {
        return Err("<map_name> <entity_name> <x> <y> <z> [angle] not specified".into());
    }
    let entity = record.arg(1);
    if !is_allowed_entity(entity) {
        return Err("incorrect entity name".into());
    }
    check_coordinates(record, 2..5)?;

    cx.collected.entities_to_precache.insert(entity.to_owned());
    Ok(())
}

/// `<map> <model_index | target_name> [const]`
pub(super) fn keyed(record: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    if record.len() < 2 {
        return Err("<mapname> <modelindex | targetname> [const] not specified".into());
    }
    Ok(())
}

/// `<map> <model_index | target_name> <sound_path> [delay] [const]`
pub(super) fn keyed_sound(record: &mut Record, cx: &mut ValidateCx<'_>) -> Outcome {
    if record.len() < 3 {
        return Err(
            "<mapname> <modelindex | targetname> <sound_path> [delay] [const] not specified".into(),
        );
    }
    if record.len() >= 4 && record.num(3).is_none() && record.arg(3) != "const" {
        return Err("delay incorrectly specified".into());
    }

    cx.collected.sounds_to_precache.insert(record.arg(2).to_owned());
    Ok(())
}

/// `<map> <model_index | target_name> <sound_path> [delay] [initial_pos] [const] [looping]`
pub(super) fn keyed_music(record: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    if record.len() < 3 {
        return Err("<mapname> <modelindex | targetname> <sound_path> [delay] [initial_pos] [const] [looping] not specified".into());
    }
    if record.len() >= 4
        && record.num(3).is_none()
        && !matches!(record.arg(3), "const" | "looping")
    {
        return Err("delay or initial_pos incorrectly specified".into());
    }
    Ok(())
}

pub(super) fn playlist(record: &mut Record, cx: &mut ValidateCx<'_>) -> Outcome {
    for token in &record.args {
        if token == "shuffle" {
            cx.collected.playlist_shuffle = true;
            continue;
        }

        let path = cx.game_dir.join(token);
        if path.is_dir() {
            cx.collected.playlist.extend(collect_audio_files(&path));
        } else {
            cx.collected.playlist.push(token.clone());
        }
    }
    Ok(())
}

pub(super) fn mods(record: &mut Record, cx: &mut ValidateCx<'_>) -> Outcome {
    let active = modifier::build(record).ok_or(Rejection::UnknownModifier)?;
    cx.collected.mods.push(active);
    Ok(())
}

/// `<map> <model_index | target_name | next_map> <real_next_map> [x] [y] [z] [angle] [strip]`
pub(super) fn intermission(record: &mut Record, _: &mut ValidateCx<'_>) -> Outcome {
    if record.len() < 3 {
        return Err("<map_name> <model_index | target_name | next_map_name> <real_next_map_name> [x] [y] [z] [angle] [stripped] not specified".into());
    }
    check_coordinates(record, 3..record.len().min(6))
}

// ============================================================================
// Helpers
// ============================================================================

/// Every token in `indices` must be numeric; reports the 1-based index.
fn check_coordinates(record: &Record, indices: std::ops::Range<usize>) -> Outcome {
    match indices.into_iter().find(|&i| record.num(i).is_none()) {
        Some(i) => Err(format!("invalid coordinate by index {}", i + 1).into()),
        None => Ok(()),
    }
}

/// All audio files below `dir`, recursively, in sorted order.
fn collect_audio_files(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .map(|path| path.to_string_lossy().into_owned())
        .collect()
}
