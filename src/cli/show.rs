//! `gmcfg show`: everything a loaded descriptor exposes.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;

use super::ShowArgs;
use super::common::Context;
use crate::gamemode::{ConfigKind, ConfigModel, ContentHash, SectionKind, StartPosition, section};
use crate::modifier::{ActiveModifier, PlayerState};
use crate::record::{self, BestRecord};

/// Serializable view of a loaded model.
#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    kind: ConfigKind,
    name: &'a str,
    label: &'a str,
    hash: ContentHash,
    description: String,
    start_map: Option<&'a str>,
    end_map: Option<&'a str>,
    start_position: Option<StartPosition>,
    loadout: Vec<&'a str>,
    modifiers: &'a [ActiveModifier],
    sounds_to_precache: Vec<&'a str>,
    entities_to_precache: Vec<&'a str>,
    playlist: &'a [String],
    playlist_shuffle: bool,
    /// Record count of every non-empty section.
    sections: BTreeMap<SectionKind, usize>,
    launch: Option<Vec<String>>,
    record: Option<BestRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    player: Option<PlayerState>,
}

impl<'a> ShowOutput<'a> {
    fn new(ctx: &Context, model: &'a ConfigModel, with_player: bool) -> Self {
        let sections = section::SECTIONS
            .iter()
            .map(|spec| (spec.kind, model.records(spec.kind).len()))
            .filter(|&(_, count)| count > 0)
            .collect();

        let record = record::exists(&ctx.storage, model.kind(), model.config_name())
            .then(|| BestRecord::load(&ctx.storage, model.kind(), model.config_name()));

        let player = with_player.then(|| {
            let mut player = PlayerState::default();
            model.apply_modifiers(&mut player);
            player
        });

        Self {
            kind: model.kind(),
            name: model.config_name(),
            label: model.display_name(),
            hash: model.hash(),
            description: model.description(),
            start_map: model.start_map(),
            end_map: model.end_map(),
            start_position: model.start_position(),
            loadout: model.loadout(),
            modifiers: model.active_modifiers(),
            sounds_to_precache: model.sounds_to_precache(),
            entities_to_precache: model.entities_to_precache(),
            playlist: model.playlist(),
            playlist_shuffle: model.playlist_shuffle(),
            sections,
            launch: model.launch_commands().ok(),
            record,
            player,
        }
    }
}

pub fn run(ctx: &Context, args: &ShowArgs) -> Result<()> {
    let mut model = ConfigModel::new(args.kind, &ctx.storage);
    model.load(&args.name)?;

    let output = ShowOutput::new(ctx, &model, args.player);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text(&output)?;
    }
    Ok(())
}

fn print_text(out: &ShowOutput<'_>) -> Result<()> {
    println!("{} {}", out.label.bold(), format!("({} {})", out.kind.dir_name(), out.hash).dimmed());
    for line in out.description.lines() {
        println!("  {}", line.dimmed());
    }
    println!();

    field("start map", out.start_map.unwrap_or("-"));
    field("end map", out.end_map.unwrap_or("-"));
    if let Some(pos) = out.start_position {
        let angle = pos.angle.map_or_else(|| "-".to_owned(), |a| a.to_string());
        field("start position", &format!("{} {} {} (angle {angle})", pos.x, pos.y, pos.z));
    }
    if !out.loadout.is_empty() {
        field("loadout", &out.loadout.join(", "));
    }

    if !out.modifiers.is_empty() {
        println!("{}", "mods".cyan());
        for modifier in out.modifiers {
            println!("  {} {}", "•".green(), modifier.name().bold());
            for line in modifier.param_descriptions() {
                println!("      {}", line.dimmed());
            }
        }
    }

    if !out.sounds_to_precache.is_empty() {
        field("sounds", &out.sounds_to_precache.join(", "));
    }
    if !out.entities_to_precache.is_empty() {
        field("entities", &out.entities_to_precache.join(", "));
    }
    if !out.playlist.is_empty() {
        let shuffle = if out.playlist_shuffle { " (shuffle)" } else { "" };
        field("playlist", &format!("{}{shuffle}", out.playlist.join(", ")));
    }

    let sections: Vec<String> = out
        .sections
        .iter()
        .map(|(kind, count)| format!("{kind}×{count}"))
        .collect();
    field("sections", &sections.join(" "));

    if let Some(commands) = &out.launch {
        field("launch", &commands.join("; "));
    }
    if let Some(best) = &out.record {
        field(
            "best",
            &format!(
                "time {}, real time {}, real minus time {}",
                record::format_time(best.time),
                record::format_time(best.real_time),
                record::format_time(best.real_time_minus_time)
            ),
        );
    }
    if let Some(player) = &out.player {
        println!("{}", "player".cyan());
        println!("{}", serde_json::to_string_pretty(player)?);
    }
    Ok(())
}

fn field(name: &str, value: &str) {
    println!("{} {}", format!("{name}:").cyan(), value);
}
