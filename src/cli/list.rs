//! `gmcfg list`: the launcher catalog in the terminal.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::common::Context;
use crate::gamemode::{Catalog, CatalogEntry, ConfigKind};
use crate::log;
use crate::utils::plural_count;

pub fn run(ctx: &Context, kind: Option<ConfigKind>, json: bool) -> Result<()> {
    let kinds = ctx.kinds(kind)?;
    let catalog = Catalog::load(&ctx.storage, &kinds);

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if catalog.amount() == 0 {
        log!("list"; "no configs found in `{}`", ctx.storage.game_dir().display());
        return Ok(());
    }

    for (title, group) in &catalog.groups {
        println!(
            "{} {}",
            title.bold(),
            format!("({}/{})", group.completed(), group.amount()).dimmed()
        );
        for entry in &group.entries {
            println!("{}", format_entry(entry));
        }
        println!();
    }

    log!("list"; "{} in {}", plural_count(catalog.amount(), "config"), plural_count(catalog.groups.len(), "group"));
    log!("record"; "{}", catalog.progress_label());
    Ok(())
}

/// `  ✓ file  Label  error`
fn format_entry(entry: &CatalogEntry) -> String {
    let mark = if entry.completed {
        "✓".green().to_string()
    } else {
        " ".to_owned()
    };
    // Only the last path segment; the group already names the directory
    let file = entry.name.rsplit('/').next().unwrap_or(&entry.name);

    let mut line = format!("  {mark} {}  {}", file.cyan(), entry.label);
    if !entry.is_valid() {
        line.push_str(&format!("  {}", "error".red()));
    }
    line
}
