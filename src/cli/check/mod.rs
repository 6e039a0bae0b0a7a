//! `gmcfg check`: load descriptors and report the broken ones.

mod report;

use anyhow::Result;
use rayon::prelude::*;

use super::CheckArgs;
use super::common::Context;
use crate::gamemode::{ConfigError, ConfigKind, ConfigModel};
use crate::log;
use crate::utils::plural_count;

use report::CheckReport;

pub fn run(ctx: &Context, args: &CheckArgs) -> Result<()> {
    let targets = collect_targets(ctx, args)?;

    if targets.is_empty() {
        log!("check"; "no configs found in `{}`", ctx.storage.game_dir().display());
        return Ok(());
    }

    log!("check"; "checking {}", plural_count(targets.len(), "config"));

    // Every file loads into its own model
    let failures: Vec<(ConfigKind, String, ConfigError)> = targets
        .par_iter()
        .filter_map(|(kind, name)| {
            let model = ConfigModel::open(*kind, &ctx.storage, name);
            model.error().cloned().map(|err| (*kind, name.clone(), err))
        })
        .collect();

    let mut report = CheckReport::new(targets.len());
    for (kind, name, err) in &failures {
        report.add(*kind, name.clone(), err);
    }

    report.print();
    log!("check"; "{}", report);

    if report.is_clean() || args.warn_only {
        return Ok(());
    }
    anyhow::bail!("found {}", plural_count(report.failure_count(), "broken config"))
}

/// Named files of the requested kind, or every file of every kind.
fn collect_targets(ctx: &Context, args: &CheckArgs) -> Result<Vec<(ConfigKind, String)>> {
    if let (Some(kind), false) = (args.kind, args.names.is_empty()) {
        return Ok(args.names.iter().map(|name| (kind, name.clone())).collect());
    }

    Ok(ctx
        .kinds(args.kind)?
        .into_iter()
        .flat_map(|kind| {
            ctx.storage
                .list_config_files(kind)
                .into_iter()
                .map(move |name| (kind, name))
        })
        .collect())
}
