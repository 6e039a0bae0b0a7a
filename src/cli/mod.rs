//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod list;
pub mod record;
pub mod show;

pub use args::{CheckArgs, Cli, Commands, ShowArgs};

use anyhow::Result;
use common::Context;

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let ctx = Context::resolve(cli)?;

    match &cli.command {
        Commands::List { kind, json } => list::run(&ctx, *kind, *json),
        Commands::Check { args } => check::run(&ctx, args),
        Commands::Show { args } => show::run(&ctx, args),
        Commands::Record { kind, name, submit } => record::run(&ctx, *kind, name, submit.as_deref()),
    }
}
