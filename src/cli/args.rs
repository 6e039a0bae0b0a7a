//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::gamemode::ConfigKind;

/// Inspect and validate game mode descriptor files
#[derive(Parser, Debug, Clone)]
#[command(name = "gmcfg", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Game directory (default: `root` from settings, else the executable's directory)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Settings file path (default: gmcfg.toml in the game directory)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List descriptors grouped as in the launcher, with completion progress
    #[command(visible_alias = "l")]
    List {
        /// Only this kind (map, cgm, bmm, sagm)
        #[arg(short, long)]
        kind: Option<ConfigKind>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load descriptors and report every broken one
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Print the parsed content of one descriptor
    #[command(visible_alias = "s")]
    Show {
        #[command(flatten)]
        args: ShowArgs,
    },

    /// Print or update the best record of a scenario
    #[command(visible_alias = "r")]
    Record {
        /// Descriptor kind (cgm, bmm, sagm)
        kind: ConfigKind,

        /// Logical name, e.g. `Blue Shift/ba_yard`
        name: String,

        /// Merge a finished run into the record
        #[arg(long, num_args = 2, value_names = ["TIME", "REAL_TIME"], allow_negative_numbers = true)]
        submit: Option<Vec<f32>>,
    },
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Only this kind (map, cgm, bmm, sagm)
    #[arg(short, long)]
    pub kind: Option<ConfigKind>,

    /// Logical names to check. If omitted, checks every file of the kinds.
    #[arg(value_name = "NAME", requires = "kind")]
    pub names: Vec<String>,

    /// Report broken files without failing
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

/// Show command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ShowArgs {
    /// Descriptor kind (map, cgm, bmm, sagm)
    pub kind: ConfigKind,

    /// Logical name, e.g. `Blue Shift/ba_yard`
    pub name: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,

    /// Include the player state after applying all modifiers
    #[arg(short, long)]
    pub player: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["gmcfg", "--root", "/games/hp", "show", "bmm", "c1a0", "--json"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/games/hp")));
        match cli.command {
            Commands::Show { args } => {
                assert_eq!(args.kind, ConfigKind::Bmm);
                assert_eq!(args.name, "c1a0");
                assert!(args.json);
                assert!(!args.player);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_record_submit() {
        let cli = Cli::try_parse_from(["gmcfg", "record", "cgm", "speedrun", "--submit", "12.5", "9"]).unwrap();
        match cli.command {
            Commands::Record { kind, submit, .. } => {
                assert_eq!(kind, ConfigKind::Cgm);
                assert_eq!(submit, Some(vec![12.5, 9.0]));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_check_names_require_kind() {
        assert!(Cli::try_parse_from(["gmcfg", "check", "speedrun"]).is_err());
        assert!(Cli::try_parse_from(["gmcfg", "check", "-k", "cgm", "speedrun"]).is_ok());
        assert!(Cli::try_parse_from(["gmcfg", "check"]).is_ok());
    }
}
