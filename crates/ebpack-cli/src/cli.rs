//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use ebpack_core::config::DEFAULT_OUTPUT_PATH;
use ebpack_core::config::DEFAULT_SOURCE_ROOT;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ebpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub pack: PackArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Options for the default packaging run.
#[derive(clap::Args, Debug)]
pub struct PackArgs {
    /// Output archive path
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Directory to package
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_SOURCE_ROOT)]
    pub source: PathBuf,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Do not store unix permission bits on entries
    #[arg(long)]
    pub no_permissions: bool,
}

#[derive(clap::Args, Debug)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ebpack"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(cli.command.is_none());
        assert_eq!(cli.pack.output, PathBuf::from("server-eb.zip"));
        assert_eq!(cli.pack.source, PathBuf::from("server"));
        assert_eq!(cli.pack.compression_level, None);
        assert!(!cli.pack.no_permissions);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "ebpack", "-o", "dist/api.zip", "-s", "api", "-l", "9", "-vv", "--json",
        ])
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.pack.output, PathBuf::from("dist/api.zip"));
        assert_eq!(cli.pack.source, PathBuf::from("api"));
        assert_eq!(cli.pack.compression_level, Some(9));
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
    }

    #[test]
    fn test_compression_level_range() {
        assert!(Cli::try_parse_from(["ebpack", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["ebpack", "-l", "10"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["ebpack", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_completion_subcommand() {
        let cli = Cli::try_parse_from(["ebpack", "completion", "bash"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Some(Commands::Completion(CompletionArgs { shell: Shell::Bash }))
        ));
    }
}
