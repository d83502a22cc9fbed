use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `pravartak` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pravartak",
    version,
    about = "Pravartak - student dropout risk API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Extra TOML config file, layered above pravartak.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve,

    /// Create the schema and seed demo mentors, then exit
    InitDb,

    /// Score one feature vector with the configured model and print the result
    Score(ScoreArgs),
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    #[arg(long)]
    pub attendance: f64,

    #[arg(long)]
    pub marks: f64,

    #[arg(long)]
    pub backlog: u32,

    /// Gender label; "male" (any case) encodes as 1, anything else as 0
    #[arg(long)]
    pub gender: String,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["pravartak", "serve", "--verbose", "--config", "extra.toml"])
            .expect("cli should parse");
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("extra.toml")));
        assert!(matches!(cli.command, Commands::Serve));
    }

    #[test]
    fn score_arguments_parse() {
        let cli = Cli::try_parse_from([
            "pravartak",
            "score",
            "--attendance",
            "85",
            "--marks",
            "7.5",
            "--backlog",
            "0",
            "--gender",
            "Male",
        ])
        .expect("cli should parse");
        let Commands::Score(args) = cli.command else {
            panic!("expected score subcommand");
        };
        assert!((args.marks - 7.5).abs() < f64::EPSILON);
        assert_eq!(args.gender, "Male");
    }

    #[test]
    fn score_rejects_negative_backlog() {
        let result = Cli::try_parse_from([
            "pravartak",
            "score",
            "--attendance",
            "85",
            "--marks",
            "7.5",
            "--backlog",
            "-1",
            "--gender",
            "Male",
        ]);
        assert!(result.is_err());
    }
}
