//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use nbrebase::adapters::ProjectorKind;
use nbrebase::output::OutputMode;

/// nbrebase - Rewrite notebook history without changing what it runs
#[derive(Parser, Debug)]
#[command(
    name = "nbrebase",
    version,
    about = "Rewrite notebook history without changing what it runs",
    long_about = "Replay a range of commits onto a new branch, normalizing every Jupyter\n\
                  notebook they touch.\n\n\
                  Cell ids, hosted output ids and \"open in\" badges are removed. Author,\n\
                  committer, dates and message of each commit are preserved, and each\n\
                  normalized notebook is checked against the original via its script form."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (overrides .nbrebase.toml and the user config)
    #[arg(short = 'C', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay commits FIRST..=LAST onto BRANCH with notebooks normalized
    Rebase(RebaseArgs),

    /// Normalize notebook files in place
    Normalize {
        /// Notebook files or directories to walk
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Only remove the leading badge cell
        #[arg(long)]
        badge_only: bool,

        /// Report files that would change without writing them
        #[arg(long)]
        check: bool,
    },

    /// Check that two notebooks project to the same script
    Verify {
        /// First notebook
        a: PathBuf,

        /// Second notebook
        b: PathBuf,

        /// Drop the leading badge cell from both before comparing
        #[arg(long)]
        ignore_badge: bool,

        /// Script projector to compare with
        #[arg(long, value_enum)]
        projector: Option<ProjectorKind>,
    },

    /// Print the parsed metadata of a commit
    Show {
        /// Repository path
        repo: PathBuf,

        /// Commit to inspect
        commit: String,
    },

    /// Print the commits a rebase of FIRST..=LAST would replay
    Range {
        /// Repository path
        repo: PathBuf,

        /// First commit to replay
        first: String,

        /// Last commit to replay
        last: String,
    },

    /// Show version
    Version,
}

/// Arguments of `nbrebase rebase`
#[derive(Args, Debug)]
pub struct RebaseArgs {
    /// Repository path
    pub repo: PathBuf,

    /// First commit to replay
    pub first: String,

    /// Last commit to replay
    pub last: String,

    /// Destination branch (replaced if it exists)
    pub branch: String,

    /// Branch to switch to before deleting a checked-out destination
    #[arg(long)]
    pub primary_branch: Option<String>,

    /// Script projector for the equivalence check
    #[arg(long, value_enum)]
    pub projector: Option<ProjectorKind>,

    /// Compare the new branch with the original range afterwards
    #[arg(long)]
    pub verify: bool,

    /// Delete the partially built branch if the replay fails
    #[arg(long)]
    pub cleanup_on_failure: bool,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let config = cli.config.as_deref();

    match cli.command {
        Some(Command::Rebase(args)) => commands::rebase(&args, config, output_mode),
        Some(Command::Normalize {
            paths,
            badge_only,
            check,
        }) => commands::normalize(&paths, badge_only, check, config, output_mode),
        Some(Command::Verify {
            a,
            b,
            ignore_badge,
            projector,
        }) => commands::verify(&a, &b, ignore_badge, projector, config, output_mode),
        Some(Command::Show { repo, commit }) => commands::show(&repo, &commit, output_mode),
        Some(Command::Range { repo, first, last }) => commands::range(&repo, &first, &last, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": nbrebase::VERSION
                    })
                );
            } else {
                println!("nbrebase v{}", nbrebase::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": nbrebase::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("nbrebase v{}", nbrebase::VERSION);
                println!("\nRun 'nbrebase --help' for usage");
            }
            Ok(())
        },
    }
}
