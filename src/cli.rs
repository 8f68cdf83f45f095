//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use resub::output::OutputMode;

/// resub - Rule-driven bulk rewriting of source trees
#[derive(Parser, Debug)]
#[command(
    name = "resub",
    version,
    about = "Rule-driven bulk rewriting of source trees",
    long_about = "Apply named rule sets of ordered regex substitutions to source files in place.\n\n\
                  Rule sets are declared in resub.toml. Each file is rewritten atomically and\n\
                  every rule set reports how many files and substitutions it changed."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Rules file (defaults to ./resub.toml, then ~/.resub/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply rule sets (to FILES, modified files, or the whole tree with --all)
    Run {
        /// Files to rewrite; without them, files modified in version control
        files: Vec<PathBuf>,

        /// Walk every rule set's directories
        #[arg(long, conflicts_with = "files")]
        all: bool,

        /// Compute changes without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Only run the named rule set (repeatable)
        #[arg(long, value_name = "NAME")]
        only: Vec<String>,
    },

    /// List configured rule sets
    List,

    /// Print the files a rule set would touch
    Select {
        /// Rule set name
        name: String,
    },

    /// Show message keys and their log levels
    Levels,

    /// Validate the rules file without touching any source
    Check,

    /// Show version
    Version,
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
        Some(Command::Run {
            files,
            all,
            dry_run,
            only,
        }) => commands::run(config, files, all, dry_run, &only, output_mode),
        Some(Command::List) => commands::list(config, output_mode),
        Some(Command::Select { name }) => commands::select(config, &name, output_mode),
        Some(Command::Levels) => commands::levels(config, output_mode),
        Some(Command::Check) => commands::check(config, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": resub::VERSION
                    })
                );
            } else {
                println!("resub v{}", resub::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": resub::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("resub v{}", resub::VERSION);
                println!("\nRun 'resub --help' for usage");
                println!("Run 'resub check' to validate resub.toml");
            }
            Ok(())
        },
    }
}
