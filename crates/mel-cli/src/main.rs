//! MEL runtime CLI - drive the runtime facade from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use mel_runtime::ReadMode;
use std::path::PathBuf;

mod commands;

/// melrt - MEL runtime driver
#[derive(Parser)]
#[command(name = "melrt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read values from stdin and print each on its own line
    Echo {
        /// Read primitive (default: int, or the config file's value)
        #[arg(short, long)]
        mode: Option<ModeArg>,
        /// Prompt printed before each integer read
        #[arg(short, long)]
        prompt: Option<String>,
        /// Runtime configuration (JSON file)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse text as a number and print its canonical form
    Convert {
        /// Target type
        target: commands::convert::Target,
        /// Text to parse
        text: String,
    },

    /// Compare two strings lexicographically
    Compare { a: String, b: String },

    /// Show runtime defaults
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Line,
    #[value(name = "int", alias = "prompted-int")]
    PromptedInt,
}

impl From<ModeArg> for ReadMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Line => ReadMode::Line,
            ModeArg::PromptedInt => ReadMode::PromptedInt,
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging on stderr so program output stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    match cli.command {
        Commands::Echo {
            mode,
            prompt,
            config,
        } => {
            let config =
                commands::echo::load_config(config.as_deref(), mode.map(Into::into), prompt)?;
            commands::echo::run(config)
        }
        Commands::Convert { target, text } => commands::convert::run(target, &text),
        Commands::Compare { a, b } => commands::compare::run(&a, &b),
        Commands::Info => commands::info::run(),
    }
}
