mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Forge Game Data toolchain.
#[derive(Parser)]
#[command(name = "fgd", version, about = "Forge Game Data (FGD) toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .fgd file and print its declaration map as JSON
    Parse {
        /// Path to the .fgd source file
        file: PathBuf,
    },

    /// Parse every .fgd file in a directory and report per-file outcomes
    Check {
        /// Directory containing .fgd files
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file } => {
            commands::parse::cmd_parse(&file, cli.output, cli.quiet);
        }
        Commands::Check { dir } => {
            commands::check::cmd_check(&dir, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
