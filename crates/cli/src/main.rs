mod commands;
mod config;
mod error;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use commands::Context;
use error::CliError;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Tournament bracket notation toolchain.
#[derive(Parser)]
#[command(
    name = "torneo",
    version,
    about = "Tournament bracket notation toolchain"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a torneo.toml with [parser] and [graph] settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tokens of a source file and its lexical problems
    Tokens {
        /// Path to the tournament source file
        file: PathBuf,
    },

    /// Report every lexical and syntax problem; exits 1 if any
    Check {
        /// Path to the tournament source file
        file: PathBuf,
    },

    /// Show the tournament model: general info, teams and bracket
    Model {
        /// Path to the tournament source file
        file: PathBuf,
    },

    /// Show standings, top scorers and findings
    Stats {
        /// Path to the tournament source file
        file: PathBuf,
    },

    /// Generate the elimination bracket as a Graphviz DOT graph
    Bracket {
        /// Path to the tournament source file
        file: PathBuf,
        /// Write the graph to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Lay phases out top to bottom instead of left to right
        #[arg(long)]
        top_down: bool,
    },

    /// Everything above in one document
    Report {
        /// Path to the tournament source file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => fail(e, cli.output, cli.quiet),
    };
    let ctx = Context {
        output: cli.output,
        quiet: cli.quiet,
        config,
    };

    let result = match cli.command {
        Commands::Tokens { file } => commands::cmd_tokens(&file, &ctx),
        Commands::Check { file } => match commands::cmd_check(&file, &ctx) {
            Ok(true) => Ok(()),
            Ok(false) => process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Model { file } => commands::cmd_model(&file, &ctx),
        Commands::Stats { file } => commands::cmd_stats(&file, &ctx),
        Commands::Bracket {
            file,
            out,
            top_down,
        } => commands::cmd_bracket(&file, out.as_deref(), top_down, &ctx),
        Commands::Report { file } => commands::cmd_report(&file, &ctx),
    };

    if let Err(e) = result {
        fail(e, cli.output, cli.quiet);
    }
}

fn fail(err: CliError, output: OutputFormat, quiet: bool) -> ! {
    log::debug!("{:?}", err);
    report_error(&err.to_string(), output, quiet);
    process::exit(1);
}

/// Report an error in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
