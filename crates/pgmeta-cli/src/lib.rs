mod command;
pub use command::{CheckCommand, ResolveCommand};

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

/// Command-line front end: loads a configuration, resolves it against a
/// database, and writes the resolved model as JSON.
#[derive(Parser, Debug)]
#[command(name = "pgmeta")]
#[command(about = "pgmeta - resolve a PostgreSQL schema and queries into a typed model")]
#[command(version)]
pub struct Cli {
    /// More output; repeat for trace-level logs.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Resolve tables, queries, and statements and write the model
    Resolve(ResolveCommand),

    /// Validate a configuration file without connecting
    Check(CheckCommand),
}

impl Cli {
    /// Parse command-line arguments, install logging, and run.
    pub async fn parse_and_run() -> Result<()> {
        let cli = Cli::parse();
        cli.init_tracing();
        cli.run().await
    }

    /// Parse from an iterator of arguments, without installing logging.
    pub async fn run_from<I, T>(args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::parse_from(args).run().await
    }

    async fn run(self) -> Result<()> {
        match self.command {
            Command::Resolve(cmd) => cmd.run().await,
            Command::Check(cmd) => cmd.run(),
        }
    }

    /// Default level for when `RUST_LOG` is unset.
    fn default_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    fn init_tracing(&self) {
        let default = self.default_level();
        tracing_subscriber::fmt()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .init();
    }
}
