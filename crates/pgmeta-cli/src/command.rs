use anyhow::{Context, Result};
use clap::Parser;
use pgmeta::{Config, Resolver};
use pgmeta_driver_postgresql::PostgreSQL;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
pub struct ResolveCommand {
    /// Path to the TOML configuration
    config: PathBuf,

    /// Connection URL, e.g. `postgresql://user@localhost/app`
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Write the model here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Path to the TOML configuration
    config: PathBuf,
}

impl ResolveCommand {
    pub(crate) async fn run(self) -> Result<()> {
        let config = load(&self.config)?;

        let catalog = PostgreSQL::connect(&self.database_url)
            .await
            .context("failed to connect to the database")?;

        let model = Resolver::new(catalog, config)?.resolve().await?;
        let json = serde_json::to_string_pretty(&model)?;

        match &self.output {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), "wrote model");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }
}

impl CheckCommand {
    pub(crate) fn run(self) -> Result<()> {
        let config = load(&self.config)?;
        config.validate()?;

        tracing::info!(
            tables = config.tables.len(),
            queries = config.queries.len(),
            stored_functions = config.stored_functions.len(),
            statements = config.statements.len(),
            unknown_keys = config.unknown_keys().len(),
            "configuration is valid"
        );
        Ok(())
    }
}

fn load(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("failed to load {}", path.display()))
}
