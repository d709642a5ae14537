#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pgmeta_cli::Cli::parse_and_run().await
}
