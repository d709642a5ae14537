#[macro_use]
mod macros;

pub use fixture_catalog::{FixtureCatalog, TableFixture};

pub use logging_catalog::{CatalogOp, InFlight, LoggingCatalog};


pub use std_util::*;

use pgmeta::{Config, Model, Resolver, Result};

/// Installs a test subscriber so `RUST_LOG=debug cargo test` shows the
/// resolver's logs. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Resolves `config` against `catalog` in one call.
pub async fn resolve(catalog: FixtureCatalog, config: Config) -> Result<Model> {
    init_tracing();
    Resolver::new(catalog, config)?.resolve().await
}

/// The `users` table most tests start from:
///
/// ```sql
/// users(id serial primary key, email text not null, nickname text, deleted_at timestamptz)
/// ```
pub fn users_table() -> TableFixture {
    TableFixture::new("users")
        .column("id", "serial")
        .primary_key()
        .has_default()
        .column("email", "text")
        .not_null()
        .unique()
        .column("nickname", "text")
        .column("deleted_at", "timestamptz")
}
