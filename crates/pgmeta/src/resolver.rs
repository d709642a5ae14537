mod args;
mod query;
mod relation;
mod table;

use crate::Model;

use pgmeta_core::{schema::BitLayout, ty::TypeRegistry, Catalog, Config, Result};
use std::sync::Arc;

/// Resolves a [`Config`] against a [`Catalog`] into a [`Model`].
///
/// Stages run in order: tables, relationships, queries, stored functions,
/// statements, then field-mask layouts. The first error aborts the run.
#[derive(Debug)]
pub struct Resolver {
    catalog: Arc<dyn Catalog>,
    config: Config,
    registry: TypeRegistry,
}

impl Resolver {
    /// Validates `config` and prepares a resolution run. Nothing touches
    /// the catalog until [`Resolver::resolve`].
    pub fn new(catalog: impl Catalog + 'static, config: Config) -> Result<Resolver> {
        Resolver::with_shared_catalog(Arc::new(catalog), config)
    }

    pub fn with_shared_catalog(catalog: Arc<dyn Catalog>, config: Config) -> Result<Resolver> {
        config.validate()?;
        let registry = TypeRegistry::with_overrides(&config.type_overrides)?;

        Ok(Resolver {
            catalog,
            config,
            registry,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn resolve(self) -> Result<Model> {
        let mut tables = self.resolve_tables().await?;
        tracing::info!(tables = tables.len(), "resolved tables");

        relation::link(&mut tables);

        let queries = self.resolve_queries(&tables).await?;
        let stored_functions = self.resolve_functions(&tables).await?;
        let statements = self.resolve_statements().await?;
        tracing::info!(
            queries = queries.len(),
            stored_functions = stored_functions.len(),
            statements = statements.len(),
            "resolved queries"
        );

        let layouts = tables
            .values()
            .map(|table| (table.name.clone(), BitLayout::for_table(table)))
            .collect();

        let types = self.registry.declarations();
        tracing::info!(types = types.len(), "resolution complete");

        Ok(Model {
            tables,
            queries,
            stored_functions,
            statements,
            layouts,
            types,
            descriptors: self.registry.descriptors(),
        })
    }
}
