use super::Resolver;

use futures_util::{stream, StreamExt, TryStreamExt};
use indexmap::IndexMap;
use pgmeta_core::{
    catalog::{ColumnFacts, TableFacts},
    config::TableConfig,
    err,
    schema::{Column, ColumnRef, IncludeSpec, TableModel, TimestampColumn},
    ty::{field_ident, TypeDecl, TypeDescriptor},
    Error, Result,
};
use std_util::str;

impl Resolver {
    /// Fetches catalog facts for every configured table, at most
    /// `concurrency` at a time, then resolves them in configuration order.
    pub(super) async fn resolve_tables(&self) -> Result<IndexMap<String, TableModel>> {
        self.registry
            .reserve_row_names(self.config.tables.iter().map(|table| row_type_name(&table.name)));

        let facts: Vec<TableFacts> = stream::iter(&self.config.tables)
            .map(|table| async move {
                self.catalog
                    .table(&table.name)
                    .await
                    .map_err(|err| err.context(err!("table `{}`", table.name)))
            })
            .buffered(self.config.concurrency)
            .try_collect()
            .await?;

        let mut tables = IndexMap::with_capacity(facts.len());

        for (config, facts) in self.config.tables.iter().zip(facts) {
            let table = self
                .resolve_table(config, &facts)
                .map_err(|err| err.context(err!("table `{}`", config.name)))?;

            tracing::debug!(
                table = %table.name,
                columns = table.columns.len(),
                soft_delete = table.deleted_at.is_some(),
                "resolved table"
            );
            tables.insert(table.name.clone(), table);
        }

        Ok(tables)
    }

    fn resolve_table(&self, config: &TableConfig, facts: &TableFacts) -> Result<TableModel> {
        let Some(primary_key) = facts.primary_key.as_deref() else {
            return Err(Error::missing_primary_key());
        };

        if facts.column(primary_key).is_none() {
            return Err(Error::schema_not_found("column", primary_key));
        }

        for name in config
            .include_columns
            .iter()
            .chain(&config.exclude_columns)
            .chain(&config.immutable_fields)
        {
            if facts.column(name).is_none() {
                return Err(Error::schema_not_found("column", name.as_str()));
            }
        }

        for json in &config.json_types {
            let Some(column) = facts.column(&json.column_name) else {
                return Err(Error::schema_not_found("column", json.column_name.as_str()));
            };

            if !column.ty.is_json() {
                return Err(Error::invalid_config(format!(
                    "column `{}` must be json or jsonb to use `json_type`, found `{}`",
                    column.name, column.ty
                )));
            }
        }

        if config.exclude_columns.iter().any(|c| c == primary_key) {
            return Err(Error::invalid_config(format!(
                "primary key `{primary_key}` cannot be excluded"
            )));
        }

        let mut kept: Vec<&ColumnFacts> = facts
            .columns
            .iter()
            .filter(|column| column.name == primary_key || config.includes(&column.name))
            .collect();
        kept.sort_by_key(|column| column.ordinal);

        let columns = kept
            .into_iter()
            .map(|column| self.resolve_column(config, facts, column, primary_key))
            .collect::<Result<Vec<_>>>()?;

        let primary_key = columns
            .iter()
            .position(|column| column.primary_key)
            .ok_or_else(Error::missing_primary_key)?;

        let (created_at, updated_at) = if config.no_timestamps {
            (None, None)
        } else {
            (
                timestamp_column(
                    facts,
                    &columns,
                    config.created_at_field.as_deref(),
                    "created_at",
                )?,
                timestamp_column(
                    facts,
                    &columns,
                    config.updated_at_field.as_deref(),
                    "updated_at",
                )?,
            )
        };

        let deleted_at = timestamp_column(
            facts,
            &columns,
            config.deleted_at_field.as_deref(),
            "deleted_at",
        )?;

        if let Some(deleted_at) = &deleted_at {
            if !deleted_at.nullable {
                return Err(Error::invalid_config(format!(
                    "soft-delete column `{}` must be nullable",
                    deleted_at.column
                )));
            }
        }

        let table = TableModel {
            name: facts.name.clone(),
            type_name: row_type_name(&facts.name),
            columns,
            primary_key,
            created_at,
            updated_at,
            deleted_at,
            box_results: config.box_results,
            outgoing: vec![],
            incoming: vec![],
            include: IncludeSpec::leaf(&facts.name),
        };

        self.registry
            .emit_on_demand(TypeDecl::Row(table.row_decl()))?;

        Ok(table)
    }

    fn resolve_column(
        &self,
        config: &TableConfig,
        table: &TableFacts,
        column: &ColumnFacts,
        primary_key: &str,
    ) -> Result<Column> {
        let ty = match config.json_type_of(&column.name) {
            Some(type_name) => TypeDescriptor::json(column.ty.name.clone(), type_name),
            None => self
                .registry
                .resolve(&column.ty)
                .map_err(|err| err.context(err!("column `{}`", column.name)))?,
        };

        let is_primary_key = column.name == primary_key;

        let references = table
            .foreign_keys
            .iter()
            .find(|fk| fk.column == column.name)
            .map(|fk| ColumnRef {
                table: fk.references_table.clone(),
                column: fk.references_column.clone(),
            });

        Ok(Column {
            name: column.name.clone(),
            ident: field_ident(&column.name),
            ordinal: column.ordinal,
            native: column.ty.name.clone(),
            ty,
            nullable: column.nullable,
            mutable: !is_primary_key && !config.is_immutable(&column.name),
            has_default: column.has_default,
            primary_key: is_primary_key,
            unique: is_primary_key || table.is_unique(&column.name),
            references,
        })
    }
}

/// `order_items` -> `OrderItem`.
fn row_type_name(table: &str) -> String {
    str::upper_camel_case(&str::singularize(table))
}

/// Finds a created/updated/deleted timestamp column.
///
/// A configured column must exist among the kept columns and be a timestamp.
/// A conventionally named column is used only if it is a timestamp.
fn timestamp_column(
    facts: &TableFacts,
    columns: &[Column],
    configured: Option<&str>,
    conventional: &str,
) -> Result<Option<TimestampColumn>> {
    let name = configured.unwrap_or(conventional);

    let (Some(column), Some(column_facts)) = (
        columns.iter().find(|column| column.name == name),
        facts.column(name),
    ) else {
        return match configured {
            Some(name) => Err(Error::schema_not_found("column", name)),
            None => Ok(None),
        };
    };

    if !column_facts.ty.is_timestamp() {
        if configured.is_some() {
            return Err(Error::invalid_config(format!(
                "column `{name}` must be a timestamp, found `{}`",
                column_facts.ty
            )));
        }

        tracing::warn!(
            table = %facts.name,
            column = name,
            ty = %column_facts.ty,
            "conventional timestamp column is not a timestamp; ignoring"
        );
        return Ok(None);
    }

    Ok(Some(TimestampColumn {
        column: column.name.clone(),
        nullable: column.nullable,
        has_timezone: column_facts.ty.has_timezone(),
    }))
}
