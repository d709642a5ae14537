use super::{args::ArgList, Resolver};

use indexmap::IndexMap;
use pgmeta_core::{
    catalog::DescribedColumn,
    config::{FunctionConfig, QueryConfig, StatementConfig},
    err,
    query::{FunctionModel, QueryModel, ReturnShape, StatementModel},
    schema::TableModel,
    ty::{field_ident, RowDecl, RowField, TypeDecl},
    Error, Result,
};
use std::collections::HashSet;
use std_util::str;

/// How a row-returning call names and types its results.
struct ReturnSpec<'a> {
    /// Configured name of the query or function; synthesized row types
    /// default to `<Name>Row`.
    owner: &'a str,
    return_type: Option<&'a str>,
    not_null_fields: &'a [String],
}

impl Resolver {
    pub(super) async fn resolve_queries(
        &self,
        tables: &IndexMap<String, TableModel>,
    ) -> Result<IndexMap<String, QueryModel>> {
        let mut queries = IndexMap::with_capacity(self.config.queries.len());

        for config in &self.config.queries {
            let query = self
                .resolve_query(tables, config)
                .await
                .map_err(|err| err.context(err!("query `{}`", config.name)))?;

            tracing::debug!(
                query = %query.name,
                args = query.args.len(),
                returns = query.returns.type_name(),
                "resolved query"
            );
            queries.insert(query.name.clone(), query);
        }

        Ok(queries)
    }

    async fn resolve_query(
        &self,
        tables: &IndexMap<String, TableModel>,
        config: &QueryConfig,
    ) -> Result<QueryModel> {
        let list = ArgList::new(
            config.arg_names.as_deref(),
            config.arg_types.as_deref(),
            config.nullable_arguments,
        );

        let description = self.catalog.describe(&config.body, &list.hints()).await?;
        let args = self.resolve_args(&list, &description.params)?;

        let returns = self.resolve_return(
            tables,
            &ReturnSpec {
                owner: &config.name,
                return_type: config.return_type.as_deref(),
                not_null_fields: &config.not_null_fields,
            },
            &description.columns,
        )?;

        Ok(QueryModel {
            name: config.name.clone(),
            body: config.body.clone(),
            args,
            returns,
            single_result: config.single_result,
            multi_return: description.columns.len() > 1,
            box_results: config.box_results,
        })
    }

    pub(super) async fn resolve_functions(
        &self,
        tables: &IndexMap<String, TableModel>,
    ) -> Result<IndexMap<String, FunctionModel>> {
        let mut functions = IndexMap::with_capacity(self.config.stored_functions.len());

        for config in &self.config.stored_functions {
            let function = self
                .resolve_function(tables, config)
                .await
                .map_err(|err| err.context(err!("stored function `{}`", config.name)))?;

            tracing::debug!(
                function = %function.name,
                args = function.args.len(),
                returns = function.returns.type_name(),
                "resolved stored function"
            );
            functions.insert(function.name.clone(), function);
        }

        Ok(functions)
    }

    async fn resolve_function(
        &self,
        tables: &IndexMap<String, TableModel>,
        config: &FunctionConfig,
    ) -> Result<FunctionModel> {
        let facts = self.catalog.function(&config.name).await?;

        let list = ArgList {
            declared_names: &facts.arg_names,
            declared_types: &facts.arg_types,
            ..ArgList::new(
                config.arg_names.as_deref(),
                config.arg_types.as_deref(),
                false,
            )
        };

        let arity = config
            .arg_types
            .as_ref()
            .map_or(facts.arg_types.len(), Vec::len);
        let placeholders: Vec<_> = (1..=arity).map(|i| format!("${i}")).collect();
        let body = format!("SELECT * FROM {}({})", config.name, placeholders.join(", "));

        let description = self.catalog.describe(&body, &list.hints()).await?;
        let args = self.resolve_args(&list, &description.params)?;

        let returns = self.resolve_return(
            tables,
            &ReturnSpec {
                owner: &config.name,
                return_type: config.return_type.as_deref(),
                not_null_fields: &config.not_null_fields,
            },
            &description.columns,
        )?;

        Ok(FunctionModel {
            name: config.name.clone(),
            body,
            args,
            returns,
            multi_return: description.columns.len() > 1,
        })
    }

    pub(super) async fn resolve_statements(&self) -> Result<IndexMap<String, StatementModel>> {
        let mut statements = IndexMap::with_capacity(self.config.statements.len());

        for config in &self.config.statements {
            let statement = self
                .resolve_statement(config)
                .await
                .map_err(|err| err.context(err!("statement `{}`", config.name)))?;

            tracing::debug!(
                statement = %statement.name,
                args = statement.args.len(),
                "resolved statement"
            );
            statements.insert(statement.name.clone(), statement);
        }

        Ok(statements)
    }

    async fn resolve_statement(&self, config: &StatementConfig) -> Result<StatementModel> {
        let list = ArgList::new(
            config.arg_names.as_deref(),
            config.arg_types.as_deref(),
            config.nullable_arguments,
        );

        let description = self.catalog.describe(&config.body, &list.hints()).await?;

        if !description.columns.is_empty() {
            tracing::debug!(
                statement = %config.name,
                columns = description.columns.len(),
                "statement returns rows; only the affected-row count is kept"
            );
        }

        Ok(StatementModel {
            name: config.name.clone(),
            body: config.body.clone(),
            args: self.resolve_args(&list, &description.params)?,
        })
    }

    /// Decides what one result row decodes into.
    ///
    /// A result whose column names are exactly some table's columns reuses
    /// that table's row type. Otherwise a single column is returned as a bare
    /// value and several columns get a synthesized row type.
    fn resolve_return(
        &self,
        tables: &IndexMap<String, TableModel>,
        spec: &ReturnSpec<'_>,
        columns: &[DescribedColumn],
    ) -> Result<ReturnShape> {
        if columns.is_empty() {
            return Err(Error::invalid_config(
                "returns no columns; configure it as a statement",
            ));
        }

        let mut seen = HashSet::new();
        for column in columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::invalid_config(format!(
                    "result column `{}` appears more than once",
                    column.name
                )));
            }
        }

        for name in spec.not_null_fields {
            if !seen.contains(name.as_str()) {
                return Err(Error::schema_not_found("result column", name.as_str()));
            }
        }

        let table = tables.values().find(|table| {
            spec.return_type
                .map_or(true, |name| name == table.type_name)
                && table.has_column_set(columns.iter().map(|column| column.name.as_str()))
        });

        if let Some(table) = table {
            return Ok(ReturnShape::Table {
                table: table.name.clone(),
                type_name: table.type_name.clone(),
            });
        }

        let nullable = |column: &DescribedColumn| !spec.not_null_fields.contains(&column.name);

        if let ([column], None) = (columns, spec.return_type) {
            let ty = self
                .registry
                .resolve(&column.ty)
                .map_err(|err| err.context(err!("result column `{}`", column.name)))?;

            return Ok(ReturnShape::Scalar {
                ty,
                nullable: nullable(column),
            });
        }

        let type_name = match spec.return_type {
            Some(name) => name.to_string(),
            None => format!("{}Row", str::upper_camel_case(spec.owner)),
        };

        let fields = columns
            .iter()
            .map(|column| {
                let ty = self
                    .registry
                    .resolve(&column.ty)
                    .map_err(|err| err.context(err!("result column `{}`", column.name)))?;

                Ok(RowField {
                    column: column.name.clone(),
                    ident: field_ident(&column.name),
                    ty,
                    nullable: nullable(column),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.registry.emit_on_demand(TypeDecl::Row(RowDecl {
            name: type_name.clone(),
            fields,
        }))?;

        Ok(ReturnShape::Row { type_name })
    }
}
