mod statement_cache;
use statement_cache::StatementCache;

mod r#type;

use pgmeta_core::{
    async_trait, bail,
    catalog::{
        ColumnFacts, DescribedColumn, Description, ForeignKeyFacts, FunctionFacts, NativeType,
        TableFacts,
    },
    Catalog, Error, Result,
};
use postgres::{
    tls::MakeTlsConnect,
    types::{Oid, Type},
    Socket,
};
use tokio_postgres::{Client, Config};
use url::Url;

/// `$1` is the schema, or null to search the session's `search_path`.
const TABLE_OID: &str = "
    SELECT c.oid
    FROM pg_catalog.pg_class c
    JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
    WHERE c.relname = $2
      AND c.relkind IN ('r', 'p', 'v', 'm', 'f')
      AND CASE
        WHEN $1::text IS NULL THEN pg_catalog.pg_table_is_visible(c.oid)
        ELSE n.nspname = $1::text
      END";

const COLUMNS: &str = "
    SELECT a.attname, a.attnum, a.attnotnull, a.atthasdef OR a.attidentity <> ''
    FROM pg_catalog.pg_attribute a
    WHERE a.attrelid = $1 AND a.attnum > 0 AND NOT a.attisdropped
    ORDER BY a.attnum";

const PRIMARY_KEY: &str = "
    SELECT a.attname
    FROM pg_catalog.pg_index i
    JOIN pg_catalog.pg_attribute a ON a.attrelid = i.indrelid AND a.attnum = ANY(i.indkey)
    WHERE i.indrelid = $1 AND i.indisprimary";

const UNIQUE_COLUMNS: &str = "
    SELECT a.attname
    FROM pg_catalog.pg_index i
    JOIN pg_catalog.pg_attribute a ON a.attrelid = i.indrelid AND a.attnum = i.indkey[0]
    WHERE i.indrelid = $1 AND i.indisunique AND i.indnatts = 1 AND i.indpred IS NULL";

/// Referenced tables outside the `search_path` come back schema-qualified.
const FOREIGN_KEYS: &str = "
    SELECT
      a.attname,
      CASE
        WHEN pg_catalog.pg_table_is_visible(fc.oid) THEN fc.relname::text
        ELSE fn.nspname || '.' || fc.relname
      END,
      fa.attname
    FROM pg_catalog.pg_constraint con
    JOIN pg_catalog.pg_class fc ON fc.oid = con.confrelid
    JOIN pg_catalog.pg_namespace fn ON fn.oid = fc.relnamespace
    JOIN pg_catalog.pg_attribute a ON a.attrelid = con.conrelid AND a.attnum = con.conkey[1]
    JOIN pg_catalog.pg_attribute fa ON fa.attrelid = con.confrelid AND fa.attnum = con.confkey[1]
    WHERE con.conrelid = $1 AND con.contype = 'f' AND array_length(con.conkey, 1) = 1
    ORDER BY con.conname";

const FUNCTION: &str = "
    SELECT p.pronargs, p.proargnames, p.proargmodes::text[]
    FROM pg_catalog.pg_proc p
    WHERE p.proname = $1 AND pg_catalog.pg_function_is_visible(p.oid)";

const TYPE_OID: &str = "SELECT pg_catalog.to_regtype($1)::oid";

/// A [`Catalog`] over a live PostgreSQL database.
///
/// Every call goes through the one client, so a resolution run sees a
/// single session. Nothing here writes: catalog reads are plain selects and
/// described statements are prepared but never executed.
#[derive(Debug)]
pub struct PostgreSQL {
    /// The PostgreSQL client.
    client: Client,

    /// Statements already described this session.
    statements: StatementCache,
}

impl PostgreSQL {
    /// Wraps an already connected client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            statements: StatementCache::new(),
        }
    }

    /// Connects to a PostgreSQL database using a connection string.
    ///
    /// See [`postgres::Client::connect`] for more information.
    pub async fn connect(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(anyhow::Error::from)?;

        if !matches!(url.scheme(), "postgresql" | "postgres") {
            bail!(
                "connection URL does not have a `postgresql` scheme; url={}",
                url
            );
        }

        let Some(host) = url.host_str() else {
            bail!("missing host in connection URL; url={}", url);
        };

        if url.path().is_empty() || url.path() == "/" {
            bail!(
                "no database specified - missing path in connection URL; url={}",
                url
            );
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(url.path().trim_start_matches('/'));
        config.application_name("pgmeta");

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Self::connect_with_config(config, tokio_postgres::NoTls).await
    }

    /// Connects to a PostgreSQL database using a [`postgres::Config`].
    ///
    /// See [`postgres::Client::configure`] for more information.
    pub async fn connect_with_config<T>(config: Config, tls: T) -> Result<Self>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = config.connect(tls).await.map_err(Error::driver)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "connection error");
            }
        });

        Ok(Self::new(client))
    }

    async fn table_oid(&self, name: &str) -> Result<Oid> {
        let (schema, table) = split_qualified(name);
        let row = self
            .client
            .query_opt(TABLE_OID, &[&schema, &table])
            .await
            .map_err(Error::driver)?;

        match row {
            Some(row) => row.try_get(0).map_err(Error::driver),
            None => Err(Error::schema_not_found("table", name)),
        }
    }

    /// Column types as the server reports them for `SELECT *`, which
    /// resolves enums, composites, and domains down to their structure.
    async fn column_types(&self, name: &str) -> Result<Vec<(String, NativeType)>> {
        let sql = format!("SELECT * FROM {}", quote_ident(name));
        let statement = self.client.prepare(&sql).await.map_err(Error::driver)?;

        Ok(statement
            .columns()
            .iter()
            .map(|column| (column.name().to_string(), r#type::native_type(column.type_())))
            .collect())
    }

    async fn names(&self, sql: &str, oid: Oid) -> Result<Vec<String>> {
        self.client
            .query(sql, &[&oid])
            .await
            .map_err(Error::driver)?
            .iter()
            .map(|row| row.try_get(0).map_err(Error::driver))
            .collect()
    }

    /// Turns describe hints into server types. Names the server does not
    /// know are left for it to infer.
    async fn hint_types(&self, hints: &[NativeType]) -> Result<Vec<Type>> {
        let mut types = Vec::with_capacity(hints.len());

        for hint in hints {
            if let Some(ty) = r#type::builtin_type(hint) {
                types.push(ty);
                continue;
            }

            let oid: Option<Oid> = self
                .client
                .query_one(TYPE_OID, &[&hint.name])
                .await
                .and_then(|row| row.try_get(0))
                .map_err(Error::driver)?;

            match oid {
                Some(oid) => types.push(Type::new(
                    hint.name.clone(),
                    oid,
                    postgres::types::Kind::Simple,
                    "public".into(),
                )),
                None => {
                    tracing::debug!(hint = %hint, "unrecognized type hint; letting the server infer");
                    types.push(r#type::unspecified());
                }
            }
        }

        Ok(types)
    }
}

impl From<Client> for PostgreSQL {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

#[async_trait]
impl Catalog for PostgreSQL {
    async fn table(&self, name: &str) -> Result<TableFacts> {
        let oid = self.table_oid(name).await?;
        let types = self.column_types(name).await?;

        let mut columns = vec![];
        for row in self
            .client
            .query(COLUMNS, &[&oid])
            .await
            .map_err(Error::driver)?
        {
            let column: String = row.try_get(0).map_err(Error::driver)?;
            let ordinal: i16 = row.try_get(1).map_err(Error::driver)?;
            let not_null: bool = row.try_get(2).map_err(Error::driver)?;
            let has_default: bool = row.try_get(3).map_err(Error::driver)?;

            let Some((_, ty)) = types.iter().find(|(name, _)| *name == column) else {
                return Err(Error::schema_not_found("column", column));
            };

            columns.push(ColumnFacts {
                ty: ty.clone(),
                name: column,
                nullable: !not_null,
                has_default,
                ordinal: ordinal as usize,
            });
        }

        let primary_key = match &self.names(PRIMARY_KEY, oid).await?[..] {
            [] => None,
            [column] => Some(column.clone()),
            columns => {
                tracing::warn!(
                    table = name,
                    columns = ?columns,
                    "composite primary keys are not supported"
                );
                None
            }
        };

        let mut foreign_keys = vec![];
        for row in self
            .client
            .query(FOREIGN_KEYS, &[&oid])
            .await
            .map_err(Error::driver)?
        {
            foreign_keys.push(ForeignKeyFacts {
                column: row.try_get(0).map_err(Error::driver)?,
                references_table: row.try_get(1).map_err(Error::driver)?,
                references_column: row.try_get(2).map_err(Error::driver)?,
            });
        }

        tracing::trace!(table = name, columns = columns.len(), "read table facts");

        Ok(TableFacts {
            name: name.to_string(),
            columns,
            primary_key,
            unique_columns: self.names(UNIQUE_COLUMNS, oid).await?,
            foreign_keys,
        })
    }

    async fn function(&self, name: &str) -> Result<FunctionFacts> {
        let proname = name.rsplit('.').next().unwrap_or(name);
        let rows = self
            .client
            .query(FUNCTION, &[&proname])
            .await
            .map_err(Error::driver)?;

        let row = match &rows[..] {
            [] => return Err(Error::schema_not_found("function", name)),
            [row] => row,
            _ => bail!("function `{name}` is overloaded; overloaded functions are not supported"),
        };

        let nargs: i16 = row.try_get(0).map_err(Error::driver)?;
        let all_names: Option<Vec<String>> = row.try_get(1).map_err(Error::driver)?;
        let modes: Option<Vec<String>> = row.try_get(2).map_err(Error::driver)?;
        let arg_names = input_arg_names(all_names, modes, nargs as usize);

        // The server picks the signature's types for unhinted parameters.
        let placeholders: Vec<_> = (1..=nargs).map(|i| format!("${i}")).collect();
        let sql = format!("SELECT * FROM {}({})", name, placeholders.join(", "));
        let statement = self
            .statements
            .prepare_typed(&self.client, &sql, &[])
            .await
            .map_err(Error::driver)?;

        Ok(FunctionFacts {
            name: name.to_string(),
            arg_names,
            arg_types: statement.params().iter().map(r#type::native_type).collect(),
        })
    }

    async fn describe(&self, sql: &str, param_hints: &[NativeType]) -> Result<Description> {
        let hints = self.hint_types(param_hints).await?;
        let statement = self
            .statements
            .prepare_typed(&self.client, sql, &hints)
            .await
            .map_err(Error::driver)?;

        Ok(Description {
            params: statement.params().iter().map(r#type::native_type).collect(),
            columns: statement
                .columns()
                .iter()
                .map(|column| {
                    DescribedColumn::new(column.name(), r#type::native_type(column.type_()))
                })
                .collect(),
        })
    }
}

/// Names of the input arguments. `proargnames` also lists `OUT` and
/// `TABLE` arguments when `proargmodes` is set.
fn input_arg_names(
    names: Option<Vec<String>>,
    modes: Option<Vec<String>>,
    nargs: usize,
) -> Vec<Option<String>> {
    let names = names.unwrap_or_default();

    let mut inputs: Vec<Option<String>> = match modes {
        None => names.into_iter().map(Some).collect(),
        Some(modes) => names
            .into_iter()
            .zip(modes)
            .filter(|(_, mode)| matches!(mode.as_str(), "i" | "b" | "v"))
            .map(|(name, _)| Some(name))
            .collect(),
    };

    for name in &mut inputs {
        if name.as_deref() == Some("") {
            *name = None;
        }
    }

    inputs.resize(nargs, None);
    inputs
}

/// Splits `schema.table` into its parts. Unqualified names have no schema.
fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.split_once('.') {
        Some((schema, table)) => (Some(schema), table),
        None => (None, name),
    }
}

fn quote_ident(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}
