mod query;
pub use query::{FunctionConfig, QueryConfig, StatementConfig};

mod table;
pub use table::{JsonType, TableConfig};

mod type_override;
pub use type_override::TypeOverride;

use crate::{Error, Result};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

/// Unrecognized keys captured while deserializing, reported as warnings.
pub(crate) type UnknownKeys = BTreeMap<String, toml::Value>;

const DEFAULT_CONCURRENCY: usize = 4;

/// Everything a resolution run needs to know about what to resolve.
///
/// Usually loaded from a TOML file with [`Config::load`], but every section
/// can also be assembled with the builder methods.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Maps native type names onto target types ahead of the built-in table.
    #[serde(default, rename = "type_override")]
    pub type_overrides: Vec<TypeOverride>,

    #[serde(default, rename = "table")]
    pub tables: Vec<TableConfig>,

    #[serde(default, rename = "query")]
    pub queries: Vec<QueryConfig>,

    #[serde(default, rename = "stored_function")]
    pub stored_functions: Vec<FunctionConfig>,

    #[serde(default, rename = "statement")]
    pub statements: Vec<StatementConfig>,

    /// Upper bound on concurrent catalog fetches for tables.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Ask `describe` for argument types the configuration leaves
    /// out. When false, every query, function, and statement must list
    /// `arg_types`.
    #[serde(default = "default_infer_arg_types")]
    pub infer_arg_types: bool,

    #[serde(flatten)]
    unknown: UnknownKeys,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_infer_arg_types() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            type_overrides: vec![],
            tables: vec![],
            queries: vec![],
            stored_functions: vec![],
            statements: vec![],
            concurrency: DEFAULT_CONCURRENCY,
            infer_arg_types: true,
            unknown: UnknownKeys::new(),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration file in TOML format.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Parse a TOML configuration. Unknown keys are logged, not rejected.
    pub fn from_toml(src: &str) -> Result<Self> {
        let config: Config = toml::from_str(src)?;

        for key in config.unknown_keys() {
            tracing::warn!(key = %key, "unknown config file key");
        }

        Ok(config)
    }

    pub fn type_override(mut self, type_override: TypeOverride) -> Self {
        self.type_overrides.push(type_override);
        self
    }

    pub fn table(mut self, table: TableConfig) -> Self {
        self.tables.push(table);
        self
    }

    pub fn query(mut self, query: QueryConfig) -> Self {
        self.queries.push(query);
        self
    }

    pub fn stored_function(mut self, function: FunctionConfig) -> Self {
        self.stored_functions.push(function);
        self
    }

    pub fn statement(mut self, statement: StatementConfig) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn infer_arg_types(mut self, infer_arg_types: bool) -> Self {
        self.infer_arg_types = infer_arg_types;
        self
    }

    /// Dotted paths of every key that was not recognized, e.g.
    /// `table[1].box_result`.
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.unknown.keys().cloned().collect();

        let sections = [
            ("type_override", collect(&self.type_overrides, |o| &o.unknown)),
            ("table", collect(&self.tables, |t| &t.unknown)),
            ("query", collect(&self.queries, |q| &q.unknown)),
            ("stored_function", collect(&self.stored_functions, |f| &f.unknown)),
            ("statement", collect(&self.statements, |s| &s.unknown)),
        ];

        for (section, entries) in sections {
            for (i, unknown) in entries.into_iter().enumerate() {
                keys.extend(unknown.keys().map(|key| format!("{section}[{i}].{key}")));
            }
        }

        keys
    }

    /// Checks the configuration for internal inconsistencies. Runs before
    /// anything touches the database.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::invalid_config("`concurrency` must be at least 1"));
        }

        unique_names("table", self.tables.iter().map(|t| t.name.as_str()))?;
        unique_names(
            "query, stored function, or statement",
            self.queries
                .iter()
                .map(|q| q.name.as_str())
                .chain(self.stored_functions.iter().map(|f| f.name.as_str()))
                .chain(self.statements.iter().map(|s| s.name.as_str())),
        )?;
        unique_names(
            "type override",
            self.type_overrides.iter().map(|o| o.pg_type_name.as_str()),
        )?;

        for table in &self.tables {
            table.validate()?;
        }

        for query in &self.queries {
            query.validate()?;
        }

        for function in &self.stored_functions {
            function.validate()?;
        }

        for statement in &self.statements {
            statement.validate()?;
        }

        Ok(())
    }
}

fn collect<T>(items: &[T], f: impl Fn(&T) -> &UnknownKeys) -> Vec<&UnknownKeys> {
    items.iter().map(f).collect()
}

fn unique_names<'a>(what: &str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(Error::invalid_config(format!("{what} with an empty name")));
        }

        if !seen.insert(name) {
            return Err(Error::invalid_config(format!(
                "{what} `{name}` is configured more than once"
            )));
        }
    }
    Ok(())
}

/// Shared validation of the optional explicit argument list.
pub(crate) fn validate_args(
    arg_names: Option<&[String]>,
    arg_types: Option<&[String]>,
) -> Result<()> {
    if let (Some(names), Some(types)) = (arg_names, arg_types) {
        if names.len() != types.len() {
            return Err(Error::invalid_config(format!(
                "{} `arg_names` but {} `arg_types`",
                names.len(),
                types.len()
            )));
        }
    }

    if let Some(names) = arg_names {
        unique_names("argument", names.iter().map(String::as_str))?;
    }

    Ok(())
}
