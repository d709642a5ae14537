use super::{validate_args, UnknownKeys};
use crate::{Error, Result};
use serde::Deserialize;

/// A named query returning rows.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    pub name: String,

    /// Parameterized SQL text using `$1`, `$2`, ... placeholders.
    pub body: String,

    /// The accessor returns one row, failing with a not-found error when
    /// nothing matches.
    #[serde(default)]
    pub single_result: bool,

    /// Every argument takes the nullable-wrapped type.
    #[serde(default)]
    pub nullable_arguments: bool,

    /// Argument names in positional order. Defaults to `arg0`, `arg1`, ...
    #[serde(default)]
    pub arg_names: Option<Vec<String>>,

    /// Native argument types in positional order. When absent, types come
    /// from describing the statement.
    #[serde(default)]
    pub arg_types: Option<Vec<String>>,

    /// Name of the synthesized row type. Defaults to `<Name>Row`.
    #[serde(default)]
    pub return_type: Option<String>,

    /// Result columns known never to be null. Result columns are nullable
    /// otherwise, since describe cannot report nullability.
    #[serde(default)]
    pub not_null_fields: Vec<String>,

    #[serde(default)]
    pub box_results: bool,

    #[serde(flatten)]
    pub(crate) unknown: UnknownKeys,
}

/// A stored function called as `SELECT * FROM name($1, ...)`.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionConfig {
    /// Native function name.
    pub name: String,

    #[serde(default)]
    pub return_type: Option<String>,

    #[serde(default)]
    pub not_null_fields: Vec<String>,

    /// Overrides the argument names declared in the catalog.
    #[serde(default)]
    pub arg_names: Option<Vec<String>>,

    /// Overrides the argument types declared in the catalog.
    #[serde(default)]
    pub arg_types: Option<Vec<String>>,

    #[serde(flatten)]
    pub(crate) unknown: UnknownKeys,
}

/// A named statement returning an affected-row count.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementConfig {
    pub name: String,

    pub body: String,

    #[serde(default)]
    pub nullable_arguments: bool,

    #[serde(default)]
    pub arg_names: Option<Vec<String>>,

    #[serde(default)]
    pub arg_types: Option<Vec<String>>,

    #[serde(flatten)]
    pub(crate) unknown: UnknownKeys,
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

fn validate_body(what: &str, name: &str, body: &str) -> Result<()> {
    if body.trim().is_empty() {
        return Err(Error::invalid_config(format!(
            "{what} `{name}` has an empty body"
        )));
    }
    Ok(())
}

impl QueryConfig {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            single_result: false,
            nullable_arguments: false,
            arg_names: None,
            arg_types: None,
            return_type: None,
            not_null_fields: vec![],
            box_results: false,
            unknown: UnknownKeys::new(),
        }
    }

    pub fn single_result(mut self, single_result: bool) -> Self {
        self.single_result = single_result;
        self
    }

    pub fn nullable_arguments(mut self, nullable_arguments: bool) -> Self {
        self.nullable_arguments = nullable_arguments;
        self
    }

    pub fn arg_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_names = Some(strings(names));
        self
    }

    pub fn arg_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_types = Some(strings(types));
        self
    }

    pub fn return_type(mut self, name: impl Into<String>) -> Self {
        self.return_type = Some(name.into());
        self
    }

    pub fn not_null_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_null_fields = strings(fields);
        self
    }

    pub fn box_results(mut self, box_results: bool) -> Self {
        self.box_results = box_results;
        self
    }

    pub(super) fn validate(&self) -> Result<()> {
        validate_body("query", &self.name, &self.body)?;
        validate_args(self.arg_names.as_deref(), self.arg_types.as_deref())
            .map_err(|err| err.context(err!("query `{}`", self.name)))
    }
}

impl FunctionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            not_null_fields: vec![],
            arg_names: None,
            arg_types: None,
            unknown: UnknownKeys::new(),
        }
    }

    pub fn return_type(mut self, name: impl Into<String>) -> Self {
        self.return_type = Some(name.into());
        self
    }

    pub fn not_null_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_null_fields = strings(fields);
        self
    }

    pub fn arg_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_names = Some(strings(names));
        self
    }

    pub fn arg_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_types = Some(strings(types));
        self
    }

    pub(super) fn validate(&self) -> Result<()> {
        validate_args(self.arg_names.as_deref(), self.arg_types.as_deref())
            .map_err(|err| err.context(err!("stored function `{}`", self.name)))
    }
}

impl StatementConfig {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
            nullable_arguments: false,
            arg_names: None,
            arg_types: None,
            unknown: UnknownKeys::new(),
        }
    }

    pub fn nullable_arguments(mut self, nullable_arguments: bool) -> Self {
        self.nullable_arguments = nullable_arguments;
        self
    }

    pub fn arg_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_names = Some(strings(names));
        self
    }

    pub fn arg_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arg_types = Some(strings(types));
        self
    }

    pub(super) fn validate(&self) -> Result<()> {
        validate_body("statement", &self.name, &self.body)?;
        validate_args(self.arg_names.as_deref(), self.arg_types.as_deref())
            .map_err(|err| err.context(err!("statement `{}`", self.name)))
    }
}
