use super::UnknownKeys;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;

/// Per-table configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Native table name.
    pub name: String,

    /// Accessors return boxed rows rather than rows by value.
    #[serde(default)]
    pub box_results: bool,

    /// Defaults to `created_at` when such a column exists.
    #[serde(default)]
    pub created_at_field: Option<String>,

    /// Defaults to `updated_at` when such a column exists.
    #[serde(default)]
    pub updated_at_field: Option<String>,

    /// Defaults to `deleted_at` when such a column exists.
    #[serde(default)]
    pub deleted_at_field: Option<String>,

    /// Disables created/updated timestamp handling for this table.
    #[serde(default)]
    pub no_timestamps: bool,

    /// When non-empty, only these columns (plus the primary key) are used.
    #[serde(default)]
    pub include_columns: Vec<String>,

    #[serde(default)]
    pub exclude_columns: Vec<String>,

    /// Columns that never appear in an update.
    #[serde(default)]
    pub immutable_fields: Vec<String>,

    /// `json`/`jsonb` columns decoded as a user type instead of a raw value.
    #[serde(default, rename = "json_type")]
    pub json_types: Vec<JsonType>,

    #[serde(flatten)]
    pub(crate) unknown: UnknownKeys,
}

impl TableConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            box_results: false,
            created_at_field: None,
            updated_at_field: None,
            deleted_at_field: None,
            no_timestamps: false,
            include_columns: vec![],
            exclude_columns: vec![],
            immutable_fields: vec![],
            json_types: vec![],
            unknown: UnknownKeys::new(),
        }
    }

    pub fn box_results(mut self, box_results: bool) -> Self {
        self.box_results = box_results;
        self
    }

    pub fn created_at_field(mut self, column: impl Into<String>) -> Self {
        self.created_at_field = Some(column.into());
        self
    }

    pub fn updated_at_field(mut self, column: impl Into<String>) -> Self {
        self.updated_at_field = Some(column.into());
        self
    }

    pub fn deleted_at_field(mut self, column: impl Into<String>) -> Self {
        self.deleted_at_field = Some(column.into());
        self
    }

    pub fn no_timestamps(mut self, no_timestamps: bool) -> Self {
        self.no_timestamps = no_timestamps;
        self
    }

    pub fn include_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn immutable_fields<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.immutable_fields = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn json_type(mut self, column: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.json_types.push(JsonType {
            column_name: column.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// True if `column` survives the include/exclude filters.
    pub fn includes(&self, column: &str) -> bool {
        if !self.include_columns.is_empty() {
            return self.include_columns.iter().any(|c| c == column);
        }
        !self.exclude_columns.iter().any(|c| c == column)
    }

    pub fn is_immutable(&self, column: &str) -> bool {
        self.immutable_fields.iter().any(|c| c == column)
    }

    /// The user type configured for a json column, if any.
    pub fn json_type_of(&self, column: &str) -> Option<&str> {
        self.json_types
            .iter()
            .find(|json| json.column_name == column)
            .map(|json| json.type_name.as_str())
    }

    pub(super) fn validate(&self) -> Result<()> {
        if !self.include_columns.is_empty() && !self.exclude_columns.is_empty() {
            return Err(Error::invalid_config(format!(
                "table `{}` sets both `include_columns` and `exclude_columns`",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for json in &self.json_types {
            if json.type_name.is_empty() {
                return Err(Error::invalid_config(format!(
                    "json column `{}` has an empty `type_name`",
                    json.column_name
                )));
            }

            if !seen.insert(json.column_name.as_str()) {
                return Err(Error::invalid_config(format!(
                    "json column `{}` is configured more than once",
                    json.column_name
                )));
            }
        }
        Ok(())
    }
}

/// Decodes one `json`/`jsonb` column into `type_name` rather than
/// `serde_json::Value`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonType {
    pub column_name: String,

    /// Any type implementing `serde::Deserialize` and `serde::Serialize`.
    pub type_name: String,
}
