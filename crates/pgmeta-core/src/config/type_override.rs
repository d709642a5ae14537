use super::UnknownKeys;
use serde::Deserialize;

/// Maps one native type onto a user-chosen target type.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeOverride {
    /// Native type name, in any spelling the catalog understands.
    pub pg_type_name: String,

    pub rust_type_name: String,

    /// Defaults to `Option<rust_type_name>`.
    #[serde(default)]
    pub nullable_rust_type_name: Option<String>,

    #[serde(flatten)]
    pub(crate) unknown: UnknownKeys,
}

impl TypeOverride {
    pub fn new(pg_type_name: impl Into<String>, rust_type_name: impl Into<String>) -> Self {
        Self {
            pg_type_name: pg_type_name.into(),
            rust_type_name: rust_type_name.into(),
            nullable_rust_type_name: None,
            unknown: UnknownKeys::new(),
        }
    }

    pub fn nullable_rust_type_name(mut self, name: impl Into<String>) -> Self {
        self.nullable_rust_type_name = Some(name.into());
        self
    }
}
