use super::Error;

/// Error when a configured table, column, or function is absent from the
/// live catalog.
#[derive(Debug)]
pub(super) struct SchemaNotFoundError {
    what: &'static str,
    name: Box<str>,
}

impl std::error::Error for SchemaNotFoundError {}

impl core::fmt::Display for SchemaNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} `{}` not found in the catalog", self.what, self.name)
    }
}

impl Error {
    /// Creates a schema not found error. `what` names the object kind
    /// (`"table"`, `"column"`, `"function"`).
    pub fn schema_not_found(what: &'static str, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaNotFound(SchemaNotFoundError {
            what,
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema not found error.
    pub fn is_schema_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SchemaNotFound(_))
    }
}
