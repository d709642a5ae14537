use super::Error;

/// Error when a table has no catalog-declared primary key.
///
/// The table name is attached as context by the resolver.
#[derive(Debug)]
pub(super) struct MissingPrimaryKeyError;

impl std::error::Error for MissingPrimaryKeyError {}

impl core::fmt::Display for MissingPrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("missing primary key")
    }
}

impl Error {
    pub fn missing_primary_key() -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKeyError))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingPrimaryKey(_))
    }
}
