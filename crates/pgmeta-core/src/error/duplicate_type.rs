use super::Error;

/// Error when two different declarations are registered under one type
/// name. Emission assumes a name identifies exactly one definition.
#[derive(Debug)]
pub(super) struct DuplicateTypeError {
    name: Box<str>,
}

impl std::error::Error for DuplicateTypeError {}

impl core::fmt::Display for DuplicateTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "duplicate type `{}`: two different definitions were registered under one name",
            self.name
        )
    }
}

impl Error {
    pub fn duplicate_type(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateType(DuplicateTypeError {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate type error.
    pub fn is_duplicate_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateType(_))
    }
}
