use super::Error;

/// Error when a native type has neither a user override nor a built-in
/// mapping.
#[derive(Debug)]
pub(super) struct UnknownTypeError {
    native: Box<str>,
}

impl std::error::Error for UnknownTypeError {}

impl core::fmt::Display for UnknownTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown type `{}`: no override and no built-in mapping",
            self.native
        )
    }
}

impl Error {
    pub fn unknown_type(native: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownType(UnknownTypeError {
            native: native.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown type error.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownType(_))
    }
}
