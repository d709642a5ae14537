use super::Error;

/// Error when the configuration is malformed or internally inconsistent.
#[derive(Debug)]
pub(super) struct InvalidConfigError {
    message: Box<str>,
}

impl std::error::Error for InvalidConfigError {}

impl core::fmt::Display for InvalidConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConfig(InvalidConfigError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConfig(_))
    }
}
