use super::Error;

/// Error when the configured argument list and the statement's positional
/// parameters disagree in length.
#[derive(Debug)]
pub(super) struct ArgumentCountError {
    configured: usize,
    actual: usize,
}

impl std::error::Error for ArgumentCountError {}

impl core::fmt::Display for ArgumentCountError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "argument count mismatch: {} argument(s) configured, {} expected",
            self.configured, self.actual
        )
    }
}

impl Error {
    /// Creates an argument count error from the number of configured
    /// arguments and the number of parameters the statement takes.
    pub fn argument_count(configured: usize, actual: usize) -> Error {
        Error::from(super::ErrorKind::ArgumentCount(ArgumentCountError {
            configured,
            actual,
        }))
    }

    /// Returns `true` if this error is an argument count error.
    pub fn is_argument_count(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ArgumentCount(_))
    }
}
