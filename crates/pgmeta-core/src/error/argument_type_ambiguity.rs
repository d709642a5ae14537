use super::Error;

/// Error when an argument's type can be determined neither from
/// configuration nor from describing the statement.
#[derive(Debug)]
pub(super) struct ArgumentTypeAmbiguityError {
    argument: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for ArgumentTypeAmbiguityError {}

impl core::fmt::Display for ArgumentTypeAmbiguityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot determine type of argument `{}`: {}",
            self.argument, self.reason
        )
    }
}

impl Error {
    pub fn argument_type_ambiguity(
        argument: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::ArgumentTypeAmbiguity(
            ArgumentTypeAmbiguityError {
                argument: argument.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an argument type ambiguity error.
    pub fn is_argument_type_ambiguity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ArgumentTypeAmbiguity(_))
    }
}
