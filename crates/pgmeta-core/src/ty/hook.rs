use serde::{Serialize, Serializer};
use std::fmt;

const PLACEHOLDER: &str = "{expr}";

/// A code template over a single expression.
///
/// Emission calls [`Hook::apply`] with the expression being bound or
/// received, e.g. `value.email` or a column index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hook(String);

impl Hook {
    /// `template` refers to the expression as `{expr}`.
    pub fn new(template: impl Into<String>) -> Hook {
        Hook(template.into())
    }

    pub fn apply(&self, expr: &str) -> String {
        self.0.replace(PLACEHOLDER, expr)
    }

    pub fn template(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Hook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
