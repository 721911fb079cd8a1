//! The validator's output type.

use std::fmt;

use crate::span::SourcePosition;

/// A single `(line, column)` location a diagnostic points at, 1-based and
/// counting Unicode scalar values for columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl From<SourcePosition> for SourceLocation {
    fn from(pos: SourcePosition) -> Self {
        SourceLocation {
            line: pos.line(),
            column: pos.column(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One static-validation failure: a message plus the source locations it
/// points at, in the order a rule produced them. `cause` carries a wrapped
/// scalar-coercion error when a `ValuesOfCorrectType` failure originates
/// from the schema's `coerce_literal`.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    message: String,
    locations: Vec<SourceLocation>,
    cause: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, locations: Vec<SourceLocation>) -> Self {
        assert!(!locations.is_empty(), "a diagnostic needs at least one location");
        Diagnostic {
            message: message.into(),
            locations,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn locations(&self) -> &[SourceLocation] {
        &self.locations
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locations = self
            .locations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}. At {locations}", self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " ({cause})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
