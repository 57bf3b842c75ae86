//! Error types for the qstring crate.

use std::fmt;

use thiserror::Error;

/// Boxed cause attached to field-level failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while decoding or encoding a record.
#[derive(Debug, Error)]
pub enum Error {
    /// The value handed to [`decode`](crate::decode) cannot receive fields.
    #[error("qstring: decode({0})")]
    InvalidTarget(Invalid),

    /// The value handed to [`encode`](crate::encode) cannot be read.
    #[error("qstring: encode({0})")]
    InvalidSource(Invalid),

    /// A single field's text could not be converted to its declared type.
    #[error("qstring: invalid value for field `{field}`: {source}")]
    Field {
        /// Resolved parameter key of the failing field.
        field: String,
        /// Underlying conversion failure.
        #[source]
        source: BoxError,
    },

    /// Failure reported by a record-level codec.
    #[error("{0}")]
    Custom(String),

    /// Foreign error returned by a record-level codec.
    #[error(transparent)]
    Other(BoxError),
}

impl Error {
    /// Wraps a conversion failure for the field stored under `field`.
    pub fn field(field: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Field {
            field: field.into(),
            source: source.into(),
        }
    }

    /// Creates an error carrying a plain message.
    ///
    /// Intended for hand-written [`DecodeQuery`](crate::DecodeQuery) and
    /// [`EncodeQuery`](crate::EncodeQuery) implementations.
    pub fn custom(msg: impl fmt::Display) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the field key for [`Error::Field`] errors.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Error::Field { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Why a decode target or encode source was rejected.
///
/// The three variants are rendered distinctly so callers can tell an absent
/// argument apart from a misused one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    /// No value at all, and no type information either.
    Nil,
    /// A value of a known record type that is not a writable reference.
    NonReference(&'static str),
    /// An empty reference slot of a known record type.
    NilReference(&'static str),
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invalid::Nil => f.write_str("nil"),
            Invalid::NonReference(ty) => write!(f, "non-reference {}", ty),
            Invalid::NilReference(ty) => write!(f, "nil &{}", ty),
        }
    }
}

/// Result type for qstring operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_messages_are_distinct() {
        let nil = Error::InvalidTarget(Invalid::Nil).to_string();
        let non_ref = Error::InvalidTarget(Invalid::NonReference("app::Query")).to_string();
        let nil_ref = Error::InvalidTarget(Invalid::NilReference("app::Query")).to_string();

        assert_eq!(nil, "qstring: decode(nil)");
        assert_eq!(non_ref, "qstring: decode(non-reference app::Query)");
        assert_eq!(nil_ref, "qstring: decode(nil &app::Query)");
    }

    #[test]
    fn source_messages_name_encode() {
        let err = Error::InvalidSource(Invalid::NilReference("app::Query"));
        assert_eq!(err.to_string(), "qstring: encode(nil &app::Query)");
    }

    #[test]
    fn field_error_keeps_cause() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = Error::field("page", cause);

        assert_eq!(err.field_name(), Some("page"));
        assert!(err.to_string().starts_with("qstring: invalid value for field `page`"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn custom_error_is_verbatim() {
        let err = Error::custom("No Names Provided");
        assert_eq!(err.to_string(), "No Names Provided");
        assert_eq!(err.field_name(), None);
    }
}
