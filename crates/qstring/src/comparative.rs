//! Comparative values: a payload qualified by a relational operator.
//!
//! These types express range, negation and similarity filters inside a single
//! query parameter:
//!
//! ```text
//! created=>=2006-01-02T15:04:05Z     ComparativeTime   (Gte, 2006-01-02T15:04:05Z)
//! name=~smith                        ComparativeString (Like, "smith")
//! ```
//!
//! The canonical text form is the operator prefix followed by the payload,
//! with `=` left implicit.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::op::{parse_operator, Operator};
use crate::scalar::format_time;

/// Errors produced while parsing a comparative value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparativeError {
    /// The input is too short to hold an operator and a payload.
    #[error("invalid {kind} query {input:?}")]
    TooShort { kind: &'static str, input: String },

    /// The operator is not allowed for this kind of comparative value.
    #[error("operator '{op}' is not valid for comparative strings")]
    InvalidOperator { op: Operator },

    /// The payload is not an RFC 3339 timestamp.
    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// Minimum accepted input length, in bytes, is one more than this.
const MIN_LEN: usize = 2;

/// A timestamp with a leading comparison operator.
///
/// # Example
///
/// ```
/// use qstring::{ComparativeTime, Operator};
///
/// let ct: ComparativeTime = ">=2006-01-02T15:04:05Z".parse().unwrap();
/// assert_eq!(ct.operator, Operator::Gte);
/// assert_eq!(ct.to_string(), ">=2006-01-02T15:04:05Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComparativeTime {
    /// Comparison operator, `Eq` when the input had no prefix.
    pub operator: Operator,
    /// Timestamp payload.
    pub time: DateTime<FixedOffset>,
}

impl ComparativeTime {
    /// Returns a value with the `=` operator and the zero timestamp.
    pub fn new() -> Self {
        ComparativeTime::default()
    }

    /// Creates a comparative timestamp from its parts.
    pub fn with(operator: Operator, time: DateTime<FixedOffset>) -> Self {
        ComparativeTime { operator, time }
    }

    /// Parses `query` into an operator and an RFC 3339 timestamp.
    pub fn parse(query: &str) -> Result<Self, ComparativeError> {
        if query.len() <= MIN_LEN {
            return Err(ComparativeError::TooShort {
                kind: "timestamp",
                input: query.to_string(),
            });
        }

        let (operator, payload) = parse_operator(query);
        let time = DateTime::parse_from_rfc3339(payload)?;
        Ok(ComparativeTime { operator, time })
    }

    /// Returns `true` when the payload is the zero timestamp.
    ///
    /// The operator does not take part in the check.
    pub fn is_zero(&self) -> bool {
        crate::scalar::is_zero_time(&self.time)
    }
}

impl FromStr for ComparativeTime {
    type Err = ComparativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparativeTime::parse(s)
    }
}

impl fmt::Display for ComparativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.operator.canonical_prefix(),
            format_time(&self.time)
        )
    }
}

/// A string with a leading `~` (like) or `!` (not) operator.
///
/// Only `=`, `~` and `!` are accepted. An explicit `=` is dropped on output,
/// so `=abc` renders back as `abc`.
///
/// Inputs of two bytes or fewer are rejected. The default value renders as
/// the empty string and therefore does not parse back; mark such fields
/// `omitempty` or give them a value before encoding.
///
/// # Example
///
/// ```
/// use qstring::{ComparativeString, Operator};
///
/// let cs: ComparativeString = "!draft".parse().unwrap();
/// assert_eq!(cs.operator, Operator::Not);
/// assert_eq!(cs.value, "draft");
/// assert!("<draft".parse::<ComparativeString>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparativeString {
    /// Comparison operator; always one of `Eq`, `Like`, `Not`.
    pub operator: Operator,
    /// String payload.
    pub value: String,
}

impl ComparativeString {
    /// Creates a comparative string from its parts.
    pub fn new(operator: Operator, value: impl Into<String>) -> Self {
        ComparativeString {
            operator,
            value: value.into(),
        }
    }

    /// Parses `query` into an operator and a string payload.
    pub fn parse(query: &str) -> Result<Self, ComparativeError> {
        if query.len() <= MIN_LEN {
            return Err(ComparativeError::TooShort {
                kind: "string",
                input: query.to_string(),
            });
        }

        let (operator, payload) = parse_operator(query);
        if !operator.is_string_op() {
            return Err(ComparativeError::InvalidOperator { op: operator });
        }

        Ok(ComparativeString::new(operator, payload))
    }
}

impl FromStr for ComparativeString {
    type Err = ComparativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparativeString::parse(s)
    }
}

impl fmt::Display for ComparativeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.canonical_prefix(), self.value)
    }
}
