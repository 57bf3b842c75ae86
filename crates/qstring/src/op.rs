//! Relational operators carried by comparative query values.
//!
//! A comparative parameter prefixes its payload with an optional operator,
//! e.g. `created=>=2006-01-02T15:04:05Z`. The [`Operator`] enum lists the
//! recognised prefixes and [`parse_operator`] lexes one off a string.

use std::fmt;

/// Operator prefix of a comparative value.
///
/// | Variant | Prefix |
/// |---------|--------|
/// | `Eq` | `=` (or no prefix) |
/// | `Gt` | `>` |
/// | `Gte` | `>=` |
/// | `Lt` | `<` |
/// | `Lte` | `<=` |
/// | `Like` | `~` |
/// | `Not` | `!` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// Equality. The default when no prefix is present.
    #[default]
    Eq,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Similarity match.
    Like,
    /// Negation.
    Not,
}

impl Operator {
    /// Returns the wire prefix for this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "~",
            Operator::Not => "!",
        }
    }

    /// Returns `true` if this operator is legal for comparative strings.
    pub fn is_string_op(self) -> bool {
        matches!(self, Operator::Eq | Operator::Like | Operator::Not)
    }

    /// Prefix used in canonical output, where `=` is implied.
    pub fn canonical_prefix(self) -> &'static str {
        match self {
            Operator::Eq => "",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexes a leading operator off `s`.
///
/// Returns the operator and the remaining payload. When `s` carries no
/// recognised prefix the operator is [`Operator::Eq`] and the payload is the
/// whole input. An explicit `=` prefix is consumed.
///
/// # Example
///
/// ```
/// use qstring::{parse_operator, Operator};
///
/// assert_eq!(parse_operator(">=5"), (Operator::Gte, "5"));
/// assert_eq!(parse_operator("5"), (Operator::Eq, "5"));
/// ```
pub fn parse_operator(s: &str) -> (Operator, &str) {
    let bytes = s.as_bytes();
    let followed_by_eq = bytes.get(1) == Some(&b'=');

    let op = match bytes.first() {
        Some(b'<') if followed_by_eq => Operator::Lte,
        Some(b'<') => Operator::Lt,
        Some(b'>') if followed_by_eq => Operator::Gte,
        Some(b'>') => Operator::Gt,
        Some(b'~') => Operator::Like,
        Some(b'!') => Operator::Not,
        Some(b'=') => return (Operator::Eq, &s[1..]),
        _ => return (Operator::Eq, s),
    };

    (op, &s[op.as_str().len()..])
}
