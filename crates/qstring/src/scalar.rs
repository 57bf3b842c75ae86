//! String coercion for scalar field types.
//!
//! [`QueryScalar`] is the conversion contract between one parameter value and
//! one typed value. It is implemented for the primitive numbers, `bool`,
//! `String`, chrono timestamps and the comparative types. Sequences of any of
//! these are handled by the field layer, one element per parameter value.

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

use crate::comparative::{ComparativeString, ComparativeTime};
use crate::error::BoxError;

/// Declared type of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
    /// RFC 3339 timestamp.
    Timestamp,
    ComparativeTime,
    ComparativeString,
}

/// A value that converts to and from a single query parameter.
///
/// # Manual Implementation
///
/// ```
/// use qstring::{BoxError, QueryScalar, ScalarKind};
///
/// struct Cents(u64);
///
/// impl QueryScalar for Cents {
///     const KIND: ScalarKind = ScalarKind::U64;
///
///     fn parse_query(text: &str) -> Result<Self, BoxError> {
///         Ok(Cents(text.parse()?))
///     }
///
///     fn to_query(&self) -> String {
///         self.0.to_string()
///     }
///
///     fn is_zero(&self) -> bool {
///         self.0 == 0
///     }
/// }
///
/// assert_eq!(Cents::parse_query("250").unwrap().to_query(), "250");
/// ```
pub trait QueryScalar: Sized {
    /// The declared kind reported in field descriptors.
    const KIND: ScalarKind;

    /// Parses one parameter value.
    fn parse_query(text: &str) -> Result<Self, BoxError>;

    /// Renders this value as one parameter value.
    fn to_query(&self) -> String;

    /// Returns `true` if this value counts as empty for `omitempty`.
    fn is_zero(&self) -> bool;
}

/// Error for boolean text outside the accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid boolean {0:?}")]
pub struct InvalidBool(pub String);

/// Parses the boolean spellings accepted on the wire.
///
/// `1`, `t`, `T`, `true`, `TRUE`, `True` and their `0`/`f`/`false`
/// counterparts.
pub fn parse_bool(text: &str) -> Result<bool, InvalidBool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(InvalidBool(text.to_string())),
    }
}

/// Returns `true` for the zero timestamp (the Unix epoch, in any offset).
pub(crate) fn is_zero_time<Tz: TimeZone>(time: &DateTime<Tz>) -> bool {
    time.timestamp() == 0 && time.timestamp_subsec_nanos() == 0
}

/// RFC3339 with as many fractional digits as the value needs.
pub(crate) fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl QueryScalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn parse_query(text: &str) -> Result<Self, BoxError> {
        Ok(parse_bool(text)?)
    }

    fn to_query(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

macro_rules! number_scalars {
    ($($ty:ty => $kind:ident, $zero:expr;)*) => {
        $(
            impl QueryScalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn parse_query(text: &str) -> Result<Self, BoxError> {
                    Ok(text.parse::<$ty>()?)
                }

                fn to_query(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

number_scalars! {
    i8 => I8, 0;
    i16 => I16, 0;
    i32 => I32, 0;
    i64 => I64, 0;
    isize => Isize, 0;
    u8 => U8, 0;
    u16 => U16, 0;
    u32 => U32, 0;
    u64 => U64, 0;
    usize => Usize, 0;
    f32 => F32, 0.0;
    f64 => F64, 0.0;
}

impl QueryScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn parse_query(text: &str) -> Result<Self, BoxError> {
        Ok(text.to_string())
    }

    fn to_query(&self) -> String {
        self.clone()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryScalar for DateTime<FixedOffset> {
    const KIND: ScalarKind = ScalarKind::Timestamp;

    fn parse_query(text: &str) -> Result<Self, BoxError> {
        Ok(DateTime::parse_from_rfc3339(text)?)
    }

    fn to_query(&self) -> String {
        format_time(self)
    }

    fn is_zero(&self) -> bool {
        is_zero_time(self)
    }
}

impl QueryScalar for DateTime<Utc> {
    const KIND: ScalarKind = ScalarKind::Timestamp;

    fn parse_query(text: &str) -> Result<Self, BoxError> {
        Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc))
    }

    fn to_query(&self) -> String {
        format_time(self)
    }

    fn is_zero(&self) -> bool {
        is_zero_time(self)
    }
}

impl QueryScalar for ComparativeTime {
    const KIND: ScalarKind = ScalarKind::ComparativeTime;

    fn parse_query(text: &str) -> Result<Self, BoxError> {
        Ok(ComparativeTime::parse(text)?)
    }

    fn to_query(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        ComparativeTime::is_zero(self)
    }
}

impl QueryScalar for ComparativeString {
    const KIND: ScalarKind = ScalarKind::ComparativeString;

    fn parse_query(text: &str) -> Result<Self, BoxError> {
        Ok(ComparativeString::parse(text)?)
    }

    fn to_query(&self) -> String {
        self.to_string()
    }

    // Record-like values are never empty.
    fn is_zero(&self) -> bool {
        false
    }
}
