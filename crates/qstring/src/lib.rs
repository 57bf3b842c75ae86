//! qstring - Typed records to and from URL query parameters.
//!
//! qstring converts between a multi-valued parameter collection, the shape a
//! URL query string parses into, and plain Rust structs. It supports:
//!
//! - Scalars: `bool`, every integer width, `f32`/`f64`, `String`
//! - RFC 3339 timestamps via `chrono`
//! - Comparative values: a timestamp or string behind an optional operator
//! - Sequences of any scalar, optionally comma-joined on the wire
//! - Nested records, flattened under dotted keys
//! - Per-field text codecs and per-record codecs as escape hatches
//!
//! # Quick Start
//!
//! ```rust
//! use qstring::QueryRecord;
//!
//! #[derive(QueryRecord, Default)]
//! struct Paging {
//!     pub page: i32,
//!     pub limit: i32,
//! }
//!
//! #[derive(QueryRecord, Default)]
//! struct Query {
//!     pub names: Vec<String>,
//!     #[qstring("sort,omitempty")]
//!     pub sort_by: String,
//!     pub paging: Paging,
//! }
//!
//! let mut query = Query::default();
//! qstring::decode_str("names=foo&names=bar&paging.page=2&paging.limit=50", &mut query).unwrap();
//!
//! assert_eq!(query.names, ["foo", "bar"]);
//! assert_eq!(query.paging.page, 2);
//! assert_eq!(query.paging.limit, 50);
//!
//! let text = qstring::encode_to_string(&query).unwrap();
//! assert_eq!(text, "names=foo&names=bar&paging.limit=50&paging.page=2");
//! ```
//!
//! # Keys
//!
//! A field's key is its name lower-cased, unless the field carries a tag:
//!
//! | Tag | Key | Effect |
//! |-----|-----|--------|
//! | `"limit"` | `limit` | explicit key, used verbatim |
//! | `",omitempty"` | default | left out of encoded output when empty |
//! | `"ids,comma"` | `ids` | sequence travels as one `1,2,3` value |
//! | `"-"` or `skip` | none | never decoded or encoded |
//!
//! Private fields are described but never touched.
//!
//! # Decode Semantics
//!
//! Decoding merges: a field whose key is missing from the input keeps its
//! current value. Scalars take the first value, sequences take every value
//! in order, and nested records decode the `key.`-prefixed sub-collection.
//! A conversion failure aborts with [`Error::Field`]; fields decoded before
//! it stay written.
//!
//! # Codec Hooks
//!
//! | Hook | Scope | How |
//! |------|-------|-----|
//! | text codec | one field | `#[qstring(text)]` on a `FromStr + Display` field |
//! | display codec | one field, encode only | `#[qstring(display)]` on a `Display` field |
//! | record codec | whole record | `#[qstring(custom_decode)]` / `#[qstring(custom_encode)]` plus a hand-written [`DecodeQuery`] / [`EncodeQuery`] |

extern crate self as qstring;

mod comparative;
mod decode;
mod empty;
mod encode;
mod error;
mod field;
mod op;
mod scalar;
mod tag;
mod traits;
mod values;

// Re-export public API
pub use comparative::{ComparativeError, ComparativeString, ComparativeTime};
pub use decode::{decode, decode_fields, decode_str};
pub use empty::is_empty;
pub use encode::{encode, encode_fields, encode_to_string};
pub use error::{BoxError, Error, Invalid, Result};
pub use field::{
    resolve_fields, FieldDescriptor, FieldKind, FieldMut, FieldRef, NestedRecord, QueryField,
    ResolvedField, ScalarValue, SequenceValue, TextDecode, TextEncode, TextSequenceDecode,
    TextSequenceEncode,
};
pub use op::{parse_operator, Operator};
pub use scalar::{parse_bool, InvalidBool, QueryScalar, ScalarKind};
pub use tag::{parse_tag, Tag, SKIP};
pub use traits::{DecodeQuery, DecodeTarget, EncodeQuery, EncodeSource, QueryRecord};
pub use values::{Values, NESTED_SEPARATOR};

#[cfg(feature = "derive")]
pub use qstring_macros::QueryRecord;

// Items used by derive-generated code.
#[doc(hidden)]
pub mod __private {
    pub use crate::field::{DefaultZero, NeverZero, TextZero};
}
