//! Proc macros for qstring.
//!
//! This crate provides the derive that turns a plain struct into a record
//! qstring can decode into and encode from.
//!
//! # Available Macros
//!
//! - [`QueryRecord`] - Generate the field descriptor table, field accessors
//!   and record-level codec for a struct
//!
//! The macro is re-exported as `qstring::QueryRecord`; depend on `qstring`
//! rather than on this crate directly.
//!
//! # Examples
//!
//! For working examples, see:
//! - `qstring/tests/derive.rs` - descriptor tables and attributes
//! - `qstring/tests/decode.rs` - decoding into derived records

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `QueryRecord` and the codec traits for a struct.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `"name,omitempty,comma"` | Tag: explicit key and options |
/// | `skip` | Exclude the field (same as tag `"-"`) |
/// | `text` | Convert through `FromStr` / `Display` |
/// | `display` | Encode through `Display`; never decoded |
/// | `scalar` | The field type implements `QueryScalar` |
///
/// `text` and `display` on a `Vec<T>` field apply per element.
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `custom_decode` | Do not generate `DecodeQuery`; implement it by hand |
/// | `custom_encode` | Do not generate `EncodeQuery`; implement it by hand |
///
/// # Field Visibility
///
/// Fields without a visibility modifier are private: they appear in the
/// descriptor table as not settable and are never read or written, so they
/// may have any type. Every other field must have a type qstring supports.
///
/// # Generated Code
///
/// 1. `QueryRecord` with the `FIELDS` table and `field` / `field_mut`
/// 2. `QueryField` and `NestedRecord`, so the record can be a field of
///    another record
/// 3. `DecodeQuery` and `EncodeQuery` via the generic field walk, unless
///    opted out
///
/// # Example
///
/// ```ignore
/// use qstring::QueryRecord;
///
/// #[derive(QueryRecord, Default)]
/// struct Paging {
///     pub page: i32,
///     pub limit: i32,
/// }
///
/// #[derive(QueryRecord, Default)]
/// struct Query {
///     #[qstring("q,omitempty")]
///     pub search: String,
///
///     #[qstring("ids,comma")]
///     pub ids: Vec<u64>,
///
///     #[qstring(text)]
///     pub origin: std::net::IpAddr,
///
///     pub paging: Paging,
///
///     #[qstring(skip)]
///     pub cache_key: String,
///
///     internal: Vec<u8>,
/// }
///
/// let mut query = Query::default();
/// qstring::decode_str("ids=1,2&paging.page=3", &mut query)?;
/// ```
///
/// # Record Codecs
///
/// ```ignore
/// use qstring::{DecodeQuery, Error, QueryRecord, Values};
///
/// #[derive(QueryRecord, Default)]
/// #[qstring(custom_decode)]
/// struct Names {
///     pub names: Vec<String>,
/// }
///
/// impl DecodeQuery for Names {
///     fn decode_query(&mut self, values: &Values) -> qstring::Result<()> {
///         match values.get("names") {
///             Some(names) if !names.is_empty() => {
///                 self.names = names.to_vec();
///                 Ok(())
///             }
///             _ => Err(Error::custom("No Names Provided")),
///         }
///     }
/// }
/// ```
#[proc_macro_derive(QueryRecord, attributes(qstring))]
pub fn query_record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::query_record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
