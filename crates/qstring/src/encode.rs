//! Encoding: record into a parameter collection.
//!
//! [`encode`] validates the source and hands over to the record's
//! [`EncodeQuery`] impl. For derived records that impl is [`encode_fields`],
//! which writes one entry per leaf key. Nested records are flattened under
//! `parent.child` keys and never appear under their bare key.

use tracing::{debug, trace};

use crate::empty::is_empty;
use crate::error::{Error, Result};
use crate::field::{resolve_fields, FieldRef, ResolvedField};
use crate::traits::{EncodeSource, QueryRecord};
use crate::values::Values;

/// Encodes `source` into a parameter collection.
///
/// # Example
///
/// ```
/// use qstring::QueryRecord;
///
/// #[derive(QueryRecord)]
/// struct Query {
///     pub names: Vec<String>,
///     pub limit: i32,
///     #[qstring("conditional,omitempty")]
///     pub conditional: i32,
/// }
///
/// let query = Query { names: vec!["foo".into(), "bar".into()], limit: 50, conditional: 0 };
/// let values = qstring::encode(&query).unwrap();
///
/// assert_eq!(values.get("names").unwrap(), ["foo", "bar"]);
/// assert_eq!(values.first("limit"), Some("50"));
/// assert!(!values.contains_key("conditional"));
/// ```
pub fn encode<'a>(source: impl EncodeSource<'a>) -> Result<Values> {
    let source = source.encode_source().map_err(Error::InvalidSource)?;
    source.encode_query()
}

/// Encodes `source` and serializes it as a query string with sorted keys.
pub fn encode_to_string<'a>(source: impl EncodeSource<'a>) -> Result<String> {
    Ok(encode(source)?.encode())
}

/// Walks the fields of `record` and encodes each.
///
/// This is the generic field walk behind derived
/// [`EncodeQuery`](crate::EncodeQuery) impls.
pub fn encode_fields<R: QueryRecord>(record: &R) -> Result<Values> {
    let mut values = Values::new();
    for field in resolve_fields(R::FIELDS) {
        let Some(value) = record.field(field.index) else {
            trace!(key = %field.key, "field not readable, skipping");
            continue;
        };
        if field.omit_empty && is_empty(&value) {
            trace!(key = %field.key, "empty value omitted");
            continue;
        }
        encode_field(value, &field, &mut values)?;
    }
    Ok(values)
}

fn encode_field(value: FieldRef<'_>, field: &ResolvedField, values: &mut Values) -> Result<()> {
    let key = field.key.as_ref();

    match value {
        FieldRef::Record(record) => match record.encode_nested()? {
            Some(nested) => {
                debug!(key, keys = nested.len(), "flattening nested record");
                values.extend_nested(key, nested);
            }
            None => trace!(key, "nested record absent"),
        },
        FieldRef::Scalar(value) => values.set(key, value.to_text()),
        FieldRef::Text { value, .. } => values.set(key, value.encode_text()),
        FieldRef::Sequence(seq) => insert_list(values, field, seq.to_texts()),
        FieldRef::TextSequence(seq) => insert_list(values, field, seq.encode_texts()),
    }
    Ok(())
}

fn insert_list(values: &mut Values, field: &ResolvedField, texts: Vec<String>) {
    let key = field.key.as_ref();
    if field.comma && !texts.is_empty() {
        values.set(key, texts.join(","));
    } else {
        values.insert(key, texts);
    }
}
