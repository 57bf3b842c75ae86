//! Decoding: parameter collection into a record.
//!
//! [`decode`] validates the target and hands over to the record's
//! [`DecodeQuery`] impl. For derived records that impl is [`decode_fields`],
//! which walks the resolved fields and merges matching parameters into the
//! record in place. Fields whose key is absent keep their value.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::field::{resolve_fields, FieldMut, ResolvedField};
use crate::traits::{DecodeTarget, QueryRecord};
use crate::values::Values;

/// Decodes `values` into `target`.
///
/// `target` is normally `&mut T`; see [`DecodeTarget`] for the rejected
/// forms. Field errors abort the decode and leave earlier fields written.
///
/// # Example
///
/// ```
/// use qstring::{QueryRecord, Values};
///
/// #[derive(QueryRecord, Default)]
/// struct Query {
///     pub names: Vec<String>,
///     pub limit: i32,
///     pub page: i32,
/// }
///
/// let values = Values::parse("names=foo&names=bar&limit=50&page=1");
/// let mut query = Query::default();
/// qstring::decode(&values, &mut query).unwrap();
///
/// assert_eq!(query.names, ["foo", "bar"]);
/// assert_eq!(query.limit, 50);
/// assert_eq!(query.page, 1);
/// ```
pub fn decode<'a>(values: &Values, target: impl DecodeTarget<'a>) -> Result<()> {
    let target = target.decode_target().map_err(Error::InvalidTarget)?;
    target.decode_query(values)
}

/// Parses a raw query string and decodes it into `target`.
pub fn decode_str<'a>(query: &str, target: impl DecodeTarget<'a>) -> Result<()> {
    decode(&Values::parse(query), target)
}

/// Walks the fields of `record` and decodes each from `values`.
///
/// This is the generic field walk behind derived [`DecodeQuery`](crate::DecodeQuery)
/// impls; it never consults the record's own codec.
pub fn decode_fields<R: QueryRecord>(record: &mut R, values: &Values) -> Result<()> {
    for field in resolve_fields(R::FIELDS) {
        let Some(slot) = record.field_mut(field.index) else {
            trace!(key = %field.key, "field not writable, skipping");
            continue;
        };
        decode_field(slot, &field, values)?;
    }
    Ok(())
}

fn decode_field(slot: FieldMut<'_>, field: &ResolvedField, values: &Values) -> Result<()> {
    let key = field.key.as_ref();

    match slot {
        FieldMut::Record(record) => {
            let nested = values.nested(key);
            if nested.is_empty() {
                trace!(key, "no nested keys, skipping");
                return Ok(());
            }
            debug!(key, keys = nested.len(), "decoding nested record");
            record.decode_nested(&nested)
        }
        FieldMut::Scalar(value) => match values.first(key) {
            Some(text) => value.set_text(text).map_err(|e| Error::field(key, e)),
            None => {
                trace!(key, "key absent, skipping");
                Ok(())
            }
        },
        FieldMut::Text(value) => match values.first(key) {
            Some(text) => value.decode_text(text).map_err(|e| Error::field(key, e)),
            None => {
                trace!(key, "key absent, skipping");
                Ok(())
            }
        },
        FieldMut::Sequence(seq) => match values.get(key) {
            Some(list) => seq
                .set_texts(&split_list(list, field.comma))
                .map_err(|e| Error::field(key, e)),
            None => {
                trace!(key, "key absent, skipping");
                Ok(())
            }
        },
        FieldMut::TextSequence(seq) => match values.get(key) {
            Some(list) => seq
                .decode_texts(&split_list(list, field.comma))
                .map_err(|e| Error::field(key, e)),
            None => {
                trace!(key, "key absent, skipping");
                Ok(())
            }
        },
    }
}

/// Flattens the values of a sequence field.
///
/// With `comma` every value is split on `,` and empty pieces are dropped.
fn split_list(list: &[String], comma: bool) -> Vec<&str> {
    if comma {
        list.iter()
            .flat_map(|value| value.split(','))
            .filter(|piece| !piece.is_empty())
            .collect()
    } else {
        list.iter().map(String::as_str).collect()
    }
}
