//! Field descriptors, field access and key resolution.
//!
//! A record exposes a static table of [`FieldDescriptor`]s and, per index, a
//! borrowed view of the field as a [`FieldRef`] or [`FieldMut`]. These two
//! enums are the closed set of shapes the decoder and encoder understand:
//!
//! | Shape | Types |
//! |-------|-------|
//! | `Scalar` | `bool`, integers, floats, `String`, timestamps, comparative values |
//! | `Sequence` | `Vec<T>` of any scalar |
//! | `Record` | nested records, `Box<R>`, `Option<R>`, `Option<Box<R>>` |
//! | `Text` | any `FromStr + Display` type marked `#[qstring(text)]` |
//! | `TextSequence` | `Vec<T>` of such types |
//!
//! A field type outside this set does not implement [`QueryField`] and is
//! rejected at compile time by the derive.

use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};

use crate::comparative::{ComparativeString, ComparativeTime};
use crate::error::{BoxError, Result};
use crate::scalar::{QueryScalar, ScalarKind};
use crate::tag::{parse_tag, Tag, SKIP};
use crate::values::Values;

/// Declared type of a field, as recorded in its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A single scalar value.
    Scalar(ScalarKind),
    /// An ordered list of scalar values.
    Sequence(ScalarKind),
    /// A nested record held by value (or boxed).
    Record,
    /// A nested record behind an `Option`.
    OptionalRecord,
    /// A type using its `FromStr`/`Display` text codec.
    Text,
    /// A list of text-codec values.
    TextSequence,
    /// A type encoded through `Display` only.
    Display,
    /// A list of display-only values.
    DisplaySequence,
    /// A field the record does not expose (private or skipped).
    Opaque,
}

/// Static metadata for one record field.
///
/// Tables of descriptors are normally generated by `#[derive(QueryRecord)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: &'static str,
    /// Raw annotation string, e.g. `"limit,omitempty"`.
    pub tag: Option<&'static str>,
    /// Whether the field can be read and written by the engine.
    pub settable: bool,
    /// Declared type.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates a settable, untagged descriptor.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        FieldDescriptor {
            name,
            tag: None,
            settable: true,
            kind,
        }
    }

    /// Attaches an annotation string.
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Marks the field as not settable.
    pub const fn private(mut self) -> Self {
        self.settable = false;
        self
    }

    /// Parses the annotation, treating a missing one as empty.
    pub fn parsed_tag(&self) -> Tag<'static> {
        parse_tag(self.tag.unwrap_or(""))
    }

    /// Returns the parameter key for this field.
    ///
    /// An explicit tag name is used verbatim; otherwise the declared name is
    /// lower-cased.
    pub fn key(&self) -> Cow<'static, str> {
        let tag = self.parsed_tag();
        if tag.name.is_empty() {
            Cow::Owned(self.name.to_lowercase())
        } else {
            Cow::Borrowed(tag.name)
        }
    }
}

/// A descriptor that survived key resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Position of the field in its record's descriptor table.
    pub index: usize,
    /// Parameter key.
    pub key: Cow<'static, str>,
    /// Omit from encoded output when empty.
    pub omit_empty: bool,
    /// Sequence travels as one comma-joined value.
    pub comma: bool,
}

/// Maps a descriptor table to the fields the engine will visit.
///
/// Fields keyed `-` and fields that are not settable are dropped. The result
/// depends only on the table, never on input data.
pub fn resolve_fields(fields: &[FieldDescriptor]) -> Vec<ResolvedField> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.settable)
        .filter_map(|(index, field)| {
            let tag = field.parsed_tag();
            let key = field.key();
            if key == SKIP {
                return None;
            }
            Some(ResolvedField {
                index,
                key,
                omit_empty: tag.omit_empty,
                comma: tag.comma,
            })
        })
        .collect()
}

/// Read access to one field, by shape.
pub enum FieldRef<'a> {
    Scalar(&'a dyn ScalarValue),
    Sequence(&'a dyn SequenceValue),
    Record(&'a dyn NestedRecord),
    Text {
        value: &'a dyn TextEncode,
        /// The value equals its type's `Default`.
        zero: bool,
    },
    TextSequence(&'a dyn TextSequenceEncode),
}

/// Write access to one field, by shape.
pub enum FieldMut<'a> {
    Scalar(&'a mut dyn ScalarValue),
    Sequence(&'a mut dyn SequenceValue),
    Record(&'a mut dyn NestedRecord),
    Text(&'a mut dyn TextDecode),
    TextSequence(&'a mut dyn TextSequenceDecode),
}

/// A type that can be a record field.
///
/// Implemented for the built-in scalars, `Vec` of scalars, and (through the
/// derive) for records, plus `Box`/`Option` wrappers of records.
pub trait QueryField {
    /// Declared kind reported in descriptors.
    const KIND: FieldKind;

    /// Borrows this value as a field view.
    fn as_field(&self) -> FieldRef<'_>;

    /// Mutably borrows this value as a field view.
    fn as_field_mut(&mut self) -> FieldMut<'_>;
}

/// Object-safe view of a [`QueryScalar`].
pub trait ScalarValue {
    /// Declared scalar kind.
    fn kind(&self) -> ScalarKind;
    /// Renders the value.
    fn to_text(&self) -> String;
    /// Replaces the value with the parse of `text`. Unchanged on error.
    fn set_text(&mut self, text: &str) -> std::result::Result<(), BoxError>;
    /// Emptiness for `omitempty`.
    fn is_zero_value(&self) -> bool;
}

impl<T: QueryScalar> ScalarValue for T {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn to_text(&self) -> String {
        self.to_query()
    }

    fn set_text(&mut self, text: &str) -> std::result::Result<(), BoxError> {
        *self = T::parse_query(text)?;
        Ok(())
    }

    fn is_zero_value(&self) -> bool {
        self.is_zero()
    }
}

/// Object-safe view of a list of scalars.
pub trait SequenceValue {
    /// Declared element kind.
    fn element_kind(&self) -> ScalarKind;
    /// Number of elements.
    fn len(&self) -> usize;
    /// Returns `true` if the list holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Renders every element in order.
    fn to_texts(&self) -> Vec<String>;
    /// Replaces the list with the parse of `texts`. Unchanged on error.
    fn set_texts(&mut self, texts: &[&str]) -> std::result::Result<(), BoxError>;
}

impl<T: QueryScalar> SequenceValue for Vec<T> {
    fn element_kind(&self) -> ScalarKind {
        T::KIND
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn to_texts(&self) -> Vec<String> {
        self.iter().map(QueryScalar::to_query).collect()
    }

    fn set_texts(&mut self, texts: &[&str]) -> std::result::Result<(), BoxError> {
        *self = texts
            .iter()
            .map(|text| T::parse_query(text))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(())
    }
}

/// Encode half of the scalar text codec: any `Display` type.
pub trait TextEncode {
    fn encode_text(&self) -> String;
}

impl<T: Display> TextEncode for T {
    fn encode_text(&self) -> String {
        self.to_string()
    }
}

/// Zero-value test for text-codec fields, resolved at the call site.
///
/// `(&TextZero(&value)).is_zero_text()` picks [`DefaultZero`] when the type
/// is `Default + PartialEq` and falls back to [`NeverZero`] through autoref
/// otherwise. Generic field types always take the fallback.
#[doc(hidden)]
pub struct TextZero<'a, T>(pub &'a T);

#[doc(hidden)]
pub trait DefaultZero {
    fn is_zero_text(&self) -> bool;
}

impl<T: Default + PartialEq> DefaultZero for TextZero<'_, T> {
    fn is_zero_text(&self) -> bool {
        *self.0 == T::default()
    }
}

#[doc(hidden)]
pub trait NeverZero {
    fn is_zero_text(&self) -> bool {
        false
    }
}

impl<T> NeverZero for &TextZero<'_, T> {}

/// Decode half of the scalar text codec: any `FromStr` type.
pub trait TextDecode {
    fn decode_text(&mut self, text: &str) -> std::result::Result<(), BoxError>;
}

impl<T> TextDecode for T
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    fn decode_text(&mut self, text: &str) -> std::result::Result<(), BoxError> {
        *self = text.parse::<T>().map_err(Into::into)?;
        Ok(())
    }
}

/// Encode side of a list of text-codec values.
pub trait TextSequenceEncode {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn encode_texts(&self) -> Vec<String>;
}

impl<T: Display> TextSequenceEncode for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn encode_texts(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

/// Decode side of a list of text-codec values.
pub trait TextSequenceDecode {
    fn decode_texts(&mut self, texts: &[&str]) -> std::result::Result<(), BoxError>;
}

impl<T> TextSequenceDecode for Vec<T>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    fn decode_texts(&mut self, texts: &[&str]) -> std::result::Result<(), BoxError> {
        *self = texts
            .iter()
            .map(|text| text.parse::<T>().map_err(Into::into))
            .collect::<std::result::Result<Vec<_>, BoxError>>()?;
        Ok(())
    }
}

/// A record reachable from a parent record's field.
///
/// The derive implements this for every record by delegating to its
/// [`DecodeQuery`](crate::DecodeQuery) and [`EncodeQuery`](crate::EncodeQuery)
/// impls, so record-level codecs are honoured when nested too.
pub trait NestedRecord {
    /// Decodes from a sub-collection whose keys are relative to this record.
    fn decode_nested(&mut self, values: &Values) -> Result<()>;

    /// Encodes to keys relative to this record, or `None` when absent.
    fn encode_nested(&self) -> Result<Option<Values>>;

    /// Returns `true` when there is no record to encode.
    fn is_absent(&self) -> bool {
        false
    }
}

impl<T: NestedRecord + Default> NestedRecord for Option<T> {
    fn decode_nested(&mut self, values: &Values) -> Result<()> {
        self.get_or_insert_with(T::default).decode_nested(values)
    }

    fn encode_nested(&self) -> Result<Option<Values>> {
        match self {
            Some(record) => record.encode_nested(),
            None => Ok(None),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

impl<T: NestedRecord + ?Sized> NestedRecord for Box<T> {
    fn decode_nested(&mut self, values: &Values) -> Result<()> {
        (**self).decode_nested(values)
    }

    fn encode_nested(&self) -> Result<Option<Values>> {
        (**self).encode_nested()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<T: NestedRecord + Default> QueryField for Option<T> {
    const KIND: FieldKind = FieldKind::OptionalRecord;

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Record(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Record(self)
    }
}

impl<T: NestedRecord> QueryField for Box<T> {
    const KIND: FieldKind = FieldKind::Record;

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Record(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Record(self)
    }
}

impl<T: QueryScalar> QueryField for Vec<T> {
    const KIND: FieldKind = FieldKind::Sequence(T::KIND);

    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Sequence(self)
    }

    fn as_field_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Sequence(self)
    }
}

macro_rules! scalar_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryField for $ty {
                const KIND: FieldKind = FieldKind::Scalar(<$ty as QueryScalar>::KIND);

                fn as_field(&self) -> FieldRef<'_> {
                    FieldRef::Scalar(self)
                }

                fn as_field_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Scalar(self)
                }
            }
        )*
    };
}

scalar_fields!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    DateTime<FixedOffset>,
    DateTime<Utc>,
    ComparativeTime,
    ComparativeString,
);
