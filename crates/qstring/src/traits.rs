//! Traits for derive macro support and the record-level codec hooks.
//!
//! [`QueryRecord`] is implemented by `#[derive(QueryRecord)]` and gives the
//! engine a static descriptor table plus per-index field access.
//! [`DecodeQuery`] and [`EncodeQuery`] are the record-level codec: the derive
//! implements them by walking the fields, and a record can opt out of either
//! to supply its own.

use std::any::type_name;

use crate::error::{Invalid, Result};
use crate::field::{FieldDescriptor, FieldMut, FieldRef};
use crate::values::Values;

/// A record with a static field table.
///
/// # Derive Usage
///
/// ```
/// use qstring::{FieldKind, QueryRecord, ScalarKind};
///
/// #[derive(QueryRecord, Default)]
/// struct Paging {
///     pub page: i32,
///     #[qstring("per_page,omitempty")]
///     pub limit: i32,
///     cursor: String,
/// }
///
/// assert_eq!(Paging::FIELDS.len(), 3);
/// assert_eq!(Paging::FIELDS[1].tag, Some("per_page,omitempty"));
/// assert_eq!(Paging::FIELDS[0].kind, FieldKind::Scalar(ScalarKind::I32));
/// assert!(!Paging::FIELDS[2].settable);
/// ```
///
/// # Manual Implementation
///
/// ```
/// use qstring::{FieldDescriptor, FieldKind, FieldMut, FieldRef, QueryRecord, ScalarKind};
///
/// struct Paging {
///     page: i32,
/// }
///
/// impl QueryRecord for Paging {
///     const FIELDS: &'static [FieldDescriptor] =
///         &[FieldDescriptor::new("page", FieldKind::Scalar(ScalarKind::I32))];
///
///     fn field(&self, index: usize) -> Option<FieldRef<'_>> {
///         match index {
///             0 => Some(FieldRef::Scalar(&self.page)),
///             _ => None,
///         }
///     }
///
///     fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
///         match index {
///             0 => Some(FieldMut::Scalar(&mut self.page)),
///             _ => None,
///         }
///     }
/// }
///
/// let mut paging = Paging { page: 0 };
/// let values = qstring::Values::parse("page=3");
/// qstring::decode_fields(&mut paging, &values).unwrap();
/// assert_eq!(paging.page, 3);
/// ```
pub trait QueryRecord {
    /// Descriptors in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Borrows the field at `index` of [`Self::FIELDS`].
    ///
    /// Returns `None` for fields the record does not expose.
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Mutably borrows the field at `index` of [`Self::FIELDS`].
    ///
    /// Returns `None` for fields the record does not expose or that cannot
    /// be written (display-only fields).
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// Record-level decode.
///
/// The derive implements this with [`decode_fields`](crate::decode_fields).
/// Mark the record `#[qstring(custom_decode)]` to write it by hand; the
/// implementation then fully replaces field walking, including when the
/// record is nested inside another.
pub trait DecodeQuery {
    /// Populates `self` from `values`.
    fn decode_query(&mut self, values: &Values) -> Result<()>;
}

/// Record-level encode.
///
/// The derive implements this with [`encode_fields`](crate::encode_fields).
/// Mark the record `#[qstring(custom_encode)]` to write it by hand.
pub trait EncodeQuery {
    /// Projects `self` into a parameter collection.
    fn encode_query(&self) -> Result<Values>;
}

/// Argument accepted by [`decode`](crate::decode).
///
/// | Argument | Outcome |
/// |----------|---------|
/// | `&mut T`, `&mut dyn DecodeQuery` | decoded |
/// | `&T` | [`Invalid::NonReference`] |
/// | `None::<&mut T>` | [`Invalid::NilReference`] |
/// | `None::<&mut dyn DecodeQuery>` | [`Invalid::Nil`] |
pub trait DecodeTarget<'a> {
    /// Resolves the argument to a writable record.
    fn decode_target(self) -> std::result::Result<&'a mut dyn DecodeQuery, Invalid>;
}

impl<'a, T: DecodeQuery> DecodeTarget<'a> for &'a mut T {
    fn decode_target(self) -> std::result::Result<&'a mut dyn DecodeQuery, Invalid> {
        Ok(self)
    }
}

impl<'a> DecodeTarget<'a> for &'a mut dyn DecodeQuery {
    fn decode_target(self) -> std::result::Result<&'a mut dyn DecodeQuery, Invalid> {
        Ok(self)
    }
}

impl<'a, T: DecodeQuery> DecodeTarget<'a> for &'a T {
    fn decode_target(self) -> std::result::Result<&'a mut dyn DecodeQuery, Invalid> {
        Err(Invalid::NonReference(type_name::<T>()))
    }
}

impl<'a, T: DecodeQuery> DecodeTarget<'a> for Option<&'a mut T> {
    fn decode_target(self) -> std::result::Result<&'a mut dyn DecodeQuery, Invalid> {
        match self {
            Some(target) => Ok(target),
            None => Err(Invalid::NilReference(type_name::<T>())),
        }
    }
}

impl<'a> DecodeTarget<'a> for Option<&'a mut dyn DecodeQuery> {
    fn decode_target(self) -> std::result::Result<&'a mut dyn DecodeQuery, Invalid> {
        self.ok_or(Invalid::Nil)
    }
}

/// Argument accepted by [`encode`](crate::encode).
///
/// | Argument | Outcome |
/// |----------|---------|
/// | `&T`, `&mut T`, `&dyn EncodeQuery` | encoded |
/// | `None::<&T>` | [`Invalid::NilReference`] |
/// | `None::<&dyn EncodeQuery>` | [`Invalid::Nil`] |
///
/// Owned records are not accepted; encoding only ever borrows.
pub trait EncodeSource<'a> {
    /// Resolves the argument to a readable record.
    fn encode_source(self) -> std::result::Result<&'a dyn EncodeQuery, Invalid>;
}

impl<'a, T: EncodeQuery> EncodeSource<'a> for &'a T {
    fn encode_source(self) -> std::result::Result<&'a dyn EncodeQuery, Invalid> {
        Ok(self)
    }
}

impl<'a, T: EncodeQuery> EncodeSource<'a> for &'a mut T {
    fn encode_source(self) -> std::result::Result<&'a dyn EncodeQuery, Invalid> {
        Ok(&*self)
    }
}

impl<'a> EncodeSource<'a> for &'a dyn EncodeQuery {
    fn encode_source(self) -> std::result::Result<&'a dyn EncodeQuery, Invalid> {
        Ok(self)
    }
}

impl<'a, T: EncodeQuery> EncodeSource<'a> for Option<&'a T> {
    fn encode_source(self) -> std::result::Result<&'a dyn EncodeQuery, Invalid> {
        match self {
            Some(source) => Ok(source),
            None => Err(Invalid::NilReference(type_name::<T>())),
        }
    }
}

impl<'a> EncodeSource<'a> for Option<&'a dyn EncodeQuery> {
    fn encode_source(self) -> std::result::Result<&'a dyn EncodeQuery, Invalid> {
        self.ok_or(Invalid::Nil)
    }
}
