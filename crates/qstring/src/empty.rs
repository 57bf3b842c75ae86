//! Emptiness test behind the `omitempty` tag option.

use crate::field::FieldRef;

/// Returns `true` if `field` counts as empty for `omitempty`.
///
/// | Shape | Empty when |
/// |-------|------------|
/// | string, sequence | zero length |
/// | `bool` | `false` |
/// | numbers | zero |
/// | timestamp | the zero timestamp |
/// | comparative time | its timestamp is zero (operator ignored) |
/// | optional record | `None` |
/// | text-codec value | equals its type's `Default`; never for types without one |
/// | records, comparative strings | never |
pub fn is_empty(field: &FieldRef<'_>) -> bool {
    match field {
        FieldRef::Scalar(value) => value.is_zero_value(),
        FieldRef::Sequence(seq) => seq.is_empty(),
        FieldRef::Record(record) => record.is_absent(),
        FieldRef::Text { zero, .. } => *zero,
        FieldRef::TextSequence(seq) => seq.is_empty(),
    }
}
