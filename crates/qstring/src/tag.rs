//! Parsing of per-field annotation strings.
//!
//! A tag has the form `"name[,omitempty][,comma]"`. The name overrides the
//! parameter key; an empty name keeps the default key and `-` excludes the
//! field entirely.

/// Key sentinel that excludes a field from decoding and encoding.
pub const SKIP: &str = "-";

/// A parsed field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag<'a> {
    /// Explicit key, or `""` when the default key applies.
    pub name: &'a str,
    /// Leave the key out of encoded output when the value is empty.
    pub omit_empty: bool,
    /// Sequence values travel as one comma-separated parameter.
    pub comma: bool,
}

impl Tag<'_> {
    /// Returns `true` if this tag excludes its field.
    pub fn is_skip(&self) -> bool {
        self.name == SKIP
    }
}

/// Splits a tag into its name and options.
///
/// Unknown options are ignored.
///
/// ```
/// use qstring::parse_tag;
///
/// let tag = parse_tag("ids,omitempty,comma");
/// assert_eq!(tag.name, "ids");
/// assert!(tag.omit_empty && tag.comma);
/// ```
pub fn parse_tag(tag: &str) -> Tag<'_> {
    let mut parts = tag.split(',');
    let mut parsed = Tag {
        name: parts.next().unwrap_or_default(),
        ..Tag::default()
    };

    for opt in parts {
        match opt {
            "omitempty" => parsed.omit_empty = true,
            "comma" => parsed.comma = true,
            _ => {}
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_table() {
        let cases = [
            ("name,omitempty", "name", true, false),
            ("name", "name", false, false),
            ("name,", "name", false, false),
            ("", "", false, false),
            (",omitempty", "", true, false),
            ("-", "-", false, false),
            ("ids,comma", "ids", false, true),
            ("ids,comma,omitempty", "ids", true, true),
            ("ids,bogus", "ids", false, false),
        ];

        for (input, name, omit, comma) in cases {
            let tag = parse_tag(input);
            assert_eq!(tag.name, name, "input {:?}", input);
            assert_eq!(tag.omit_empty, omit, "input {:?}", input);
            assert_eq!(tag.comma, comma, "input {:?}", input);
        }
    }

    #[test]
    fn skip_sentinel() {
        assert!(parse_tag("-").is_skip());
        assert!(parse_tag("-,omitempty").is_skip());
        assert!(!parse_tag("-x").is_skip());
    }
}
