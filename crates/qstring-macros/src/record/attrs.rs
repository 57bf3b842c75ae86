//! Attribute parsing for the QueryRecord derive macro.
//!
//! Field attributes take the form `#[qstring("name,omitempty", text)]`: an
//! optional tag literal plus flags. Container attributes take the form
//! `#[qstring(custom_decode, custom_encode)]`.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Error, Ident, LitStr, Result, Token,
};

/// Tag value written for `#[qstring(skip)]`.
const SKIP_TAG: &str = "-";

/// How a field's value is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// Dispatch on the field type's `QueryField` impl.
    #[default]
    Native,
    /// Round-trip through `FromStr` and `Display`: `#[qstring(text)]`
    Text,
    /// Encode through `Display`, never decode: `#[qstring(display)]`
    Display,
    /// User type implementing `QueryScalar`: `#[qstring(scalar)]`
    Scalar,
}

impl Codec {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "text" => Some(Codec::Text),
            "display" => Some(Codec::Display),
            "scalar" => Some(Codec::Scalar),
            _ => None,
        }
    }
}

/// One item inside `#[qstring(...)]`.
enum Item {
    Tag(LitStr),
    Flag(Ident),
}

impl Parse for Item {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            input.parse().map(Item::Tag)
        } else {
            input.parse().map(Item::Flag)
        }
    }
}

/// Field-level attributes from `#[qstring(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    /// Raw tag, e.g. `"limit,omitempty"`. `skip` stores `"-"`.
    pub tag: Option<String>,
    /// Conversion used for the field.
    pub codec: Codec,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            tag: None,
            codec: Codec::Native,
            span: Span::call_site(),
        }
    }
}

impl FieldAttr {
    /// Returns `true` if the tag excludes the field.
    pub fn is_skip(&self) -> bool {
        self.tag
            .as_deref()
            .and_then(|tag| tag.split(',').next())
            .is_some_and(|name| name == SKIP_TAG)
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        let items: Punctuated<Item, Token![,]> = Punctuated::parse_terminated(input)?;

        for item in items {
            match item {
                Item::Tag(lit) => {
                    if attr.tag.is_some() {
                        return Err(Error::new(lit.span(), "duplicate qstring tag"));
                    }
                    attr.tag = Some(lit.value());
                    attr.span = lit.span();
                }
                Item::Flag(ident) if ident == "skip" => {
                    if attr.tag.is_some() {
                        return Err(Error::new(ident.span(), "skip conflicts with a qstring tag"));
                    }
                    attr.tag = Some(SKIP_TAG.to_string());
                    attr.span = ident.span();
                }
                Item::Flag(ident) => {
                    let codec = Codec::from_ident(&ident).ok_or_else(|| {
                        Error::new(
                            ident.span(),
                            format!(
                                "unknown qstring attribute: '{}'. Expected a tag string, skip, text, display, or scalar",
                                ident
                            ),
                        )
                    })?;
                    if attr.codec != Codec::Native {
                        return Err(Error::new(
                            ident.span(),
                            "only one of text, display, or scalar may be given",
                        ));
                    }
                    attr.codec = codec;
                    attr.span = ident.span();
                }
            }
        }

        Ok(attr)
    }
}

/// Container-level attributes from `#[qstring(...)]` on the struct.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    /// Skip the generated `DecodeQuery` impl.
    pub custom_decode: bool,
    /// Skip the generated `EncodeQuery` impl.
    pub custom_encode: bool,
}

impl Parse for ContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ContainerAttr::default();

        let flags: Punctuated<Ident, Token![,]> = Punctuated::parse_terminated(input)?;

        for flag in flags {
            match flag.to_string().as_str() {
                "custom_decode" => attr.custom_decode = true,
                "custom_encode" => attr.custom_encode = true,
                other => {
                    return Err(Error::new(
                        flag.span(),
                        format!(
                            "unknown qstring container attribute: '{}'. Expected: custom_decode or custom_encode",
                            other
                        ),
                    ))
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[qstring(...)]` attributes from a field's attributes.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    for attr in attrs {
        if attr.path().is_ident("qstring") {
            return attr.parse_args::<FieldAttr>();
        }
    }
    Ok(FieldAttr::default())
}

/// Extract `#[qstring(...)]` attributes from the struct's attributes.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    for attr in attrs {
        if attr.path().is_ident("qstring") {
            return attr.parse_args::<ContainerAttr>();
        }
    }
    Ok(ContainerAttr::default())
}
