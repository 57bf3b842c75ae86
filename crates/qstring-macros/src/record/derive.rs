//! Implementation of the `#[derive(QueryRecord)]` macro.
//!
//! The macro generates the static descriptor table and index-based field
//! accessors (`QueryRecord`), makes the record usable as a nested field
//! (`QueryField`, `NestedRecord`), and implements the record-level codec
//! (`DecodeQuery`, `EncodeQuery`) with the generic field walk.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result, Type, Visibility,
};

use super::attrs::{parse_container_attrs, parse_field_attrs, Codec};

/// Main implementation of the QueryRecord derive macro.
pub fn query_record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "QueryRecord can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "QueryRecord can only be derived for structs",
            ))
        }
    };

    let mut descriptors: Vec<TokenStream> = Vec::new();
    let mut ref_arms: Vec<TokenStream> = Vec::new();
    let mut mut_arms: Vec<TokenStream> = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let ty = &field.ty;

        let attrs = parse_field_attrs(&field.attrs)?;

        let name = field_name.unraw().to_string();
        let tag = match &attrs.tag {
            Some(tag) => quote! { ::core::option::Option::Some(#tag) },
            None => quote! { ::core::option::Option::None },
        };
        let settable = !matches!(field.vis, Visibility::Inherited);

        // Private and skipped fields are described but never accessed, so
        // their type carries no bounds.
        let exposed = settable && !attrs.is_skip();
        let sequence = is_vec(ty);

        let kind = if !exposed {
            quote! { ::qstring::FieldKind::Opaque }
        } else {
            match (attrs.codec, sequence) {
                (Codec::Native, _) | (Codec::Scalar, true) => {
                    quote! { <#ty as ::qstring::QueryField>::KIND }
                }
                (Codec::Scalar, false) => quote! {
                    ::qstring::FieldKind::Scalar(<#ty as ::qstring::QueryScalar>::KIND)
                },
                (Codec::Text, false) => quote! { ::qstring::FieldKind::Text },
                (Codec::Text, true) => quote! { ::qstring::FieldKind::TextSequence },
                (Codec::Display, false) => quote! { ::qstring::FieldKind::Display },
                (Codec::Display, true) => quote! { ::qstring::FieldKind::DisplaySequence },
            }
        };

        descriptors.push(quote! {
            ::qstring::FieldDescriptor {
                name: #name,
                tag: #tag,
                settable: #settable,
                kind: #kind,
            }
        });

        if !exposed {
            continue;
        }

        // Text-codec values are zero when they equal their type's default,
        // for types that can be compared against one.
        let text_read = quote! {
            ::qstring::FieldRef::Text {
                value: &self.#field_name,
                zero: {
                    use ::qstring::__private::{DefaultZero as _, NeverZero as _};
                    (&::qstring::__private::TextZero(&self.#field_name)).is_zero_text()
                },
            }
        };

        let (read, write) = match (attrs.codec, sequence) {
            (Codec::Native, _) | (Codec::Scalar, true) => (
                quote! { ::qstring::QueryField::as_field(&self.#field_name) },
                Some(quote! { ::qstring::QueryField::as_field_mut(&mut self.#field_name) }),
            ),
            (Codec::Scalar, false) => (
                quote! { ::qstring::FieldRef::Scalar(&self.#field_name) },
                Some(quote! { ::qstring::FieldMut::Scalar(&mut self.#field_name) }),
            ),
            (Codec::Text, false) => (
                text_read,
                Some(quote! { ::qstring::FieldMut::Text(&mut self.#field_name) }),
            ),
            (Codec::Text, true) => (
                quote! { ::qstring::FieldRef::TextSequence(&self.#field_name) },
                Some(quote! { ::qstring::FieldMut::TextSequence(&mut self.#field_name) }),
            ),
            (Codec::Display, false) => (text_read, None),
            (Codec::Display, true) => (
                quote! { ::qstring::FieldRef::TextSequence(&self.#field_name) },
                None,
            ),
        };

        ref_arms.push(quote! {
            #index => ::core::option::Option::Some(#read),
        });
        if let Some(write) = write {
            mut_arms.push(quote! {
                #index => ::core::option::Option::Some(#write),
            });
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let decode_impl = if container.custom_decode {
        quote! {}
    } else {
        quote! {
            impl #impl_generics ::qstring::DecodeQuery for #struct_name #ty_generics #where_clause {
                fn decode_query(&mut self, values: &::qstring::Values) -> ::qstring::Result<()> {
                    ::qstring::decode_fields(self, values)
                }
            }
        }
    };

    let encode_impl = if container.custom_encode {
        quote! {}
    } else {
        quote! {
            impl #impl_generics ::qstring::EncodeQuery for #struct_name #ty_generics #where_clause {
                fn encode_query(&self) -> ::qstring::Result<::qstring::Values> {
                    ::qstring::encode_fields(self)
                }
            }
        }
    };

    // Generate the impl blocks
    let expanded = quote! {
        impl #impl_generics ::qstring::QueryRecord for #struct_name #ty_generics #where_clause {
            const FIELDS: &'static [::qstring::FieldDescriptor] = &[
                #(#descriptors),*
            ];

            fn field(&self, index: usize) -> ::core::option::Option<::qstring::FieldRef<'_>> {
                match index {
                    #(#ref_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, index: usize) -> ::core::option::Option<::qstring::FieldMut<'_>> {
                match index {
                    #(#mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::qstring::QueryField for #struct_name #ty_generics #where_clause {
            const KIND: ::qstring::FieldKind = ::qstring::FieldKind::Record;

            fn as_field(&self) -> ::qstring::FieldRef<'_> {
                ::qstring::FieldRef::Record(self)
            }

            fn as_field_mut(&mut self) -> ::qstring::FieldMut<'_> {
                ::qstring::FieldMut::Record(self)
            }
        }

        impl #impl_generics ::qstring::NestedRecord for #struct_name #ty_generics #where_clause {
            fn decode_nested(&mut self, values: &::qstring::Values) -> ::qstring::Result<()> {
                ::qstring::DecodeQuery::decode_query(self, values)
            }

            fn encode_nested(&self) -> ::qstring::Result<::core::option::Option<::qstring::Values>> {
                ::qstring::EncodeQuery::encode_query(self).map(::core::option::Option::Some)
            }
        }

        #decode_impl
        #encode_impl
    };

    Ok(expanded)
}

/// Returns `true` if `ty` is written as `Vec<_>`.
fn is_vec(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Vec"),
        _ => false,
    }
}
