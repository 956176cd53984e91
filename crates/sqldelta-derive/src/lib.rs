//! Derive macro for sqldelta record descriptions.
//!
//! This crate provides the `#[derive(Record)]` macro that implements the
//! `sqldelta_core::record::Record` trait for a struct, describing its
//! public fields in declaration order.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Lit, Type, Visibility,
};

/// Derives the `Record` trait for a struct with named fields.
///
/// Only `pub` fields are described; fields with any other visibility are
/// invisible to the differ. Scalar field types must implement
/// `Clone` and `sqldelta_core::value::ToSqlValue`.
///
/// # Field Attributes
///
/// - `#[record(name = "ColumnName")]` - Overrides the emitted field name
///   (defaults to the Rust field identifier)
/// - `#[record(nested)]` - Marks a field whose type (or `Option`-wrapped
///   type) itself implements `Record`; the differ recurses into it instead
///   of comparing it as one value
///
/// # Example
///
/// ```ignore
/// use sqldelta_derive::Record;
///
/// #[derive(Debug, Clone, Record)]
/// pub struct User {
///     #[record(name = "Id")]
///     pub id: i64,
///     pub email: String,
///     #[record(nested)]
///     pub address: Address,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_record_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_record_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record derive only supports structs",
            ));
        }
    };

    let mut descriptors: Vec<TokenStream2> = Vec::new();
    for field in fields {
        // Non-public fields are not part of the record description.
        if !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }

        let field_ident = field.ident.as_ref().unwrap();
        let attrs = parse_record_attrs(&field.attrs)?;
        let emitted_name = attrs.name.unwrap_or_else(|| field_ident.to_string());

        if attrs.nested {
            let accessor = if is_option(&field.ty) {
                quote! {
                    self.#field_ident
                        .as_ref()
                        .map(|nested| nested as &dyn ::sqldelta_core::record::Record)
                }
            } else {
                quote! {
                    ::core::option::Option::Some(
                        &self.#field_ident as &dyn ::sqldelta_core::record::Record,
                    )
                }
            };
            descriptors.push(quote! {
                ::sqldelta_core::record::Field::Nested {
                    name: #emitted_name,
                    record: #accessor,
                }
            });
        } else {
            descriptors.push(quote! {
                ::sqldelta_core::record::Field::Scalar {
                    name: #emitted_name,
                    value: ::sqldelta_core::value::ToSqlValue::to_sql_value(
                        self.#field_ident.clone(),
                    ),
                }
            });
        }
    }

    let type_name = struct_name.to_string();

    Ok(quote! {
        impl ::sqldelta_core::record::Record for #struct_name {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[allow(clippy::clone_on_copy)]
            fn fields(&self) -> ::std::vec::Vec<::sqldelta_core::record::Field<'_>> {
                ::std::vec![
                    #(#descriptors),*
                ]
            }
        }
    })
}

struct RecordAttrs {
    name: Option<String>,
    nested: bool,
}

fn parse_record_attrs(attrs: &[Attribute]) -> syn::Result<RecordAttrs> {
    let mut result = RecordAttrs {
        name: None,
        nested: false,
    };

    for attr in attrs {
        if attr.path().is_ident("record") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("nested") {
                    result.nested = true;
                } else if meta.path.is_ident("name") {
                    let value: Expr = meta.value()?.parse()?;
                    if let Expr::Lit(lit) = value {
                        if let Lit::Str(s) = lit.lit {
                            result.name = Some(s.value());
                        }
                    }
                } else {
                    return Err(meta.error("unsupported record attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

fn is_option(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}
