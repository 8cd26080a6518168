use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{
    Data, DeriveInput, Expr, ExprPath, Fields, LitStr, Token, Type, parse_macro_input,
    spanned::Spanned,
};

#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct RecordOptions {
    name: Option<String>,
}

#[derive(Default)]
struct RecordFieldOptions {
    hint: Option<String>,
    default: Option<Expr>,
    skip: bool,
}

/// Where serde takes a missing field's value from.
enum SerdeDefault {
    Trait,
    Function(ExprPath),
}

#[derive(Default)]
struct SerdeFieldOptions {
    rename: Option<String>,
    skip_deserializing: bool,
    default: Option<SerdeDefault>,
}

#[derive(Default)]
struct SerdeContainerOptions {
    default: Option<SerdeDefault>,
}

fn expand_record(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.generics,
            "Record does not support generic structs",
        ));
    }

    let options = parse_record_options(&input.attrs)?;
    let container = parse_serde_container_options(&input.attrs)?;

    let data_struct = match input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Record can only be derived for structs",
            ));
        }
    };

    let named_fields = match data_struct.fields {
        Fields::Named(fields) => fields,
        _ => {
            return Err(syn::Error::new(
                struct_name.span(),
                "Record requires named fields",
            ));
        }
    };

    let mut descriptors = Vec::<TokenStream2>::new();
    for field in named_fields.named {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "Record requires named fields"))?;
        let field_options = parse_record_field_options(&field.attrs)?;
        let serde_options = parse_serde_field_options(&field.attrs)?;

        let name = serde_options
            .rename
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());
        let type_hint = field_options
            .hint
            .unwrap_or_else(|| type_hint_text(&field.ty));

        let mut descriptor = quote! {
            ::record_column::FieldDescriptor::new(#name, #type_hint)
        };
        if let Some(default) = field_options.default {
            descriptor = quote! {
                #descriptor.with_default(::record_column::__private::serde_json::json!(#default))
            };
        } else if let Some(default) = serde_options.default {
            let ty = &field.ty;
            let value = match default {
                SerdeDefault::Trait => quote! { <#ty as ::std::default::Default>::default() },
                SerdeDefault::Function(path) => quote! { #path() },
            };
            descriptor = quote! { #descriptor.with_serialized_default(&#value) };
        } else if let Some(default) = &container.default {
            let value = match default {
                SerdeDefault::Trait => {
                    quote! { <#struct_name as ::std::default::Default>::default().#ident }
                }
                SerdeDefault::Function(path) => quote! { #path().#ident },
            };
            descriptor = quote! { #descriptor.with_serialized_default(&#value) };
        }
        if field_options.skip || serde_options.skip_deserializing {
            descriptor = quote! { #descriptor.without_init() };
        }
        descriptors.push(descriptor);
    }

    let record_name = options.name.unwrap_or_else(|| struct_name.to_string());

    Ok(quote! {
        impl ::record_column::Record for #struct_name {
            fn record_name() -> &'static str {
                #record_name
            }

            fn fields() -> ::std::vec::Vec<::record_column::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

/// Renders a field type as annotation text, e.g. `Option<Vec<i64>>`.
fn type_hint_text(ty: &Type) -> String {
    quote!(#ty)
        .to_string()
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ::", "::")
        .replace(":: ", "::")
        .replace(" ,", ",")
}

fn parse_record_options(attrs: &[syn::Attribute]) -> syn::Result<RecordOptions> {
    let mut options = RecordOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                options.name = Some(lit.value());
                return Ok(());
            }

            Err(meta.error("Unsupported #[record(...)] option on struct. Supported: name = \"...\""))
        })?;
    }

    Ok(options)
}

fn parse_record_field_options(attrs: &[syn::Attribute]) -> syn::Result<RecordFieldOptions> {
    let mut options = RecordFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if options.default.is_some() {
                    return Err(meta.error("Duplicate default for record field"));
                }
                options.default = Some(meta.value()?.parse()?);
                return Ok(());
            }

            if meta.path.is_ident("hint") {
                let lit: LitStr = meta.value()?.parse()?;
                options.hint = Some(lit.value());
                return Ok(());
            }

            if meta.path.is_ident("skip") {
                options.skip = true;
                return Ok(());
            }

            Err(meta.error(
                "Unsupported #[record(...)] option on field. Supported: default = <json>, hint = \"...\", skip",
            ))
        })?;
    }

    Ok(options)
}

fn parse_serde_field_options(attrs: &[syn::Attribute]) -> syn::Result<SerdeFieldOptions> {
    let mut options = SerdeFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    options.rename = Some(lit.value());
                } else {
                    // rename(serialize = "...", deserialize = "..."): the mapping uses the serialized name
                    meta.parse_nested_meta(|inner| {
                        let lit: LitStr = inner.value()?.parse()?;
                        if inner.path.is_ident("serialize") {
                            options.rename = Some(lit.value());
                        }
                        Ok(())
                    })?;
                }
                return Ok(());
            }

            if meta.path.is_ident("skip") || meta.path.is_ident("skip_deserializing") {
                options.skip_deserializing = true;
                return Ok(());
            }

            if meta.path.is_ident("default") {
                options.default = Some(parse_serde_default(&meta)?);
                return Ok(());
            }

            skip_meta_value(&meta)
        })?;
    }

    Ok(options)
}

fn parse_serde_container_options(attrs: &[syn::Attribute]) -> syn::Result<SerdeContainerOptions> {
    let mut options = SerdeContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                return Err(meta.error(
                    "Record does not support #[serde(rename_all)]; rename fields individually",
                ));
            }
            if meta.path.is_ident("default") {
                options.default = Some(parse_serde_default(&meta)?);
                return Ok(());
            }
            skip_meta_value(&meta)
        })?;
    }

    Ok(options)
}

/// `default` or `default = "path::to::function"`.
fn parse_serde_default(meta: &ParseNestedMeta) -> syn::Result<SerdeDefault> {
    if meta.input.peek(Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        return Ok(SerdeDefault::Function(lit.parse()?));
    }
    Ok(SerdeDefault::Trait)
}

/// Consumes the value of a serde option this macro does not interpret.
fn skip_meta_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream2 = content.parse()?;
    }
    Ok(())
}
