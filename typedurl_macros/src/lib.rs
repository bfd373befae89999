//! Derive macros for the `typedurl` crate.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    Data, DataStruct, DeriveInput, Expr, Fields, GenericArgument, Ident, Lit, LitStr,
    PathArguments, Result as SynResult, Token, Type,
};

/// One `name = value` entry inside a `#[url(..)]` attribute.
struct SpecEntry {
    name: Ident,
    value: Expr,
}

impl Parse for SpecEntry {
    fn parse(input: ParseStream) -> SynResult<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let value: Expr = input.parse()?;
        Ok(SpecEntry { name, value })
    }
}

impl SpecEntry {
    fn parse_optional_list(input: ParseStream) -> SynResult<Vec<SpecEntry>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let content;
        parenthesized!(content in input);
        let entries = Punctuated::<SpecEntry, Token![,]>::parse_terminated(&content)?;
        Ok(entries.into_iter().collect())
    }

    fn string_value(&self) -> SynResult<LitStr> {
        if let Expr::Lit(expr) = &self.value {
            if let Lit::Str(lit) = &expr.lit {
                return Ok(lit.clone());
            }
        }
        Err(syn::Error::new_spanned(&self.value, "expected a string literal"))
    }
}

enum UrlSpec {
    StaticPath {
        segments: Option<Vec<LitStr>>,
    },
    DynamicPath {
        placeholder: Option<LitStr>,
    },
    Query {
        key: Option<LitStr>,
        default: Option<Expr>,
        placeholder: Option<LitStr>,
    },
}

impl Parse for UrlSpec {
    fn parse(input: ParseStream) -> SynResult<Self> {
        let kind: Ident = input.parse()?;
        match kind.to_string().as_str() {
            "static_path" => {
                if input.is_empty() {
                    return Ok(UrlSpec::StaticPath { segments: None });
                }
                let content;
                parenthesized!(content in input);
                let literals = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                if literals.is_empty() {
                    return Err(syn::Error::new(
                        kind.span(),
                        "static_path(..) requires at least one literal segment",
                    ));
                }
                Ok(UrlSpec::StaticPath {
                    segments: Some(literals.into_iter().collect()),
                })
            }
            "dynamic_path" => {
                let mut placeholder = None;
                for entry in SpecEntry::parse_optional_list(input)? {
                    match entry.name.to_string().as_str() {
                        "placeholder" => placeholder = Some(entry.string_value()?),
                        other => {
                            return Err(syn::Error::new(
                                entry.name.span(),
                                format!("unexpected dynamic_path option `{}`", other),
                            ))
                        }
                    }
                }
                Ok(UrlSpec::DynamicPath { placeholder })
            }
            "query" => {
                let mut key = None;
                let mut default = None;
                let mut placeholder = None;
                for entry in SpecEntry::parse_optional_list(input)? {
                    match entry.name.to_string().as_str() {
                        "key" => key = Some(entry.string_value()?),
                        "default" => default = Some(entry.value),
                        "placeholder" => placeholder = Some(entry.string_value()?),
                        other => {
                            return Err(syn::Error::new(
                                entry.name.span(),
                                format!("unexpected query option `{}`", other),
                            ))
                        }
                    }
                }
                Ok(UrlSpec::Query {
                    key,
                    default,
                    placeholder,
                })
            }
            other => Err(syn::Error::new(
                kind.span(),
                format!(
                    "unknown field kind `{}`; expected static_path, dynamic_path or query",
                    other
                ),
            )),
        }
    }
}

/// Whether the declared type reads as `Field<T>`.
fn is_field_cell(ty: &Type) -> bool {
    let Type::Path(path) = ty else { return false };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Field" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };
    args.args.len() == 1 && matches!(args.args.first(), Some(GenericArgument::Type(_)))
}

fn option_string_tokens(lit: &Option<LitStr>) -> TokenStream2 {
    match lit {
        Some(lit) => quote! { ::core::option::Option::Some(#lit.to_string()) },
        None => quote! { ::core::option::Option::None },
    }
}

/// A string-literal default goes through `Into` so `&str` can fill a
/// `String` field; any other expression must already have the field's
/// value type.
fn default_tokens(expr: &Expr) -> TokenStream2 {
    if let Expr::Lit(lit) = expr {
        if let Lit::Str(text) = &lit.lit {
            return quote! { ::core::convert::Into::into(#text) };
        }
    }
    quote! { #expr }
}

/// Derives `UrlRecord` from `#[url(..)]` field attributes.
///
/// Annotated fields must be declared as `Field<T>`:
///
/// - `#[url(static_path)]` or `#[url(static_path("api", "v1"))]`
/// - `#[url(dynamic_path)]` or `#[url(dynamic_path(placeholder = ":uid"))]`
/// - `#[url(query)]` or `#[url(query(key = "full_name", default = 1))]`
///
/// Fields without an attribute stay out of the schema; decoding fills them
/// with `Default::default()` and encoding ignores them.
#[proc_macro_derive(UrlRecord, attributes(url))]
pub fn derive_url_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_url_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_url_record(input: &DeriveInput) -> SynResult<TokenStream2> {
    let record = &input.ident;
    if let Some(param) = input.generics.params.first() {
        return Err(syn::Error::new_spanned(
            param,
            "UrlRecord cannot be derived for generic types",
        ));
    }
    if let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("url")) {
        return Err(syn::Error::new_spanned(
            attr,
            "#[url(..)] belongs on fields, not on the struct",
        ));
    }
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "UrlRecord can only be derived for structs with named fields",
            ))
        }
    };

    let mut definitions = Vec::new();
    let mut decode_stmts = Vec::new();
    let mut encode_stmts = Vec::new();
    let mut unbound_fields = Vec::new();
    let mut idents = Vec::new();

    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let name = ident.to_string().trim_start_matches("r#").to_string();

        let mut url_attrs = field.attrs.iter().filter(|attr| attr.path().is_ident("url"));
        let attr = url_attrs.next();
        if let Some(extra) = url_attrs.next() {
            return Err(syn::Error::new_spanned(extra, "duplicate #[url(..)] attribute"));
        }
        let Some(attr) = attr else {
            decode_stmts.push(quote! { let #ident = ::core::default::Default::default(); });
            unbound_fields.push(quote! { #ident: ::core::default::Default::default() });
            idents.push(ident);
            continue;
        };

        let spec: UrlSpec = attr.parse_args()?;
        if !is_field_cell(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "fields with a #[url(..)] attribute must be declared as Field<T>",
            ));
        }

        match &spec {
            UrlSpec::StaticPath { segments } => {
                let segments_tokens = match segments {
                    Some(literals) => quote! {
                        ::core::option::Option::Some(::std::vec![#(#literals.to_string()),*])
                    },
                    None => quote! { ::core::option::Option::None },
                };
                definitions.push(quote! {
                    (#name, ::typedurl::Definition::StaticPath { segments: #segments_tokens })
                });
                decode_stmts.push(quote! { let #ident = decoder.static_path(#name)?; });
                encode_stmts.push(quote! { encoder.static_path(#name)?; });
            }
            UrlSpec::DynamicPath { placeholder } => {
                let placeholder_tokens = option_string_tokens(placeholder);
                definitions.push(quote! {
                    (#name, ::typedurl::Definition::DynamicPath { placeholder: #placeholder_tokens })
                });
                decode_stmts.push(quote! { let #ident = decoder.dynamic_path(#name)?; });
                encode_stmts.push(quote! { encoder.dynamic_path(#name, &self.#ident)?; });
            }
            UrlSpec::Query {
                key,
                default,
                placeholder,
            } => {
                let key_tokens = option_string_tokens(key);
                let placeholder_tokens = option_string_tokens(placeholder);
                let default_arg = match default {
                    Some(expr) => {
                        let value = default_tokens(expr);
                        quote! { ::core::option::Option::Some(#value) }
                    }
                    None => quote! { ::core::option::Option::None },
                };
                definitions.push(quote! {
                    (#name, ::typedurl::Definition::Query {
                        key: #key_tokens,
                        placeholder: #placeholder_tokens,
                    })
                });
                decode_stmts.push(quote! { let #ident = decoder.query(#name, #default_arg)?; });
                encode_stmts
                    .push(quote! { encoder.query(#name, &self.#ident, #default_arg)?; });
            }
        }
        unbound_fields.push(quote! { #ident: ::typedurl::Field::Unbound });
        idents.push(ident);
    }

    Ok(quote! {
        impl ::typedurl::UrlRecord for #record {
            fn definitions() -> ::std::vec::Vec<(&'static str, ::typedurl::Definition)> {
                ::std::vec![#(#definitions),*]
            }

            fn unbound() -> Self {
                Self { #(#unbound_fields),* }
            }

            fn decode_fields(
                decoder: &mut ::typedurl::UrlDecoder,
            ) -> ::core::result::Result<Self, ::typedurl::CodecError> {
                #(#decode_stmts)*
                ::core::result::Result::Ok(Self { #(#idents),* })
            }

            fn encode_fields(
                &self,
                encoder: &mut ::typedurl::UrlEncoder,
            ) -> ::core::result::Result<(), ::typedurl::CodecError> {
                #(#encode_stmts)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> SynResult<Self> {
        match lit.value().as_str() {
            "lowercase" => Ok(RenameRule::Lower),
            "UPPERCASE" => Ok(RenameRule::Upper),
            "PascalCase" => Ok(RenameRule::Pascal),
            "camelCase" => Ok(RenameRule::Camel),
            "snake_case" => Ok(RenameRule::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnake),
            "kebab-case" => Ok(RenameRule::Kebab),
            other => Err(syn::Error::new_spanned(
                lit,
                format!("unknown rename_all rule `{}`", other),
            )),
        }
    }

    fn apply(&self, variant: &str) -> String {
        match self {
            RenameRule::Lower => variant.to_lowercase(),
            RenameRule::Upper => variant.to_uppercase(),
            RenameRule::Pascal => variant.to_string(),
            RenameRule::Camel => {
                let mut chars = variant.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            RenameRule::Snake => separate_words(variant, '_'),
            RenameRule::ScreamingSnake => separate_words(variant, '_').to_uppercase(),
            RenameRule::Kebab => separate_words(variant, '-'),
        }
    }
}

fn separate_words(variant: &str, separator: char) -> String {
    let mut out = String::with_capacity(variant.len() + 2);
    for (index, ch) in variant.char_indices() {
        if ch.is_uppercase() {
            if index > 0 {
                out.push(separator);
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Derives `UrlComponent` for a fieldless enum, mapping each variant to its
/// name. `#[url(rename_all = "snake_case")]` on the enum or
/// `#[url(rename = "..")]` on a variant override the mapping.
#[proc_macro_derive(UrlComponent, attributes(url))]
pub fn derive_url_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_url_component(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_url_component(input: &DeriveInput) -> SynResult<TokenStream2> {
    let component = &input.ident;
    if let Some(param) = input.generics.params.first() {
        return Err(syn::Error::new_spanned(
            param,
            "UrlComponent cannot be derived for generic types",
        ));
    }
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "UrlComponent can only be derived for enums with unit variants",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "UrlComponent requires at least one variant",
        ));
    }

    let mut rename_all = None;
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("url")) {
        let entries = attr.parse_args_with(Punctuated::<SpecEntry, Token![,]>::parse_terminated)?;
        for entry in entries {
            match entry.name.to_string().as_str() {
                "rename_all" => rename_all = Some(RenameRule::from_lit(&entry.string_value()?)?),
                other => {
                    return Err(syn::Error::new(
                        entry.name.span(),
                        format!("unexpected container option `{}`", other),
                    ))
                }
            }
        }
    }

    let mut names: Vec<String> = Vec::new();
    let mut variant_idents = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "UrlComponent variants cannot carry fields",
            ));
        }
        let mut rename = None;
        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("url")) {
            let entries =
                attr.parse_args_with(Punctuated::<SpecEntry, Token![,]>::parse_terminated)?;
            for entry in entries {
                match entry.name.to_string().as_str() {
                    "rename" => rename = Some(entry.string_value()?.value()),
                    other => {
                        return Err(syn::Error::new(
                            entry.name.span(),
                            format!("unexpected variant option `{}`", other),
                        ))
                    }
                }
            }
        }
        let name = match rename {
            Some(explicit) => explicit,
            None => match &rename_all {
                Some(rule) => rule.apply(&variant.ident.to_string()),
                None => variant.ident.to_string(),
            },
        };
        if names.contains(&name) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate component value `{}`", name),
            ));
        }
        names.push(name);
        variant_idents.push(&variant.ident);
    }

    Ok(quote! {
        impl ::typedurl::UrlComponent for #component {
            fn parse(component: &str) -> ::core::option::Option<Self> {
                match component {
                    #(#names => ::core::option::Option::Some(Self::#variant_idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn render(&self) -> ::core::option::Option<::std::string::String> {
                let name = match self {
                    #(Self::#variant_idents => #names,)*
                };
                ::core::option::Option::Some(name.to_string())
            }
        }
    })
}
