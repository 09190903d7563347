//! The `#[custom_element]` attribute macro.
//!
//! # Examples
//!
//! ```ignore
//! #[custom_element(tag = "site-navigation")]
//! #[derive(Default)]
//! struct SiteNavigation {
//!     drawers: Vec<Rc<Drawer>>,
//! }
//! ```

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{DeriveInput, Ident, LitStr, Token, parse2};

/// Parsed attributes for #[custom_element].
struct CustomElementAttrs {
    tag: LitStr,
}

impl CustomElementAttrs {
    fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut tag: Option<LitStr> = None;

        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("tag") {
                meta.input.parse::<Token![=]>()?;
                tag = Some(meta.input.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown custom_element attribute, expected `tag`"))
            }
        });
        syn::parse::Parser::parse2(parser, attr)?;

        let tag = tag.ok_or_else(|| {
            syn::Error::new(Span::call_site(), "custom_element requires `tag = \"...\"`")
        })?;
        validate_tag(&tag)?;
        Ok(Self { tag })
    }
}

/// Catch the obvious mistakes at compile time. The registry does the full
/// check at runtime.
fn validate_tag(tag: &LitStr) -> syn::Result<()> {
    let value = tag.value();
    if !value.contains('-') {
        return Err(syn::Error::new_spanned(
            tag,
            "custom element tags must contain a hyphen",
        ));
    }
    if !value.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(syn::Error::new_spanned(
            tag,
            "custom element tags must start with a lowercase ASCII letter",
        ));
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(syn::Error::new_spanned(
            tag,
            "custom element tags must be lowercase",
        ));
    }
    Ok(())
}

/// Generate inventory registration.
fn generate_registration(name: &Ident, tag: &LitStr) -> TokenStream {
    quote! {
        sitenav::inventory::submit! {
            sitenav::ElementRegistration::new(
                #tag,
                || Box::new(<#name as ::core::default::Default>::default())
                    as Box<dyn sitenav::CustomElement>
            )
        }
    }
}

pub fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = match CustomElementAttrs::parse(attr) {
        Ok(a) => a,
        Err(e) => return e.to_compile_error(),
    };

    let input: DeriveInput = match parse2(item) {
        Ok(i) => i,
        Err(e) => return e.to_compile_error(),
    };

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "custom elements cannot be generic",
        )
        .to_compile_error();
    }

    let registration = generate_registration(&input.ident, &attrs.tag);

    quote! {
        #input

        #registration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let attrs = CustomElementAttrs::parse(quote!(tag = "site-navigation")).unwrap();
        assert_eq!(attrs.tag.value(), "site-navigation");
    }

    #[test]
    fn test_rejects_bad_attributes() {
        assert!(CustomElementAttrs::parse(quote!()).is_err());
        assert!(CustomElementAttrs::parse(quote!(name = "site-navigation")).is_err());
        assert!(CustomElementAttrs::parse(quote!(tag = "navigation")).is_err());
        assert!(CustomElementAttrs::parse(quote!(tag = "Site-Nav")).is_err());
        assert!(CustomElementAttrs::parse(quote!(tag = "-nav")).is_err());
    }

    #[test]
    fn test_expand_keeps_item_and_registers() {
        let output = expand(
            quote!(tag = "x-menu"),
            quote! {
                #[derive(Default)]
                struct Menu;
            },
        )
        .to_string();
        assert!(output.contains("struct Menu"));
        assert!(output.contains("ElementRegistration"));
        assert!(output.contains("\"x-menu\""));
    }

    #[test]
    fn test_expand_rejects_generics() {
        let output = expand(quote!(tag = "x-menu"), quote!(struct Menu<T>(T);)).to_string();
        assert!(output.contains("compile_error"));
    }
}
