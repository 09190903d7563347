mod macros;

use proc_macro::TokenStream;

/// Register a struct as the implementation of a custom element tag.
///
/// The struct must implement `Default` and `sitenav::CustomElement`.
#[proc_macro_attribute]
pub fn custom_element(attr: TokenStream, item: TokenStream) -> TokenStream {
    macros::custom_element::expand(attr.into(), item.into()).into()
}
