use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives a `from_bytes` constructor that decodes a full JSON response body
/// into the annotated type.
///
/// Decode failures are wrapped in `Error::Decode` carrying the type name as
/// context, so a caller can tell which response failed to parse.
#[proc_macro_derive(FromJson)]
pub fn derive_from_json(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let context = name.to_string();

    let expanded = quote! {
        impl #name {
            pub fn from_bytes(bytes: ::bytes::Bytes) -> crate::Result<Self> {
                ::serde_json::from_slice(&bytes).map_err(|source| crate::Error::Decode {
                    context: #context,
                    source,
                })
            }
        }
    };
    TokenStream::from(expanded)
}
