use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

/// Renders a struct as aligned `key = value` lines, one per field, using each
/// field's `Display`.
pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let entries: Vec<_> = fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .map(|field_ident| (field_ident.to_string(), field_ident))
        .collect();

    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let lines = entries.iter().map(|(key, field_ident)| {
        let key_lit = LitStr::new(&format!("{key:<width$}"), Span::call_site());
        quote! {
            write!(f, "\n\t{} = {}", #key_lit, self.#field_ident)?;
        }
    });

    let expanded = quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #(#lines)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
