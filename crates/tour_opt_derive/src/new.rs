use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// `pub fn new(..)` taking every named field in declaration order.
pub fn derive_new_inner(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(&name, "`New` can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(named) = &data.fields else {
        return syn::Error::new_spanned(&name, "`New` requires named fields")
            .to_compile_error()
            .into();
    };

    let idents: Vec<_> = named.named.iter().filter_map(|f| f.ident.as_ref()).collect();
    let types: Vec<_> = named.named.iter().map(|f| &f.ty).collect();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub fn new(#(#idents: #types),*) -> Self {
                Self { #(#idents),* }
            }
        }
    };

    TokenStream::from(expanded)
}
