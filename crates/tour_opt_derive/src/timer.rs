use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let func = parse_macro_input!(item as ItemFn);

    let label = if attr.is_empty() {
        func.sig.ident.to_string()
    } else {
        match syn::parse::<LitStr>(attr) {
            Ok(lit) => lit.value(),
            Err(err) => return err.to_compile_error().into(),
        }
    };

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;

    let output = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    // The body runs inside a closure so early `return`s are still timed.
    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            let __timer_start = std::time::Instant::now();
            let __timer_result = (|| -> #output #block)();
            log::debug!(
                "{}: elapsed={:.3}s",
                #label,
                __timer_start.elapsed().as_secs_f64()
            );
            __timer_result
        }
    };

    TokenStream::from(expanded)
}
