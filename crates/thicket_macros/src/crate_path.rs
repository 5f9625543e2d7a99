use proc_macro2::{Ident, Span, TokenStream};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;

/// Resolves the path a macro-generated expression should use to reach
/// `target` (`thicket_check` or `thicket_section`) from whatever crate the
/// macro happens to be expanded into.
///
/// A consuming crate might depend on `target` directly, might re-export it
/// under a renamed dependency, or might only see it transitively through the
/// `thicket` umbrella crate — this covers all three before giving up and
/// emitting the bare crate name.
pub(crate) fn resolve(target: &str) -> TokenStream {
    match crate_name(target) {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Err(_) => match crate_name("thicket") {
            Ok(FoundCrate::Itself) => {
                let target_ident = Ident::new(target, Span::call_site());
                quote!(crate::#target_ident)
            }
            Ok(FoundCrate::Name(name)) => {
                let umbrella = Ident::new(&name, Span::call_site());
                let target_ident = Ident::new(target, Span::call_site());
                quote!(::#umbrella::#target_ident)
            }
            Err(_) => {
                let target_ident = Ident::new(target, Span::call_site());
                quote!(::#target_ident)
            }
        },
    }
}

pub(crate) fn thicket_check_path() -> TokenStream {
    resolve("thicket_check")
}

pub(crate) fn thicket_section_path() -> TokenStream {
    resolve("thicket_section")
}
