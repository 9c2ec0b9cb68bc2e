#![doc = include_str!("../README.md")]

#[proc_macro_derive(Reflect, attributes(mirror))]
pub fn reflect_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    mirror_macros_impl::derive_reflect(input.into()).into()
}
