use proc_macro2::{Delimiter, TokenStream, TokenTree};

use crate::PStruct;
use crate::process_struct::process_struct;

/// Recursively flattens transparent groups (groups with `Delimiter::None`).
///
/// `macro_rules!` wraps captured fragments such as `$vis:vis` or `$ty:ty` in
/// invisible groups; unwrapping them lets the grammar see plain tokens.
fn flatten_transparent_groups(input: TokenStream) -> TokenStream {
    input
        .into_iter()
        .flat_map(|tt| match tt {
            TokenTree::Group(group) if group.delimiter() == Delimiter::None => {
                flatten_transparent_groups(group.stream())
            }
            TokenTree::Group(group) => {
                let flattened = flatten_transparent_groups(group.stream());
                let mut new_group = proc_macro2::Group::new(group.delimiter(), flattened);
                new_group.set_span(group.span());
                core::iter::once(TokenTree::Group(new_group)).collect()
            }
            other => core::iter::once(other).collect(),
        })
        .collect()
}

/// Entry point for `#[derive(Reflect)]`.
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = flatten_transparent_groups(input);
    match PStruct::parse(input) {
        Ok(parsed) => process_struct(&parsed),
        Err(errors) => errors.iter().map(|e| e.to_compile_error()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn expand(input: TokenStream) -> String {
        derive_reflect(input).to_string()
    }

    #[test]
    fn reflected_fields_use_their_declared_shape() {
        let out = expand(quote! {
            pub struct StreetAddress {
                pub number: i32,
                pub street: String,
            }
        });
        assert!(out.contains("unsafe impl :: mirror :: Reflect for StreetAddress"));
        assert!(out.contains("< i32 as :: mirror :: Reflect > :: SHAPE"));
        assert!(out.contains("offset_of ! (StreetAddress , street)"));
        assert!(out.contains("type_name (\"String\")"));
        assert!(!out.contains("FieldFlags"));
    }

    #[test]
    fn skipped_fields_get_flags_and_no_shape_bound() {
        let out = expand(quote! {
            struct Stamped {
                #[mirror(ignore)]
                pub at: std::time::Instant,
                hidden: u8,
            }
        });
        assert!(out.contains("FieldFlags :: IGNORED"));
        assert!(out.contains("FieldFlags :: PRIVATE"));
        assert!(!out.contains("Instant as :: mirror :: Reflect"));
        assert!(!out.contains("u8 as :: mirror :: Reflect"));
        assert!(out.contains("Shape :: UNREFLECTED"));
    }

    #[test]
    fn tuple_members_are_indices() {
        let out = expand(quote! { pub struct Pair(pub u8, pub u16); });
        assert!(out.contains("offset_of ! (Pair , 1)"));
        assert!(out.contains("StructKind :: TupleStruct"));
    }

    #[test]
    fn unit_struct_has_empty_field_table() {
        let out = expand(quote! { pub struct Marker; });
        assert!(out.contains("StructKind :: Unit , & []"));
    }

    #[test]
    fn errors_become_compile_errors() {
        let out = expand(quote! { enum Nope { A } });
        assert!(out.contains("compile_error"));
        assert!(out.contains("only supports structs"));

        let out = expand(quote! {
            #[repr(packed)]
            pub struct Wire { pub value: u32 }
        });
        assert!(out.contains("compile_error"));
        assert!(!out.contains("unsafe impl"));
    }
}
