use proc_macro2::TokenStream;
use quote::quote;

use crate::{PField, PStruct, PStructKind};

/// Generate the `Reflect` impl for a parsed struct.
pub(crate) fn process_struct(ps: &PStruct) -> TokenStream {
    let mirror_crate = &ps.crate_path;
    let struct_name = &ps.name;
    let struct_name_str = struct_name.to_string();

    let kind = match ps.kind {
        PStructKind::Struct => quote! { #mirror_crate::StructKind::Struct },
        PStructKind::TupleStruct => quote! { #mirror_crate::StructKind::TupleStruct },
        PStructKind::Unit => quote! { #mirror_crate::StructKind::Unit },
    };

    let fields: Vec<TokenStream> = ps
        .fields
        .iter()
        .map(|field| gen_field(ps, field))
        .collect();

    let fields_slice = if fields.is_empty() {
        quote! { &[] }
    } else {
        quote! { &const {[#(#fields),*]} }
    };

    quote! {
        #[automatically_derived]
        unsafe impl #mirror_crate::Reflect for #struct_name {
            const SHAPE: &'static #mirror_crate::Shape = &const {
                #mirror_crate::ShapeBuilder::for_sized::<Self>(#struct_name_str)
                    .ty(#mirror_crate::Type::Struct(#mirror_crate::StructType::new(
                        #kind,
                        #fields_slice,
                    )))
                    .build()
            };
        }
    }
}

fn gen_field(ps: &PStruct, field: &PField) -> TokenStream {
    let mirror_crate = &ps.crate_path;
    let struct_name = &ps.name;
    let member = &field.member;
    let name = &field.name;
    let ty = &field.ty;
    let type_name = type_name_string(ty);

    let offset = quote! { ::core::mem::offset_of!(#struct_name, #member) };

    let mut flags = Vec::new();
    if field.ignore {
        flags.push(quote! { #mirror_crate::FieldFlags::IGNORED });
    }
    if !field.public {
        flags.push(quote! { #mirror_crate::FieldFlags::PRIVATE });
    }

    // Skipped fields never need their type to implement `Reflect`.
    let shape = if flags.is_empty() {
        quote! { <#ty as #mirror_crate::Reflect>::SHAPE }
    } else {
        quote! { #mirror_crate::Shape::UNREFLECTED }
    };

    let mut builder = quote! {
        #mirror_crate::FieldBuilder::new(#name, #shape, #offset).type_name(#type_name)
    };

    if let Some((first, rest)) = flags.split_first() {
        builder = quote! { #builder.flags(#first #(.union(#rest))*) };
    }

    if !field.doc.is_empty() {
        let doc = &field.doc;
        builder = quote! { #builder.doc(&[#(#doc),*]) };
    }

    quote! { #builder.build() }
}

/// Render a type the way it is usually written: `Option<String>` rather
/// than the token-spaced `Option < String >`.
fn type_name_string(ty: &TokenStream) -> String {
    let spaced = ty.to_string();
    let mut out = String::with_capacity(spaced.len());
    let mut chars = spaced.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let prev = out.chars().last();
            let next = chars.peek().copied();
            let glue_prev = matches!(prev, Some('<' | '&' | ':' | '(' | '['));
            let glue_next = matches!(next, Some('<' | '>' | ',' | ':' | ')' | ']' | ';'));
            if glue_prev || glue_next {
                continue;
            }
        }
        out.push(c);
    }
    out
}
