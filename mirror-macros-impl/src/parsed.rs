//! unsynn grammar for the types `#[derive(Reflect)]` accepts, and the plain
//! model ([`PStruct`]) code generation works from.

use proc_macro2::{Delimiter, Literal, Span, TokenStream, TokenTree};
use quote::quote;
use unsynn::*;

keyword! {
    KStruct = "struct";
    KEnum = "enum";
    KPub = "pub";
}

operator! {
    LAngle = "<";
}

unsynn! {
    /// Visibility: `pub`, `pub(...)` or nothing
    enum Vis {
        PubIn(Cons<KPub, ParenthesisGroup>),
        Pub(KPub),
    }

    /// An outer attribute: `#[...]`
    struct Attribute {
        _pound: Pound,
        content: BracketGroup,
    }

    /// The derive input
    enum AdtDecl {
        Struct(StructDef),
        Enum(EnumDef),
    }

    /// A struct definition
    struct StructDef {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        _kw_struct: KStruct,
        name: Ident,
        body: StructBody,
    }

    /// What follows the struct name
    enum StructBody {
        Named(BraceGroup),
        Tuple(Cons<ParenthesisGroup, Semicolon>),
        Unit(Semicolon),
        Generic(Cons<LAngle, Vec<TokenTree>>),
    }

    /// An enum definition, parsed only to be rejected with a clear message
    struct EnumDef {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        _kw_enum: KEnum,
        name: Ident,
        body: BraceGroup,
    }

    /// One comma-separated segment of a braced struct body
    struct NamedField {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        name: Ident,
        _colon: Colon,
        ty: Vec<TokenTree>,
    }

    /// One comma-separated segment of a tuple struct body
    struct TupleField {
        attrs: Vec<Attribute>,
        vis: Option<Vis>,
        ty: Vec<TokenTree>,
    }
}

/// A compile error to be emitted instead of the impl.
#[derive(Debug, Clone)]
pub struct CompileError {
    /// The error message
    pub message: String,
    /// The span where the error occurred
    pub span: Span,
}

impl CompileError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Render as a `compile_error!` invocation at the recorded span.
    pub fn to_compile_error(&self) -> TokenStream {
        let message = &self.message;
        quote::quote_spanned! { self.span => ::core::compile_error!(#message); }
    }
}

/// How a field is addressed in `offset_of!`.
#[derive(Debug, Clone)]
pub enum PMember {
    /// `foo` in `struct S { foo: T }`
    Named(proc_macro2::Ident),
    /// `0` in `struct S(T);`
    Index(usize),
}

impl quote::ToTokens for PMember {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            PMember::Named(ident) => tokens.extend(quote! { #ident }),
            PMember::Index(index) => {
                let unsuffixed = Literal::usize_unsuffixed(*index);
                tokens.extend(quote! { #unsuffixed })
            }
        }
    }
}

/// Parsed struct field.
#[derive(Debug, Clone)]
pub struct PField {
    /// How the field is addressed
    pub member: PMember,
    /// The name recorded in the shape (raw identifiers lose their `r#`)
    pub name: String,
    /// The declared type
    pub ty: TokenStream,
    /// Declared with some form of `pub`
    pub public: bool,
    /// Carries `#[mirror(ignore)]`
    pub ignore: bool,
    /// Doc comment literals, as written
    pub doc: Vec<Literal>,
}

/// The kind of struct being derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PStructKind {
    /// `struct S { .. }`
    Struct,
    /// `struct S(..);`
    TupleStruct,
    /// `struct S;`
    Unit,
}

/// Parsed struct, ready for code generation.
#[derive(Debug, Clone)]
pub struct PStruct {
    /// Type name
    pub name: proc_macro2::Ident,
    /// Struct kind
    pub kind: PStructKind,
    /// Fields in declaration order
    pub fields: Vec<PField>,
    /// Path to the mirror crate, `::mirror` unless `#[mirror(crate = ..)]`
    pub crate_path: TokenStream,
}

impl PStruct {
    /// Parse a derive input. Enums, generic structs and malformed attributes
    /// are reported as errors.
    pub fn parse(input: TokenStream) -> core::result::Result<Self, Vec<CompileError>> {
        let mut it = input.to_token_iter();
        let decl = match it.parse::<Cons<AdtDecl, EndOfStream>>() {
            Ok(decl) => decl.first,
            Err(err) => {
                return Err(vec![CompileError::new(
                    format!("mirror: could not parse type declaration: {err}"),
                    Span::call_site(),
                )]);
            }
        };

        let def = match decl {
            AdtDecl::Struct(def) => def,
            AdtDecl::Enum(def) => {
                return Err(vec![CompileError::new(
                    "`#[derive(Reflect)]` only supports structs",
                    def.name.span(),
                )]);
            }
        };

        let mut errors = Vec::new();
        let crate_path = container_crate_path(&def.attrs, &mut errors);
        reject_packed(&def.attrs, &mut errors);

        let (kind, fields) = match &def.body {
            StructBody::Named(group) => {
                let mut fields = Vec::new();
                for segment in split_fields(group.0.stream()) {
                    match segment.to_token_iter().parse::<NamedField>() {
                        Ok(field) => fields.push(named_field(field, &mut errors)),
                        Err(err) => errors.push(CompileError::new(
                            format!("mirror: could not parse field: {err}"),
                            group.0.span(),
                        )),
                    }
                }
                (PStructKind::Struct, fields)
            }
            StructBody::Tuple(tuple) => {
                let mut fields = Vec::new();
                for (index, segment) in split_fields(tuple.first.0.stream()).into_iter().enumerate()
                {
                    match segment.to_token_iter().parse::<TupleField>() {
                        Ok(field) => fields.push(tuple_field(index, field, &mut errors)),
                        Err(err) => errors.push(CompileError::new(
                            format!("mirror: could not parse field: {err}"),
                            tuple.first.0.span(),
                        )),
                    }
                }
                (PStructKind::TupleStruct, fields)
            }
            StructBody::Unit(_) => (PStructKind::Unit, Vec::new()),
            StructBody::Generic(_) => {
                errors.push(CompileError::new(
                    "`#[derive(Reflect)]` does not support generic structs",
                    def.name.span(),
                ));
                (PStructKind::Struct, Vec::new())
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PStruct {
            name: def.name,
            kind,
            fields,
            crate_path,
        })
    }
}

fn named_field(field: NamedField, errors: &mut Vec<CompileError>) -> PField {
    let attrs = FieldAttrs::parse(&field.attrs, errors);
    let raw = field.name.to_string();
    let name = raw.strip_prefix("r#").unwrap_or(&raw).to_string();
    PField {
        member: PMember::Named(field.name),
        name,
        ty: field.ty.into_iter().collect(),
        public: field.vis.is_some(),
        ignore: attrs.ignore,
        doc: attrs.doc,
    }
}

fn tuple_field(index: usize, field: TupleField, errors: &mut Vec<CompileError>) -> PField {
    let attrs = FieldAttrs::parse(&field.attrs, errors);
    PField {
        member: PMember::Index(index),
        name: index.to_string(),
        ty: field.ty.into_iter().collect(),
        public: field.vis.is_some(),
        ignore: attrs.ignore,
        doc: attrs.doc,
    }
}

#[derive(Default)]
struct FieldAttrs {
    ignore: bool,
    doc: Vec<Literal>,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute], errors: &mut Vec<CompileError>) -> Self {
        let mut out = FieldAttrs::default();
        for attr in attrs {
            let span = attr.content.0.span();
            let tokens: Vec<TokenTree> = attr.content.0.stream().into_iter().collect();
            match tokens.as_slice() {
                [TokenTree::Ident(ident), TokenTree::Punct(eq), TokenTree::Literal(lit)]
                    if ident == "doc" && eq.as_char() == '=' =>
                {
                    out.doc.push(lit.clone());
                }
                [TokenTree::Ident(ident), TokenTree::Group(args)]
                    if ident == "mirror" && args.delimiter() == Delimiter::Parenthesis =>
                {
                    for key in mirror_keys(args.stream()) {
                        match key {
                            TokenTree::Ident(key) if key == "ignore" => out.ignore = true,
                            other => errors.push(CompileError::new(
                                format!("unknown mirror field attribute `{other}`, expected `ignore`"),
                                other.span(),
                            )),
                        }
                    }
                }
                [TokenTree::Ident(ident), ..] if ident == "mirror" => {
                    errors.push(CompileError::new("expected `#[mirror(...)]`", span));
                }
                _ => {}
            }
        }
        out
    }
}

/// Container-level `#[mirror(crate = path)]`.
fn container_crate_path(attrs: &[Attribute], errors: &mut Vec<CompileError>) -> TokenStream {
    let mut crate_path = None;
    for attr in attrs {
        let tokens: Vec<TokenTree> = attr.content.0.stream().into_iter().collect();
        let [TokenTree::Ident(ident), TokenTree::Group(args)] = tokens.as_slice() else {
            continue;
        };
        if ident != "mirror" || args.delimiter() != Delimiter::Parenthesis {
            continue;
        }
        let inner: Vec<TokenTree> = args.stream().into_iter().collect();
        match inner.as_slice() {
            [TokenTree::Ident(key), TokenTree::Punct(eq), path @ ..]
                if key == "crate" && eq.as_char() == '=' && !path.is_empty() =>
            {
                crate_path = Some(path.iter().cloned().collect());
            }
            _ => errors.push(CompileError::new(
                "unknown mirror container attribute, expected `crate = path`",
                args.span(),
            )),
        }
    }
    crate_path.unwrap_or_else(|| quote! { ::mirror })
}

/// Packed structs put fields at unaligned offsets, which the mapper cannot
/// write through.
fn reject_packed(attrs: &[Attribute], errors: &mut Vec<CompileError>) {
    for attr in attrs {
        let tokens: Vec<TokenTree> = attr.content.0.stream().into_iter().collect();
        let [TokenTree::Ident(ident), TokenTree::Group(args)] = tokens.as_slice() else {
            continue;
        };
        if ident != "repr" {
            continue;
        }
        let packed = args
            .stream()
            .into_iter()
            .any(|tt| matches!(&tt, TokenTree::Ident(i) if i == "packed"));
        if packed {
            errors.push(CompileError::new(
                "`#[derive(Reflect)]` does not support `#[repr(packed)]` structs",
                args.span(),
            ));
        }
    }
}

/// Keys of a `mirror(...)` list, separated by commas.
fn mirror_keys(stream: TokenStream) -> impl Iterator<Item = TokenTree> {
    stream
        .into_iter()
        .filter(|tt| !matches!(tt, TokenTree::Punct(p) if p.as_char() == ','))
}

/// Split a struct body at the commas that separate fields.
///
/// Commas inside `<...>` belong to the field's type (`HashMap<K, V>`); the
/// `>` of `->` does not close an angle bracket.
fn split_fields(body: TokenStream) -> Vec<TokenStream> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;
    let mut after_dash = false;

    for tt in body {
        if let TokenTree::Punct(p) = &tt {
            match p.as_char() {
                '<' => depth += 1,
                '>' if !after_dash => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    segments.push(current.drain(..).collect());
                    after_dash = false;
                    continue;
                }
                _ => {}
            }
            after_dash = p.as_char() == '-';
        } else {
            after_dash = false;
        }
        current.push(tt);
    }

    if !current.is_empty() {
        segments.push(current.into_iter().collect());
    }
    segments
}
