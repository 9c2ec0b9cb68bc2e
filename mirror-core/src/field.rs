use crate::Shape;

crate::bitflags! {
    /// Per-field flags set by the derive macro.
    pub struct FieldFlags: u8 {
        /// `#[mirror(ignore)]`: the field is skipped by reflect and by lookups.
        const IGNORED = 1 << 0;
        /// The field is declared without `pub` and is skipped like an ignored one.
        const PRIVATE = 1 << 1;
    }
}

/// Describes one field of a struct.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// Declared name. Tuple-struct fields use their index (`"0"`, `"1"`, ...).
    pub name: &'static str,

    /// Declared type as written in the source (`u32`, `Option<String>`, ...).
    pub type_name: &'static str,

    /// Shape of the declared type, or [`Shape::UNREFLECTED`] for fields that
    /// are ignored or private.
    pub shape: &'static Shape,

    /// Byte offset of the field in the struct (obtained through `core::mem::offset_of`).
    pub offset: usize,

    /// Flags set via attributes and visibility.
    pub flags: FieldFlags,

    /// Doc comments.
    pub doc: &'static [&'static str],
}

impl Field {
    /// Returns the shape of the declared type.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns `true` if the field carries `#[mirror(ignore)]`.
    #[inline]
    pub const fn is_ignored(&self) -> bool {
        self.flags.contains(FieldFlags::IGNORED)
    }

    /// Returns `true` if the field is not declared `pub`.
    #[inline]
    pub const fn is_private(&self) -> bool {
        self.flags.contains(FieldFlags::PRIVATE)
    }

    /// Returns `true` if reflect visits this field.
    #[inline]
    pub const fn is_reflected(&self) -> bool {
        !self.is_ignored() && !self.is_private()
    }
}

/// Const builder for [`Field`], keeps derive output short.
#[derive(Clone, Copy, Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Start a field with its name, shape and offset.
    #[inline]
    pub const fn new(name: &'static str, shape: &'static Shape, offset: usize) -> Self {
        Self {
            field: Field {
                name,
                type_name: shape.type_identifier,
                shape,
                offset,
                flags: FieldFlags::empty(),
                doc: &[],
            },
        }
    }

    /// Set the declared type as written in the source.
    #[inline]
    pub const fn type_name(mut self, type_name: &'static str) -> Self {
        self.field.type_name = type_name;
        self
    }

    /// Set the flags.
    #[inline]
    pub const fn flags(mut self, flags: FieldFlags) -> Self {
        self.field.flags = flags;
        self
    }

    /// Set the doc comments.
    #[inline]
    pub const fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.field.doc = doc;
        self
    }

    /// Finish the field.
    #[inline]
    pub const fn build(self) -> Field {
        self.field
    }
}
