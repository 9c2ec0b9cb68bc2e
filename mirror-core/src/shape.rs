use core::fmt;

use crate::{ConstTypeId, ScalarType, StructType};

/// Static description of a reflectable type.
///
/// Shapes are built in const context (see [`ShapeBuilder`]) and compared by
/// their [`ConstTypeId`].
#[derive(Clone, Copy)]
pub struct Shape {
    /// Unique type identifier from the compiler.
    pub id: ConstTypeId,

    /// Name of the type, without module path (`u32`, `String`, `Address`).
    pub type_identifier: &'static str,

    /// How values of this type are stored.
    pub ty: Type,
}

/// Storage classification of a [`Shape`].
#[derive(Clone, Copy, Debug)]
pub enum Type {
    /// A leaf that can hold a sentinel value.
    Scalar(ScalarType),

    /// A struct whose fields are visited one by one.
    Struct(StructType),

    /// A type mirror knows by name only. Cannot be reflected; fields of
    /// this type have to be marked `#[mirror(ignore)]`.
    Opaque,
}

/// Placeholder type behind [`Shape::UNREFLECTED`].
enum Unreflected {}

impl Shape {
    /// Shape recorded for fields that are ignored or private.
    ///
    /// Those fields are never visited, so their declared type does not need
    /// to implement [`Reflect`](crate::Reflect).
    pub const UNREFLECTED: &'static Shape = &const {
        ShapeBuilder::for_sized::<Unreflected>("<unreflected>").build()
    };

    /// Returns the scalar type if this shape is a sentinel-capable leaf.
    #[inline]
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        match self.ty {
            Type::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the struct definition if this shape is a struct.
    #[inline]
    pub const fn struct_type(&self) -> Option<&StructType> {
        match &self.ty {
            Type::Struct(st) => Some(st),
            _ => None,
        }
    }

    /// Returns `true` if this shape is a struct.
    #[inline]
    pub const fn is_struct(&self) -> bool {
        matches!(self.ty, Type::Struct(_))
    }

    /// Returns `true` if this shape is the given type.
    #[inline]
    pub fn is_type<T: ?Sized + 'static>(&self) -> bool {
        self.id == ConstTypeId::of::<T>()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shape {}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type_identifier", &self.type_identifier)
            .field("ty", &self.ty)
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_identifier)
    }
}

/// Const builder for [`Shape`], used by the scalar impls and the derive macro.
///
/// ```
/// use mirror_core::{ScalarType, Shape, ShapeBuilder, Type};
///
/// const SHAPE: &Shape = &const {
///     ShapeBuilder::for_sized::<u16>("u16")
///         .ty(Type::Scalar(ScalarType::U16))
///         .build()
/// };
/// assert_eq!(SHAPE.scalar_type(), Some(ScalarType::U16));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ShapeBuilder {
    shape: Shape,
}

impl ShapeBuilder {
    /// Start a shape for `T`. The type is [`Type::Opaque`] until set.
    #[inline]
    pub const fn for_sized<T: 'static>(type_identifier: &'static str) -> Self {
        Self {
            shape: Shape {
                id: ConstTypeId::of::<T>(),
                type_identifier,
                ty: Type::Opaque,
            },
        }
    }

    /// Set the storage classification.
    #[inline]
    pub const fn ty(mut self, ty: Type) -> Self {
        self.shape.ty = ty;
        self
    }

    /// Finish the shape.
    #[inline]
    pub const fn build(self) -> Shape {
        self.shape
    }
}
