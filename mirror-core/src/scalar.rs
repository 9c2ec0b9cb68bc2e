//! Scalar storage types that can carry a sentinel.

use core::fmt;

/// Every leaf type a reflected field can be stored as.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ScalarType {
    /// Primitive type `bool`.
    Bool,
    /// Primitive type `i8`.
    I8,
    /// Primitive type `i16`.
    I16,
    /// Primitive type `i32`.
    I32,
    /// Primitive type `i64`.
    I64,
    /// Primitive type `i128`.
    I128,
    /// Primitive type `isize`.
    ISize,
    /// Primitive type `u8`.
    U8,
    /// Primitive type `u16`.
    U16,
    /// Primitive type `u32`.
    U32,
    /// Primitive type `u64`.
    U64,
    /// Primitive type `u128`.
    U128,
    /// Primitive type `usize`.
    USize,
    /// Primitive type `f32`.
    F32,
    /// Primitive type `f64`.
    F64,
    /// `num_complex::Complex<f32>`.
    Complex32,
    /// `num_complex::Complex<f64>`.
    Complex64,
    /// `alloc::string::String`.
    String,
}

/// Storage family of a [`ScalarType`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StorageKind {
    /// `bool`
    Boolean,
    /// `i8` through `isize`
    Signed,
    /// `u8` through `usize`
    Unsigned,
    /// `f32`, `f64`
    Float,
    /// complex numbers, sentinel lives in the real part
    Complex,
    /// `String`, sentinel is the decimal rendering
    Text,
}

impl ScalarType {
    /// The storage family this scalar belongs to.
    pub const fn storage_kind(self) -> StorageKind {
        match self {
            ScalarType::Bool => StorageKind::Boolean,
            ScalarType::I8
            | ScalarType::I16
            | ScalarType::I32
            | ScalarType::I64
            | ScalarType::I128
            | ScalarType::ISize => StorageKind::Signed,
            ScalarType::U8
            | ScalarType::U16
            | ScalarType::U32
            | ScalarType::U64
            | ScalarType::U128
            | ScalarType::USize => StorageKind::Unsigned,
            ScalarType::F32 | ScalarType::F64 => StorageKind::Float,
            ScalarType::Complex32 | ScalarType::Complex64 => StorageKind::Complex,
            ScalarType::String => StorageKind::Text,
        }
    }

    /// How many distinct fields of this type a single reflect can tell apart,
    /// or `None` if the bound is beyond any realistic struct.
    ///
    /// `i8` uses its whole range (offsets are stored shifted by -128), other
    /// signed types only their non-negative half. Floats stop where integers
    /// are no longer exactly representable.
    pub const fn capacity(self) -> Option<u128> {
        match self {
            ScalarType::Bool => Some(2),
            ScalarType::I8 | ScalarType::U8 => Some(1 << 8),
            ScalarType::I16 => Some(1 << 15),
            ScalarType::U16 => Some(1 << 16),
            ScalarType::I32 => Some(1 << 31),
            ScalarType::U32 => Some(1 << 32),
            ScalarType::I64 => Some(1 << 63),
            ScalarType::U64 => Some(1 << 64),
            ScalarType::I128 => Some(1 << 127),
            ScalarType::ISize => Some(isize::MAX as u128 + 1),
            ScalarType::USize => Some(usize::MAX as u128 + 1),
            ScalarType::F32 | ScalarType::Complex32 => Some((1 << f32::MANTISSA_DIGITS) + 1),
            ScalarType::F64 | ScalarType::Complex64 => Some((1 << f64::MANTISSA_DIGITS) + 1),
            ScalarType::U128 | ScalarType::String => None,
        }
    }

    /// Returns `true` if `offset` can be stored in this scalar and read back.
    #[inline]
    pub fn fits(self, offset: usize) -> bool {
        self.capacity()
            .is_none_or(|capacity| (offset as u128) < capacity)
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageKind::Boolean => "boolean",
            StorageKind::Signed => "signed integer",
            StorageKind::Unsigned => "unsigned integer",
            StorageKind::Float => "floating point",
            StorageKind::Complex => "complex",
            StorageKind::Text => "text",
        })
    }
}
