#![no_std]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod bitflags;

mod typeid;
pub use typeid::*;

mod shape;
pub use shape::*;

mod scalar;
pub use scalar::*;

mod field;
pub use field::*;

mod struct_;
pub use struct_::*;

mod impls;

/// Allows a type to take part in mirror reflection.
///
/// # Safety
///
/// `SHAPE` must describe `Self` exactly: a [`Type::Scalar`] shape must name
/// the scalar `Self` actually is, and every [`Field`] of a [`Type::Struct`]
/// shape must carry the real byte offset of that field and, unless the field
/// is ignored or private, the shape of its declared type. The mapper reads
/// and writes through these offsets without further checks.
///
/// Use `#[derive(Reflect)]` rather than implementing this by hand.
pub unsafe trait Reflect: 'static {
    /// Static description of this type.
    const SHAPE: &'static Shape;
}
