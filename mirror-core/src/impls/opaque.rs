//! Types mirror knows by name but cannot write a sentinel into.
//!
//! They may appear in a derived struct; reflecting one without
//! `#[mirror(ignore)]` reports an unsupported field type.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::time::Duration;

use crate::{Reflect, Shape, ShapeBuilder};

macro_rules! impl_reflect_opaque {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            unsafe impl Reflect for $ty {
                const SHAPE: &'static Shape =
                    &const { ShapeBuilder::for_sized::<$ty>($name).build() };
            }
        )*
    };
}

impl_reflect_opaque! {
    () => "()",
    char => "char",
    &'static str => "&str",
    Duration => "Duration",
}

unsafe impl<T: 'static> Reflect for Vec<T> {
    const SHAPE: &'static Shape = &const { ShapeBuilder::for_sized::<Vec<T>>("Vec").build() };
}

unsafe impl<T: 'static> Reflect for Option<T> {
    const SHAPE: &'static Shape = &const { ShapeBuilder::for_sized::<Option<T>>("Option").build() };
}

unsafe impl<T: 'static> Reflect for Box<T> {
    const SHAPE: &'static Shape = &const { ShapeBuilder::for_sized::<Box<T>>("Box").build() };
}
