use crate::{Reflect, ScalarType, Shape, ShapeBuilder, Type};

macro_rules! impl_reflect_for_scalar {
    ($($ty:ty => $scalar:ident),* $(,)?) => {
        $(
            unsafe impl Reflect for $ty {
                const SHAPE: &'static Shape = &const {
                    ShapeBuilder::for_sized::<$ty>(stringify!($ty))
                        .ty(Type::Scalar(ScalarType::$scalar))
                        .build()
                };
            }
        )*
    };
}

impl_reflect_for_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => ISize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => USize,
    f32 => F32,
    f64 => F64,
}
