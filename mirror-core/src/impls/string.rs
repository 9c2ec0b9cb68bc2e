use alloc::string::String;

use crate::{Reflect, ScalarType, Shape, ShapeBuilder, Type};

unsafe impl Reflect for String {
    const SHAPE: &'static Shape = &const {
        ShapeBuilder::for_sized::<String>("String")
            .ty(Type::Scalar(ScalarType::String))
            .build()
    };
}
