use num_complex::Complex;

use crate::{Reflect, ScalarType, Shape, ShapeBuilder, Type};

unsafe impl Reflect for Complex<f32> {
    const SHAPE: &'static Shape = &const {
        ShapeBuilder::for_sized::<Complex<f32>>("Complex<f32>")
            .ty(Type::Scalar(ScalarType::Complex32))
            .build()
    };
}

unsafe impl Reflect for Complex<f64> {
    const SHAPE: &'static Shape = &const {
        ShapeBuilder::for_sized::<Complex<f64>>("Complex<f64>")
            .ty(Type::Scalar(ScalarType::Complex64))
            .build()
    };
}
