mod scalar;

mod string;

mod opaque;

#[cfg(feature = "complex")]
mod complex;
