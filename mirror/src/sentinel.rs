//! Writing and reading sentinel offsets in scalar storage.

use mirror_core::{ScalarType, StorageKind};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Returns `true` if this build can write and read `scalar`.
pub(crate) const fn supports(scalar: ScalarType) -> bool {
    cfg!(feature = "complex") || !matches!(scalar.storage_kind(), StorageKind::Complex)
}

/// Overwrite the scalar at `ptr` with the sentinel for `offset`.
///
/// # Safety
///
/// `ptr` must point to an initialized, writable value of the type `scalar`
/// names. `offset` must fit (`scalar.fits(offset)`) and `supports(scalar)`
/// must hold.
pub(crate) unsafe fn write(ptr: *mut u8, scalar: ScalarType, offset: usize) {
    // Casts below are lossless: `offset` was checked against the capacity.
    unsafe {
        match scalar {
            ScalarType::Bool => *ptr.cast::<bool>() = offset == 1,
            // i8 spends its negative half too.
            ScalarType::I8 => *ptr.cast::<i8>() = (offset as i16 - 128) as i8,
            ScalarType::I16 => *ptr.cast::<i16>() = offset as i16,
            ScalarType::I32 => *ptr.cast::<i32>() = offset as i32,
            ScalarType::I64 => *ptr.cast::<i64>() = offset as i64,
            ScalarType::I128 => *ptr.cast::<i128>() = offset as i128,
            ScalarType::ISize => *ptr.cast::<isize>() = offset as isize,
            ScalarType::U8 => *ptr.cast::<u8>() = offset as u8,
            ScalarType::U16 => *ptr.cast::<u16>() = offset as u16,
            ScalarType::U32 => *ptr.cast::<u32>() = offset as u32,
            ScalarType::U64 => *ptr.cast::<u64>() = offset as u64,
            ScalarType::U128 => *ptr.cast::<u128>() = offset as u128,
            ScalarType::USize => *ptr.cast::<usize>() = offset,
            ScalarType::F32 => *ptr.cast::<f32>() = offset as f32,
            ScalarType::F64 => *ptr.cast::<f64>() = offset as f64,
            #[cfg(feature = "complex")]
            ScalarType::Complex32 => *ptr.cast::<Complex<f32>>() = Complex::new(offset as f32, 0.0),
            #[cfg(feature = "complex")]
            ScalarType::Complex64 => *ptr.cast::<Complex<f64>>() = Complex::new(offset as f64, 0.0),
            #[cfg(not(feature = "complex"))]
            ScalarType::Complex32 | ScalarType::Complex64 => {}
            // Assignment drops the previous string.
            ScalarType::String => *ptr.cast::<String>() = offset.to_string(),
        }
    }
}

/// Read the sentinel offset back from the scalar at `ptr`.
///
/// Values that no reflect could have written map to an offset that is
/// either out of range or, for text that is not a decimal number, `0`.
///
/// # Safety
///
/// `ptr` must point to an initialized value of the type `scalar` names and
/// `supports(scalar)` must hold.
pub(crate) unsafe fn read(ptr: *const u8, scalar: ScalarType) -> usize {
    fn clamp<T: TryInto<usize>>(value: T) -> usize {
        value.try_into().unwrap_or(usize::MAX)
    }

    unsafe {
        match scalar {
            ScalarType::Bool => usize::from(*ptr.cast::<bool>()),
            ScalarType::I8 => clamp(i16::from(*ptr.cast::<i8>()) + 128),
            ScalarType::I16 => clamp(*ptr.cast::<i16>()),
            ScalarType::I32 => clamp(*ptr.cast::<i32>()),
            ScalarType::I64 => clamp(*ptr.cast::<i64>()),
            ScalarType::I128 => clamp(*ptr.cast::<i128>()),
            ScalarType::ISize => clamp(*ptr.cast::<isize>()),
            ScalarType::U8 => usize::from(*ptr.cast::<u8>()),
            ScalarType::U16 => usize::from(*ptr.cast::<u16>()),
            ScalarType::U32 => clamp(*ptr.cast::<u32>()),
            ScalarType::U64 => clamp(*ptr.cast::<u64>()),
            ScalarType::U128 => clamp(*ptr.cast::<u128>()),
            ScalarType::USize => *ptr.cast::<usize>(),
            ScalarType::F32 => *ptr.cast::<f32>() as usize,
            ScalarType::F64 => *ptr.cast::<f64>() as usize,
            #[cfg(feature = "complex")]
            ScalarType::Complex32 => (*ptr.cast::<Complex<f32>>()).re as usize,
            #[cfg(feature = "complex")]
            ScalarType::Complex64 => (*ptr.cast::<Complex<f64>>()).re as usize,
            #[cfg(not(feature = "complex"))]
            ScalarType::Complex32 | ScalarType::Complex64 => usize::MAX,
            ScalarType::String => (*ptr.cast::<String>()).parse().unwrap_or(0),
        }
    }
}
