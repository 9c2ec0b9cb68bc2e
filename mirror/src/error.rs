use mirror_core::Shape;

/// Errors raised by [`Mirror`](crate::Mirror).
///
/// All of them are programmer errors: retrying the same call fails the same way.
#[derive(Debug, Clone)]
pub enum ReflectError {
    /// [`Mirror::reflect`](crate::Mirror::reflect) was handed something that is not a struct.
    NotAStruct {
        /// The shape that was passed.
        shape: &'static Shape,
    },

    /// A visited field's type cannot carry a sentinel.
    UnsupportedFieldType {
        /// Name of the offending field.
        field: &'static str,
        /// Its shape.
        shape: &'static Shape,
    },

    /// More fields of one type than that type can tell apart.
    CapacityExceeded {
        /// Name of the first field that did not fit.
        field: &'static str,
        /// The shared field type.
        shape: &'static Shape,
        /// How many fields of this type one reflect supports.
        capacity: u128,
    },

    /// A second struct-typed field without any reflected field of its own,
    /// of a type already seen empty: both would share one identity.
    EmptyStruct {
        /// Name of the field.
        field: &'static str,
        /// Its shape.
        shape: &'static Shape,
    },

    /// A value handed to a lookup has a type that never carries a sentinel.
    UnsupportedValue {
        /// The value's shape.
        shape: &'static Shape,
    },

    /// A value handed to a lookup does not match any field of the most
    /// recent reflect.
    UnknownField {
        /// The value's shape.
        shape: &'static Shape,
    },
}

impl core::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectError::NotAStruct { shape } => {
                write!(f, "mirror: reflect must be passed a struct, got `{shape}`")
            }
            ReflectError::UnsupportedFieldType { field, shape } => write!(
                f,
                "mirror: unsupported field type `{shape}` on field `{field}`, \
                 ignore it with #[mirror(ignore)]"
            ),
            ReflectError::CapacityExceeded {
                field,
                shape,
                capacity,
            } => write!(
                f,
                "mirror: only {capacity} fields of type `{shape}` can be reflected, \
                 ignore `{field}` or any other additional one with #[mirror(ignore)]"
            ),
            ReflectError::EmptyStruct { field, shape } => write!(
                f,
                "mirror: field `{field}` of type `{shape}` has no reflected fields \
                 and another one of that type was already reflected, \
                 ignore it with #[mirror(ignore)]"
            ),
            ReflectError::UnsupportedValue { shape } => {
                write!(f, "mirror: values of type `{shape}` never identify a field")
            }
            ReflectError::UnknownField { shape } => write!(
                f,
                "mirror: `{shape}` value was not read from the most recently reflected struct"
            ),
        }
    }
}

impl core::error::Error for ReflectError {}
