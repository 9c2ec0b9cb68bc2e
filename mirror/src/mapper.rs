//! The field mapper: reflect a struct once, then resolve field reads.

use core::any::TypeId;
use std::collections::HashMap;

use mirror_core::{Field, Reflect, Shape, StructType, Type};

use crate::key::IdentityKey;
use crate::{ReflectError, sentinel};
#[cfg(feature = "tracing")]
use crate::{debug, trace};

/// One reflected field, as recorded by [`Mirror::reflect`].
#[derive(Clone, Copy, Debug)]
pub struct FieldInfo {
    /// The field's static description.
    pub field: &'static Field,

    /// Index of the enclosing struct-typed field in [`Mirror::fields`], or
    /// `None` for a field of the reflected struct itself.
    pub parent: Option<usize>,

    /// Index of this field in [`Mirror::fields`].
    pub index: usize,
}

impl FieldInfo {
    /// Declared name of the field.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    /// Declared type, as written in the source.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.field.type_name
    }

    /// Shape of the declared type.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.field.shape
    }

    /// Returns `true` for fields of the reflected struct itself.
    #[inline]
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

impl PartialEq for FieldInfo {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.parent == other.parent
            && core::ptr::eq(self.field, other.field)
    }
}

impl Eq for FieldInfo {}

/// Maps sentinel values back to the fields they were written into.
///
/// A mirror holds the field table of one reflected struct at a time: every
/// call to [`reflect`](Self::reflect) replaces it. Lookups only resolve
/// values read from that latest instance.
///
/// ```
/// use mirror::{Mirror, Reflect};
///
/// #[derive(Reflect, Default)]
/// pub struct StreetAddress {
///     pub number: i32,
///     pub street: String,
///     pub postcode: i32,
/// }
///
/// let mut mirror = Mirror::new();
/// let mut address = StreetAddress::default();
/// mirror.reflect(&mut address)?;
///
/// assert_eq!(mirror.field(&address.postcode)?.name(), "postcode");
/// assert_eq!(mirror.field(&address.street)?.name(), "street");
/// # Ok::<(), mirror::ReflectError>(())
/// ```
#[derive(Default)]
pub struct Mirror {
    /// Every reflected field in depth-first pre-order.
    fields: Vec<FieldInfo>,

    /// Identity of each field to its index in `fields`.
    lookup: HashMap<IdentityKey, usize>,

    /// Next unused offset per declared type.
    counters: HashMap<TypeId, usize>,

    /// The most recently reflected struct.
    root: Option<&'static Shape>,
}

impl Mirror {
    /// Create an empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every reflected field of `value` with a sentinel and record
    /// what each sentinel means, replacing whatever was reflected before.
    ///
    /// Fields are visited in declaration order, depth-first into
    /// struct-typed fields. Ignored and private fields are left untouched.
    ///
    /// On error the mirror is left empty; `value` may be partially overwritten.
    pub fn reflect<T: Reflect>(&mut self, value: &mut T) -> Result<(), ReflectError> {
        let shape = T::SHAPE;
        let Some(st) = shape.struct_type() else {
            return Err(ReflectError::NotAStruct { shape });
        };

        self.clear();
        let base = (value as *mut T).cast::<u8>();

        // SAFETY: `base` points to a live, exclusively borrowed `T`, and
        // `T::SHAPE` describes its layout (guaranteed by `Reflect`).
        match unsafe { self.encode_struct(st, base, None) } {
            Ok(_) => {
                self.root = Some(shape);
                debug!(
                    "reflected {} fields of {}",
                    self.fields.len(),
                    shape.type_identifier
                );
                Ok(())
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    /// Reflect a fresh `T::default()` and hand it back as a selector template.
    pub fn template<T: Reflect + Default>(&mut self) -> Result<T, ReflectError> {
        let mut value = T::default();
        self.reflect(&mut value)?;
        Ok(value)
    }

    /// The field `value` was read from.
    ///
    /// `value` must come from the instance most recently passed to
    /// [`reflect`](Self::reflect), read after that call. A value that does not
    /// match any recorded sentinel is an [`ReflectError::UnknownField`]; a value
    /// that happens to match one (a stale or hand-written sentinel, or a
    /// `String` that is not a number, which reads as sentinel `0`) resolves
    /// to that field.
    pub fn field<F: Reflect>(&self, value: &F) -> Result<&FieldInfo, ReflectError> {
        let shape = F::SHAPE;
        // SAFETY: the pointer comes from a live `&F` and `F::SHAPE` describes `F`.
        let key = unsafe { decode_key(shape, (value as *const F).cast::<u8>())? };
        self.lookup
            .get(&key)
            .and_then(|&index| self.fields.get(index))
            .ok_or(ReflectError::UnknownField { shape })
    }

    /// The path of the field `value` was read from, rooted at the reflected
    /// struct: `.customer.email`. See [`field`](Self::field) for which values resolve.
    pub fn path<F: Reflect>(&self, value: &F) -> Result<String, ReflectError> {
        let info = self.field(value)?;
        Ok(self.path_of(info))
    }

    /// Render the path of a recorded field.
    pub fn path_of(&self, info: &FieldInfo) -> String {
        let mut names: Vec<&str> = self.ancestry(info).map(FieldInfo::name).collect();
        names.reverse();

        let mut path = String::new();
        for name in names {
            path.push('.');
            path.push_str(name);
        }
        path
    }

    /// Find a recorded field by its rendered path (`.customer.email`).
    pub fn field_at_path(&self, path: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|info| self.path_of(info) == path)
    }

    /// The enclosing struct-typed field, if any.
    pub fn parent(&self, info: &FieldInfo) -> Option<&FieldInfo> {
        info.parent.and_then(|index| self.fields.get(index))
    }

    /// `info` followed by each enclosing field, up to a top-level field.
    pub fn ancestry<'a>(&'a self, info: &'a FieldInfo) -> impl Iterator<Item = &'a FieldInfo> {
        core::iter::successors(Some(info), move |current| self.parent(current))
    }

    /// Every recorded field, parents before their children.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Shape of the most recently reflected struct.
    pub fn root(&self) -> Option<&'static Shape> {
        self.root
    }

    /// Number of recorded fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if nothing has been reflected, or the last reflect failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn clear(&mut self) {
        self.fields.clear();
        self.lookup.clear();
        self.counters.clear();
        self.root = None;
    }

    /// Encode every reflected field of one struct level and return the
    /// offsets of all scalars written below it, in visiting order.
    ///
    /// # Safety
    ///
    /// `base` must point to a live, writable value described by `st`.
    unsafe fn encode_struct(
        &mut self,
        st: &StructType,
        base: *mut u8,
        parent: Option<usize>,
    ) -> Result<Vec<usize>, ReflectError> {
        let mut group = Vec::new();

        for field in st.reflected_fields() {
            let index = self.fields.len();
            self.fields.push(FieldInfo {
                field,
                parent,
                index,
            });

            let shape = field.shape();
            let counter = self.counters.entry(shape.id.get()).or_insert(0);
            let offset = *counter;
            *counter += 1;

            // SAFETY: the offset comes from `offset_of!` on the struct `base` points to.
            let ptr = unsafe { base.add(field.offset) };

            let key = match shape.ty {
                Type::Scalar(scalar) => {
                    if !sentinel::supports(scalar) {
                        return Err(ReflectError::UnsupportedFieldType {
                            field: field.name,
                            shape,
                        });
                    }
                    if !scalar.fits(offset) {
                        return Err(ReflectError::CapacityExceeded {
                            field: field.name,
                            shape,
                            capacity: scalar.capacity().unwrap_or(u128::MAX),
                        });
                    }
                    // SAFETY: the field's shape says it stores `scalar`.
                    unsafe { sentinel::write(ptr, scalar, offset) };
                    group.push(offset);
                    IdentityKey::scalar(shape, offset)
                }
                Type::Struct(inner) => {
                    // SAFETY: the field's shape says it is this struct.
                    let children = unsafe { self.encode_struct(&inner, ptr, Some(index))? };
                    group.extend_from_slice(&children);
                    let key = IdentityKey::aggregate(shape, children);
                    // With no leaves, the group cannot tell two fields of this type apart.
                    if self.lookup.contains_key(&key) {
                        return Err(ReflectError::EmptyStruct {
                            field: field.name,
                            shape,
                        });
                    }
                    key
                }
                Type::Opaque => {
                    return Err(ReflectError::UnsupportedFieldType {
                        field: field.name,
                        shape,
                    });
                }
            };

            trace!("field #{} {} -> {}", index, field.name, key);
            let previous = self.lookup.insert(key, index);
            debug_assert!(previous.is_none(), "identity of `{}` collided", field.name);
        }

        Ok(group)
    }
}

/// Read the identity key out of a value.
///
/// # Safety
///
/// `ptr` must point to a live value described by `shape`.
unsafe fn decode_key(shape: &'static Shape, ptr: *const u8) -> Result<IdentityKey, ReflectError> {
    match shape.ty {
        Type::Scalar(scalar) if sentinel::supports(scalar) => {
            // SAFETY: forwarded from the caller.
            Ok(IdentityKey::scalar(shape, unsafe { sentinel::read(ptr, scalar) }))
        }
        Type::Struct(st) => {
            let mut group = Vec::new();
            // SAFETY: forwarded from the caller.
            unsafe { decode_group(&st, ptr, &mut group)? };
            Ok(IdentityKey::aggregate(shape, group))
        }
        _ => Err(ReflectError::UnsupportedValue { shape }),
    }
}

/// Collect the offsets of every reflected scalar below a struct, in the
/// order [`Mirror::encode_struct`] wrote them.
///
/// # Safety
///
/// `base` must point to a live value described by `st`.
unsafe fn decode_group(
    st: &StructType,
    base: *const u8,
    group: &mut Vec<usize>,
) -> Result<(), ReflectError> {
    for field in st.reflected_fields() {
        let shape = field.shape();
        // SAFETY: the offset comes from `offset_of!` on the struct `base` points to.
        let ptr = unsafe { base.add(field.offset) };
        match shape.ty {
            Type::Scalar(scalar) if sentinel::supports(scalar) => {
                // SAFETY: the field's shape says it stores `scalar`.
                group.push(unsafe { sentinel::read(ptr, scalar) });
            }
            // SAFETY: the field's shape says it is this struct.
            Type::Struct(inner) => unsafe { decode_group(&inner, ptr, group)? },
            _ => return Err(ReflectError::UnsupportedValue { shape }),
        }
    }
    Ok(())
}
