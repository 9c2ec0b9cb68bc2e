use crate::Field;

/// Field table of a struct.
#[derive(Clone, Copy, Debug)]
pub struct StructType {
    /// the kind of struct
    pub kind: StructKind,

    /// all fields, in declaration order (not necessarily in memory order),
    /// including ignored and private ones
    pub fields: &'static [Field],
}

impl StructType {
    /// Create a struct type.
    #[inline]
    pub const fn new(kind: StructKind, fields: &'static [Field]) -> Self {
        Self { kind, fields }
    }

    /// Iterate over the fields reflect visits, in declaration order.
    pub fn reflected_fields(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter().filter(|field| field.is_reflected())
    }

    /// Look a field up by its declared name.
    pub fn field_by_name(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Describes the kind of struct
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StructKind {
    /// struct UnitStruct;
    Unit,

    /// struct TupleStruct(T0, T1);
    TupleStruct,

    /// struct S { foo: T0, bar: T1 }
    Struct,
}
