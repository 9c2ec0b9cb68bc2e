use core::fmt;
use core::hash::{Hash, Hasher};

use mirror_core::Shape;

/// Correlates a field's sentinel with its entry in the field table.
///
/// Scalars are told apart by `offset`, the per-type counter value written
/// into them. Struct-typed fields always have offset 0 and are told apart by
/// `group`: the offsets of every reflected scalar below them, depth-first.
/// Two fields of the same struct type never share a leaf, so their groups differ.
#[derive(Clone)]
pub(crate) struct IdentityKey {
    shape: &'static Shape,
    offset: usize,
    group: Vec<usize>,
}

impl IdentityKey {
    pub(crate) fn scalar(shape: &'static Shape, offset: usize) -> Self {
        Self {
            shape,
            offset,
            group: Vec::new(),
        }
    }

    pub(crate) fn aggregate(shape: &'static Shape, group: Vec<usize>) -> Self {
        Self {
            shape,
            offset: 0,
            group,
        }
    }
}

impl PartialEq for IdentityKey {
    fn eq(&self, other: &Self) -> bool {
        self.shape.id == other.shape.id && self.offset == other.offset && self.group == other.group
    }
}

impl Eq for IdentityKey {}

impl Hash for IdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.id.hash(state);
        self.offset.hash(state);
        self.group.hash(state);
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.shape, self.offset)?;
        for leaf in &self.group {
            write!(f, ".{leaf}")?;
        }
        Ok(())
    }
}
