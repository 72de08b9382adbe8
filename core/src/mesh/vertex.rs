//! Welding key for mesh vertices.

use std::hash::{Hash, Hasher};

/// Identity of a welded vertex.
///
/// Two keys are equal when the source-vertex index, the normal and the
/// optional UV are all equal component by component. There is no tolerance:
/// values are compared exactly as produced by the host, except that `0.0`
/// and `-0.0` compare equal.
#[derive(Debug, Clone, Copy)]
pub struct VertexKey {
    source_index: u32,
    normal: [f32; 3],
    uv: Option<[f32; 2]>,
}

impl VertexKey {
    /// Create a key from a corner's source vertex, normal and UV.
    pub fn new(source_index: u32, normal: [f32; 3], uv: Option<[f32; 2]>) -> Self {
        Self {
            source_index,
            normal,
            uv,
        }
    }

    /// Index of the source vertex providing the position.
    pub fn source_index(&self) -> u32 {
        self.source_index
    }

    /// Normal of the corner, face or vertex normal depending on smoothing.
    pub fn normal(&self) -> [f32; 3] {
        self.normal
    }

    /// Texture coordinate, when the mesh has a UV layer.
    pub fn uv(&self) -> Option<[f32; 2]> {
        self.uv
    }

    fn bits(&self) -> (u32, [u32; 3], Option<[u32; 2]>) {
        (
            self.source_index,
            self.normal.map(canonical_bits),
            self.uv.map(|uv| uv.map(canonical_bits)),
        )
    }
}

/// Bit pattern used for equality and hashing; folds `-0.0` onto `0.0`.
fn canonical_bits(value: f32) -> u32 {
    if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

impl PartialEq for VertexKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for VertexKey {}

impl Hash for VertexKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}
