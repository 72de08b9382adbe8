//! Vertex welding and face triangulation.

use indexmap::IndexSet;

use super::vertex::VertexKey;

/// One face corner with its attributes already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub source_index: u32,
    pub normal: [f32; 3],
    pub uv: Option<[f32; 2]>,
}

impl Corner {
    fn key(&self) -> VertexKey {
        VertexKey::new(self.source_index, self.normal, self.uv)
    }
}

/// A polygon ready for welding: corners in winding order and a material slot.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerFace {
    pub corners: Vec<Corner>,
    pub material_index: usize,
}

/// Result of welding one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct WeldedMesh {
    /// Unique vertices in first-seen order. The position in this list is
    /// the local index used by every index buffer.
    pub vertices: Vec<VertexKey>,
    /// One triangle list per material slot.
    pub index_buffers: Vec<Vec<u32>>,
}

impl WeldedMesh {
    /// Number of unique vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the welded vertices carry texture coordinates.
    pub fn has_texcoords(&self) -> bool {
        self.vertices.first().is_some_and(|v| v.uv().is_some())
    }
}

/// Append the triangles of one polygon to `out`.
///
/// Triangles are copied as-is. A quad `[a, b, c, d]` becomes the two
/// triangles `(a, b, c)` and `(c, d, a)`, keeping the original winding.
/// Returns `false` (and appends nothing) for any other corner count.
pub fn triangulate(local: &[u32], out: &mut Vec<u32>) -> bool {
    match *local {
        [a, b, c] => {
            out.extend_from_slice(&[a, b, c]);
            true
        }
        [a, b, c, d] => {
            out.extend_from_slice(&[a, b, c, c, d, a]);
            true
        }
        _ => false,
    }
}

/// Weld the faces of one mesh into a shared vertex list and per-slot
/// triangle index buffers.
///
/// Every corner of every face is welded, so corners with equal
/// [`VertexKey`]s share one local index and the vertex list follows first
/// occurrence across all faces. Faces with an unsupported corner count or
/// a material slot outside `0..slot_count` are then logged and emit no
/// indices.
///
/// Returns `None` for a mesh without faces; the caller must not emit it.
pub fn weld(faces: &[CornerFace], slot_count: usize) -> Option<WeldedMesh> {
    if faces.is_empty() {
        return None;
    }

    let slot_count = slot_count.max(1);
    let mut unique: IndexSet<VertexKey> = IndexSet::new();
    let mut index_buffers = vec![Vec::new(); slot_count];
    let mut local = Vec::with_capacity(4);

    for (face_index, face) in faces.iter().enumerate() {
        local.clear();
        for corner in &face.corners {
            local.push(unique.insert_full(corner.key()).0 as u32);
        }

        let Some(indices) = index_buffers.get_mut(face.material_index) else {
            log::warn!(
                "Skipping face {face_index}: material slot {} out of range ({slot_count} slots)",
                face.material_index
            );
            continue;
        };
        if !triangulate(&local, indices) {
            log::warn!(
                "Skipping face {face_index}: found {} vertices, expected 3 or 4",
                local.len()
            );
        }
    }

    Some(WeldedMesh {
        vertices: unique.into_iter().collect(),
        index_buffers,
    })
}
