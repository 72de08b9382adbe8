//! The asset graph: welded meshes and their per-material submeshes.

use indexmap::IndexMap;

use crate::error::MeshError;
use crate::mesh::{MeshRecord, SubmeshRecord, WeldedMesh};
use crate::scene::SourceVertex;

/// All geometry of one export.
///
/// Meshes are unique by name and kept in insertion order; submeshes are
/// kept in creation order. Every submesh index is smaller than the vertex
/// count of the mesh it includes.
#[derive(Debug, Default)]
pub struct AssetGraph {
    meshes: IndexMap<String, MeshRecord>,
    submeshes: Vec<SubmeshRecord>,
}

impl AssetGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a welded mesh and one submesh per non-empty material slot.
    ///
    /// `shader_for_slot` is called once for every slot that received
    /// triangles, in slot order, and returns the name of the shader the
    /// submesh uses. Returns the number of submeshes created.
    pub fn add_mesh(
        &mut self,
        name: &str,
        welded: &WeldedMesh,
        source: &[SourceVertex],
        mut shader_for_slot: impl FnMut(usize) -> String,
    ) -> Result<usize, MeshError> {
        if self.meshes.contains_key(name) {
            return Err(MeshError::DuplicateName(name.to_string()));
        }
        let record = MeshRecord::from_welded(name, welded, source)?;
        self.meshes.insert(name.to_string(), record);

        let before = self.submeshes.len();
        for (slot, indices) in welded.index_buffers.iter().enumerate() {
            if indices.is_empty() {
                continue;
            }
            let shader = shader_for_slot(slot);
            self.submeshes
                .push(SubmeshRecord::new(name, shader, indices.clone()));
        }

        Ok(self.submeshes.len() - before)
    }

    /// Whether a mesh with this name was already added.
    pub fn contains_mesh(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    /// Look up a mesh by name.
    pub fn mesh(&self, name: &str) -> Option<&MeshRecord> {
        self.meshes.get(name)
    }

    /// Meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = &MeshRecord> {
        self.meshes.values()
    }

    /// Submeshes in creation order.
    pub fn submeshes(&self) -> &[SubmeshRecord] {
        &self.submeshes
    }

    /// Whether no mesh was added.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
