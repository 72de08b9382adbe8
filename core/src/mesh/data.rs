//! Mesh and submesh records stored in the asset graph.

use crate::error::MeshError;
use crate::material::TypedValue;
use crate::scene::SourceVertex;

use super::weld::WeldedMesh;

/// Interleavable vertex attributes of one welded mesh.
///
/// `positions[i]`, `normals[i]` and `texcoords[i]` all describe local
/// vertex `i`, so the arrays always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecord {
    name: String,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    texcoords: Option<Vec<[f32; 2]>>,
}

impl MeshRecord {
    /// Build attribute arrays from welded vertices.
    ///
    /// Positions are looked up in `source` by each vertex's source index.
    /// Texture coordinates are present when the first welded vertex has one;
    /// vertices without a UV then contribute `(0, 0)`.
    pub fn from_welded(
        name: impl Into<String>,
        welded: &WeldedMesh,
        source: &[SourceVertex],
    ) -> Result<Self, MeshError> {
        let count = welded.vertex_count();
        let has_texcoords = welded.has_texcoords();

        let mut positions = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(count);
        let mut texcoords = has_texcoords.then(|| Vec::with_capacity(count));

        for key in &welded.vertices {
            let vertex = source.get(key.source_index() as usize).ok_or(
                MeshError::UnknownSourceVertex {
                    vertex: key.source_index(),
                    count: source.len(),
                },
            )?;
            positions.push(vertex.position);
            normals.push(key.normal());
            if let Some(texcoords) = &mut texcoords {
                texcoords.push(key.uv().unwrap_or_default());
            }
        }

        Ok(Self {
            name: name.into(),
            positions,
            normals,
            texcoords,
        })
    }

    /// Mesh name, unique within an asset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertex positions, one per welded vertex.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Vertex normals, aligned with the positions.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Texture coordinates, aligned with the positions when present.
    pub fn texcoords(&self) -> Option<&[[f32; 2]]> {
        self.texcoords.as_deref()
    }

    /// Number of vertices described by the attribute arrays.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Attribute arrays as typed content: `position`, `normal` and, when
    /// present, `texcoord`.
    pub fn content(&self) -> Vec<TypedValue> {
        let mut content = vec![
            TypedValue::float3_array("position", self.positions.clone()),
            TypedValue::float3_array("normal", self.normals.clone()),
        ];
        if let Some(texcoords) = &self.texcoords {
            content.push(TypedValue::float2_array("texcoord", texcoords.clone()));
        }
        content
    }
}

/// The faces of one mesh that share a material, as an index buffer into
/// the parent mesh's attribute arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmeshRecord {
    name: String,
    mesh: String,
    indices: Vec<u32>,
    shader: String,
}

impl SubmeshRecord {
    /// Create a submesh named `<mesh>_<shader>`.
    pub fn new(mesh: impl Into<String>, shader: impl Into<String>, indices: Vec<u32>) -> Self {
        let mesh = mesh.into();
        let shader = shader.into();
        Self {
            name: format!("{mesh}_{shader}"),
            mesh,
            indices,
            shader,
        }
    }

    /// Submesh name, `<mesh>_<shader>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the parent mesh.
    pub fn mesh(&self) -> &str {
        &self.mesh
    }

    /// Triangle list into the parent mesh's vertices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Name of the shader used by the submesh.
    pub fn shader(&self) -> &str {
        &self.shader
    }

    /// Document reference to the shader (`#<name>`).
    pub fn shader_ref(&self) -> String {
        format!("#{}", self.shader)
    }

    /// Index buffer as typed content.
    pub fn content(&self) -> Vec<TypedValue> {
        vec![TypedValue::int_array("index", self.indices.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{weld, Corner, CornerFace};

    fn source() -> Vec<SourceVertex> {
        (0..4)
            .map(|i| SourceVertex {
                position: [i as f32, 0.0, 0.0],
                normal: [0.0, 0.0, 1.0],
            })
            .collect()
    }

    #[test]
    fn test_attributes_follow_welded_order() {
        let face = CornerFace {
            corners: [2u32, 0, 3]
                .iter()
                .map(|&v| Corner {
                    source_index: v,
                    normal: [0.0, 1.0, 0.0],
                    uv: Some([v as f32, 1.0]),
                })
                .collect(),
            material_index: 0,
        };
        let welded = weld(&[face], 1).unwrap();
        let record = MeshRecord::from_welded("m", &welded, &source()).unwrap();

        assert_eq!(record.positions(), &[[2.0, 0.0, 0.0], [0.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
        assert_eq!(record.normals().len(), 3);
        assert_eq!(
            record.texcoords().unwrap(),
            &[[2.0, 1.0], [0.0, 1.0], [3.0, 1.0]]
        );
        assert_eq!(record.content().len(), 3);
    }

    #[test]
    fn test_no_texcoords() {
        let face = CornerFace {
            corners: (0..3)
                .map(|v| Corner {
                    source_index: v,
                    normal: [0.0, 1.0, 0.0],
                    uv: None,
                })
                .collect(),
            material_index: 0,
        };
        let welded = weld(&[face], 1).unwrap();
        let record = MeshRecord::from_welded("m", &welded, &source()).unwrap();

        assert!(record.texcoords().is_none());
        assert_eq!(record.content().len(), 2);
    }

    #[test]
    fn test_submesh_naming() {
        let submesh = SubmeshRecord::new("Cube", "Red", vec![0, 1, 2]);
        assert_eq!(submesh.name(), "Cube_Red");
        assert_eq!(submesh.mesh(), "Cube");
        assert_eq!(submesh.shader_ref(), "#Red");
    }
}
