//! Scene snapshot data types.
//!
//! All vectors are plain arrays (`[f32; 3]`, `[f32; 2]`) so snapshots can be
//! written by hand in RON and compared exactly by the welder.

use serde::Deserialize;

use crate::error::{ExportError, ExtractError, MeshError};
use crate::mesh::{Corner, CornerFace};

/// A complete scene snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scene {
    /// Scene name, if any.
    #[serde(default)]
    pub name: Option<String>,
    /// Materials referenced by name from mesh material slots.
    #[serde(default)]
    pub materials: Vec<MaterialDescriptor>,
    /// Objects in iteration order.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Parse a scene snapshot from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ExportError> {
        ron::from_str(text).map_err(|e| ExportError::Scene(e.to_string()))
    }
}

/// Kind of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum ObjectKind {
    #[default]
    Mesh,
    Curve,
    Surface,
    Font,
    Meta,
    Empty,
    Camera,
    Lamp,
    Armature,
}

impl ObjectKind {
    /// Whether objects of this kind can be converted to polygon geometry.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            Self::Mesh | Self::Curve | Self::Surface | Self::Font | Self::Meta
        )
    }
}

/// An object in the scene.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    /// Renderable geometry of the object, already converted by the host.
    #[serde(default)]
    pub mesh: Option<SourceMesh>,
}

impl SceneObject {
    /// Get the renderable mesh of this object.
    ///
    /// Returns an error when the object carries no geometry, which the
    /// exporter reports and skips.
    pub fn extract_mesh(&self) -> Result<&SourceMesh, ExtractError> {
        self.mesh.as_ref().ok_or_else(|| ExtractError::NoMeshData {
            object: self.name.clone(),
        })
    }
}

/// A source vertex: position plus its smooth normal.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SourceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A polygon of a source mesh.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceFace {
    /// Source-vertex indices in winding order.
    pub vertices: Vec<u32>,
    /// Flat face normal, used when `smooth` is off.
    pub normal: [f32; 3],
    /// Use per-vertex normals instead of the face normal.
    #[serde(default)]
    pub smooth: bool,
    /// Material slot of the face.
    #[serde(default)]
    pub material_index: usize,
}

/// A polygon mesh as delivered by the host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceMesh {
    pub name: String,
    pub vertices: Vec<SourceVertex>,
    pub faces: Vec<SourceFace>,
    /// Material slots. `None` or an unknown name uses the default material.
    #[serde(default)]
    pub materials: Vec<Option<String>>,
    /// First UV channel: `uv_layer[face][corner]`.
    #[serde(default)]
    pub uv_layer: Option<Vec<Vec<[f32; 2]>>>,
}

impl SourceMesh {
    /// Number of index buffers the mesh produces: one per material slot,
    /// or a single default slot for meshes without materials.
    pub fn slot_count(&self) -> usize {
        self.materials.len().max(1)
    }

    /// Resolve every face into welder input.
    ///
    /// Smooth faces take the per-vertex normal, flat faces share the face
    /// normal. Corners carry a UV only when the mesh has a UV layer.
    pub fn corner_faces(&self) -> Result<Vec<CornerFace>, MeshError> {
        let mut faces = Vec::with_capacity(self.faces.len());

        for (face_index, face) in self.faces.iter().enumerate() {
            let uvs = match &self.uv_layer {
                Some(layer) => Some(layer.get(face_index).ok_or(MeshError::MissingUv {
                    face: face_index,
                    corner: 0,
                })?),
                None => None,
            };

            let mut corners = Vec::with_capacity(face.vertices.len());
            for (corner_index, &vertex) in face.vertices.iter().enumerate() {
                let source = self.vertices.get(vertex as usize).ok_or(
                    MeshError::VertexOutOfRange {
                        face: face_index,
                        vertex,
                        count: self.vertices.len(),
                    },
                )?;

                let uv = match uvs {
                    Some(uvs) => Some(*uvs.get(corner_index).ok_or(MeshError::MissingUv {
                        face: face_index,
                        corner: corner_index,
                    })?),
                    None => None,
                };

                corners.push(Corner {
                    source_index: vertex,
                    normal: if face.smooth {
                        source.normal
                    } else {
                        face.normal
                    },
                    uv,
                });
            }

            faces.push(CornerFace {
                corners,
                material_index: face.material_index,
            });
        }

        Ok(faces)
    }
}

/// Shading parameters and texture slots of a material.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaterialDescriptor {
    pub name: String,
    pub diffuse_color: [f32; 3],
    pub diffuse_intensity: f32,
    pub specular_color: [f32; 3],
    pub specular_intensity: f32,
    pub specular_hardness: f32,
    pub ambient: f32,
    /// Texture slots in declaration order; `None` is an empty slot.
    #[serde(default)]
    pub texture_slots: Vec<Option<TextureSlot>>,
}

/// How a texture slot maps coordinates onto the surface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum TextureCoords {
    #[default]
    Uv,
    Generated,
    Normal,
    Object,
    Global,
    Window,
    Reflection,
    Other(String),
}

/// A texture slot of a material.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextureSlot {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// The slot affects the diffuse color channel.
    #[serde(default)]
    pub use_map_color_diffuse: bool,
    /// Blend factor of the diffuse color influence.
    #[serde(default)]
    pub diffuse_color_factor: f32,
    #[serde(default)]
    pub texture_coords: TextureCoords,
    pub texture: Texture,
}

fn default_true() -> bool {
    true
}

/// Kind of texture referenced by a slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum TextureKind {
    #[default]
    Image,
    Clouds,
    Noise,
    EnvironmentMap,
    Other(String),
}

/// A texture datablock.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Texture {
    #[serde(default)]
    pub kind: TextureKind,
    #[serde(default)]
    pub image: Option<Image>,
}

/// Where an image's pixels come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ImageSource {
    #[default]
    File,
    Video,
    Sequence,
    Generated,
    Viewer,
}

impl ImageSource {
    /// Whether the exporter can reference images of this source.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::File | Self::Video)
    }
}

/// An image used by a texture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub name: String,
    #[serde(default)]
    pub source: ImageSource,
    /// File path, possibly `//`-relative to the scene file.
    #[serde(default)]
    pub filepath: String,
    /// Image file bytes packed into the scene.
    #[serde(default)]
    pub packed_data: Option<Vec<u8>>,
}
