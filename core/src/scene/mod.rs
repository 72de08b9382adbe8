//! Source scene snapshot.
//!
//! Plain serde-deserializable data describing what a host 3D application
//! hands to the exporter: objects, polygon meshes with per-face materials
//! and UVs, and material descriptors with their texture slots.

mod types;

pub use types::{
    Image, ImageSource, MaterialDescriptor, ObjectKind, Scene, SceneObject, SourceFace,
    SourceMesh, SourceVertex, Texture, TextureCoords, TextureKind, TextureSlot,
};
