//! Indexed geometry built from polygon meshes.
//!
//! - [`VertexKey`] - Identity of a welded vertex (source index, normal, UV)
//! - [`weld`] - Deduplicates face corners into one shared vertex list plus
//!   one triangle index buffer per material slot
//! - [`triangulate`] - Fan rule used for triangles and quads
//! - [`MeshRecord`] / [`SubmeshRecord`] - Attribute arrays and per-material
//!   index buffers as they are written to the asset document

mod data;
mod vertex;
mod weld;

pub use data::{MeshRecord, SubmeshRecord};
pub use vertex::VertexKey;
pub use weld::{triangulate, weld, Corner, CornerFace, WeldedMesh};
