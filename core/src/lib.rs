//! # XML3D Asset Export Core
//!
//! Converts polygon meshes with per-face materials and UVs into indexed
//! geometry and writes it, together with the material shaders, as an
//! XML3D asset document.
//!
//! The pipeline for one export:
//!
//! 1. [`scene`] - the source snapshot handed over by the host application
//! 2. [`mesh`] - faces are triangulated and their corners welded into one
//!    shared vertex list plus an index buffer per material slot
//! 3. [`asset`] - welded meshes and submeshes are collected in the
//!    [`AssetGraph`](asset::AssetGraph), while [`material`] turns the used
//!    materials into shader records, resolving textures through [`texture`]
//! 4. [`xml3d`] - the graph and the shaders are written as one document
//!
//! [`exporter::AssetExporter`] drives all steps.

pub mod asset;
pub mod config;
pub mod error;
pub mod exporter;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod texture;
pub mod xml3d;

pub use config::{ExportConfig, PathMode};
pub use error::{ExportError, ExtractError, MeshError};
pub use exporter::AssetExporter;
pub use xml3d::ExportStats;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
