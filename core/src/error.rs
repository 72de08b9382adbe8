//! Error types for asset export.

use std::fmt;
use std::path::PathBuf;

/// Errors that abort an export or one of its outer steps.
///
/// Unsupported geometry and unsupported material features are not errors:
/// they are logged and the offending face, mesh or texture is dropped.
#[derive(Debug)]
pub enum ExportError {
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// The XML emitter failed while writing the document.
    Xml(xmltree::Error),
    /// A configuration file could not be read or parsed.
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Human-readable parser message.
        message: String,
    },
    /// A scene snapshot could not be parsed.
    Scene(String),
    /// A texture could not be turned into a source URI.
    Texture(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Xml(err) => write!(f, "XML write error: {err}"),
            Self::Config { path, message } => {
                write!(f, "invalid config {}: {message}", path.display())
            }
            Self::Scene(msg) => write!(f, "scene error: {msg}"),
            Self::Texture(msg) => write!(f, "texture error: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Xml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<xmltree::Error> for ExportError {
    fn from(err: xmltree::Error) -> Self {
        Self::Xml(err)
    }
}

/// Structural problems in a source mesh. The mesh is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A face references a vertex past the end of the vertex list.
    VertexOutOfRange {
        /// Face index in the mesh.
        face: usize,
        /// Offending vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        count: usize,
    },
    /// A mesh with the same name is already part of the asset.
    DuplicateName(String),
    /// A welded vertex points past the end of the source vertex list.
    UnknownSourceVertex {
        /// Offending source-vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        count: usize,
    },
    /// The UV layer has no coordinate for a face corner.
    MissingUv {
        /// Face index in the mesh.
        face: usize,
        /// Corner index within the face.
        corner: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VertexOutOfRange { face, vertex, count } => write!(
                f,
                "face {face} references vertex {vertex} but the mesh has {count} vertices"
            ),
            Self::DuplicateName(name) => write!(f, "mesh '{name}' was already exported"),
            Self::UnknownSourceVertex { vertex, count } => write!(
                f,
                "welded vertex refers to source vertex {vertex} but the mesh has {count} vertices"
            ),
            Self::MissingUv { face, corner } => {
                write!(f, "UV layer has no coordinate for face {face} corner {corner}")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Failure to obtain renderable geometry from a scene object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The object has a geometry kind but carries no mesh data.
    NoMeshData {
        /// Object name.
        object: String,
    },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMeshData { object } => write!(f, "object '{object}' has no mesh data"),
        }
    }
}

impl std::error::Error for ExtractError {}
