//! Export statistics.

use std::fmt;

/// A file written by the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub url: String,
    /// Size in bytes, known once the file is closed.
    pub size: Option<u64>,
}

/// Counters gathered while writing an asset document, reported to the
/// caller and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Number of shader elements written.
    pub materials: usize,
    /// Names of the written submeshes, in document order.
    pub meshes: Vec<String>,
    pub assets: Vec<AssetInfo>,
    /// Number of texture references written.
    pub textures: usize,
}

impl fmt::Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} materials, {} meshes, {} textures",
            self.materials,
            self.meshes.len(),
            self.textures
        )?;
        for asset in &self.assets {
            match asset.size {
                Some(size) => write!(f, "; {} ({size} bytes)", asset.url)?,
                None => write!(f, "; {}", asset.url)?,
            }
        }
        Ok(())
    }
}
