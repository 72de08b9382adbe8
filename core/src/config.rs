//! Export configuration loaded from `export.toml`.

use std::path::Path;

use serde::Deserialize;

use crate::error::ExportError;

/// How file-backed textures are referenced from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// Copy the image next to the document and reference the copy.
    #[default]
    Copy,
    /// Reference the source image by absolute path.
    Absolute,
    /// Reference the bare file name.
    Strip,
}

/// Options controlling texture references and copies.
///
/// Every field has a default, so an empty file is a valid configuration:
///
/// ```toml
/// texture_dir = "../textures"
/// path_mode = "copy"
/// embed_packed = true
/// copy_textures = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Texture directory, relative to the document's directory.
    pub texture_dir: String,
    pub path_mode: PathMode,
    /// Write packed images inline as data URIs.
    pub embed_packed: bool,
    /// Run the deferred texture copies after the document is written.
    pub copy_textures: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            texture_dir: "../textures".into(),
            path_mode: PathMode::Copy,
            embed_packed: true,
            copy_textures: true,
        }
    }
}

impl ExportConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| ExportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a configuration, falling back to defaults if the file is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded export config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("No export config ({e}), using defaults");
                Self::default()
            }
        }
    }
}
