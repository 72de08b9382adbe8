//! Image to URI resolution.

use std::path::{Path, PathBuf};

use crate::config::{ExportConfig, PathMode};
use crate::error::ExportError;
use crate::scene::Image;

use super::copy::CopyBatch;

/// MIME type written into data URIs of packed images.
pub const PNG_MIME_TYPE: &str = "image/png";

/// Turns an image into the URI written in a `texture` element.
///
/// Implementations that need files copied next to the document queue them
/// in `copies` instead of copying right away.
pub trait TextureResolver {
    fn resolve(&mut self, image: &Image, copies: &mut CopyBatch) -> Result<String, ExportError>;
}

/// Encode image bytes as a self-contained `data:` URI.
pub fn data_uri(data: &[u8]) -> String {
    format!("data:{PNG_MIME_TYPE};base64,{}", base64::encode(data))
}

/// Resolves images to data URIs or file references relative to the
/// exported document.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Directory of the scene file; base of `//`-relative image paths.
    source_dir: PathBuf,
    /// Directory the document is written to.
    export_dir: PathBuf,
    texture_dir: String,
    mode: PathMode,
    embed_packed: bool,
}

impl PathResolver {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        export_dir: impl Into<PathBuf>,
        config: &ExportConfig,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            export_dir: export_dir.into(),
            texture_dir: config.texture_dir.clone(),
            mode: config.path_mode,
            embed_packed: config.embed_packed,
        }
    }

    /// Absolute location of an image file.
    fn source_path(&self, filepath: &str) -> PathBuf {
        if let Some(relative) = filepath.strip_prefix("//") {
            self.source_dir.join(relative)
        } else {
            let path = Path::new(filepath);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.source_dir.join(path)
            }
        }
    }
}

impl TextureResolver for PathResolver {
    fn resolve(&mut self, image: &Image, copies: &mut CopyBatch) -> Result<String, ExportError> {
        if self.embed_packed {
            if let Some(data) = &image.packed_data {
                return Ok(data_uri(data));
            }
        }

        if image.filepath.is_empty() {
            return Err(ExportError::Texture(format!(
                "image '{}' has no file path",
                image.name
            )));
        }

        let source = self.source_path(&image.filepath);
        let file_name = || {
            source.file_name().ok_or_else(|| {
                ExportError::Texture(format!(
                    "image '{}' path {:?} has no file name",
                    image.name, image.filepath
                ))
            })
        };

        let uri = match self.mode {
            PathMode::Copy => {
                let file_name = file_name()?;
                let destination = self.export_dir.join(&self.texture_dir).join(file_name);
                copies.push(source.clone(), destination);
                Path::new(&self.texture_dir).join(file_name)
            }
            PathMode::Absolute => source.clone(),
            PathMode::Strip => PathBuf::from(file_name()?),
        };

        Ok(uri.to_string_lossy().replace('\\', "/"))
    }
}
