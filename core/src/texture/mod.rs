//! Texture source resolution.
//!
//! Provides the [`TextureResolver`] seam used by the material registry,
//! the file-path based [`PathResolver`], and the [`CopyBatch`] of deferred
//! texture copies that the exporter runs once the document is written.

mod copy;
mod resolver;

pub use copy::{CopyBatch, CopyFn};
pub use resolver::{data_uri, PathResolver, TextureResolver, PNG_MIME_TYPE};
