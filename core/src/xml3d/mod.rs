//! XML3D asset document output.
//!
//! - [`render_content`] - One [`TypedValue`](crate::material::TypedValue) as a
//!   content element with fixed numeric formatting
//! - [`build_document`] / [`write_document`] - The whole `xml3d` document
//!   from an asset graph and a material registry
//! - [`ExportStats`] - Counters gathered while writing

mod content;
mod stats;
mod writer;

pub use content::{format_float_tuples, format_ints, format_scalar, render_content};
pub use stats::{AssetInfo, ExportStats};
pub use writer::{build_document, document_to_string, write_document, ASSET_ROOT_ID};
