//! Shader records built from scene materials.
//!
//! Every material is turned into a [`ShaderRecord`]: an ordered list of
//! [`TypedValue`] parameters plus the shading script that interprets them.
//! The [`MaterialRegistry`] keeps one record per material name, in first
//! registration order, and at most one reserved default record.

mod registry;
mod types;

pub use registry::MaterialRegistry;
pub use types::{
    ShaderRecord, TypedValue, BLENDER_MATERIAL_COMPUTE, DEFAULT_MATERIAL_NAME, PHONG_SCRIPT,
};
