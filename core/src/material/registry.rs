//! Registry of shader records keyed by material name.

use indexmap::IndexMap;

use crate::scene::{Image, MaterialDescriptor, TextureCoords, TextureKind, TextureSlot};
use crate::texture::{CopyBatch, TextureResolver};

use super::types::{
    ShaderRecord, TypedValue, BLENDER_MATERIAL_COMPUTE, DEFAULT_MATERIAL_NAME, PHONG_SCRIPT,
};

/// Smallest diffuse blend factor for which a texture slot still counts.
const MIN_DIFFUSE_FACTOR: f32 = 0.0001;

/// Shader records in first-registration order, unique by name.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    shaders: IndexMap<String, ShaderRecord>,
}

impl MaterialRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material.
    ///
    /// The record is built only the first time a name is seen; later calls
    /// return the existing record. Texture slots that cannot be exported are
    /// logged and dropped, the shading parameters are always kept.
    pub fn register(
        &mut self,
        material: &MaterialDescriptor,
        resolver: &mut dyn TextureResolver,
        copies: &mut CopyBatch,
    ) -> &ShaderRecord {
        let index = self.get_or_insert_with(&material.name, || {
            build_shader(material, resolver, copies)
        });
        &self.shaders[index]
    }

    /// Register the reserved default material. Idempotent.
    pub fn register_default(&mut self) -> &ShaderRecord {
        let index = self.get_or_insert_with(DEFAULT_MATERIAL_NAME, ShaderRecord::default_material);
        &self.shaders[index]
    }

    /// Index of the record named `name`, built with `build` when the name
    /// is new.
    fn get_or_insert_with(&mut self, name: &str, build: impl FnOnce() -> ShaderRecord) -> usize {
        let entry = self.shaders.entry(name.to_string());
        let index = entry.index();
        entry.or_insert_with(build);
        index
    }

    /// Look up a record by shader name.
    pub fn get(&self, name: &str) -> Option<&ShaderRecord> {
        self.shaders.get(name)
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    /// Records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ShaderRecord> {
        self.shaders.values()
    }
}

fn build_shader(
    material: &MaterialDescriptor,
    resolver: &mut dyn TextureResolver,
    copies: &mut CopyBatch,
) -> ShaderRecord {
    let mut parameters = vec![
        TypedValue::float("diffuse_intensity", material.diffuse_intensity),
        TypedValue::float3_array("diffuse_color", vec![material.diffuse_color]),
        TypedValue::float("specular_intensity", material.specular_intensity),
        TypedValue::float3_array("specular_color", vec![material.specular_color]),
        TypedValue::float("specular_hardness", material.specular_hardness),
        TypedValue::float("ambient", material.ambient),
    ];

    for slot in material.texture_slots.iter().flatten() {
        let Some(image) = diffuse_image(material, slot) else {
            continue;
        };
        match resolver.resolve(image, copies) {
            Ok(uri) => parameters.push(TypedValue::texture("diffuseTexture", uri)),
            Err(e) => log::warn!(
                "Texture '{}' of material '{}' could not be resolved: {e}. Skipping texture...",
                slot.name,
                material.name
            ),
        }
    }

    ShaderRecord {
        name: material.name.clone(),
        script: PHONG_SCRIPT.to_string(),
        parameters,
        compute: Some(BLENDER_MATERIAL_COMPUTE.to_string()),
    }
}

/// The image of a slot that feeds the diffuse color, if the slot is
/// exportable.
fn diffuse_image<'a>(material: &MaterialDescriptor, slot: &'a TextureSlot) -> Option<&'a Image> {
    if !slot.enabled {
        return None;
    }
    if !slot.use_map_color_diffuse || slot.diffuse_color_factor < MIN_DIFFUSE_FACTOR {
        return None;
    }

    if slot.texture_coords != TextureCoords::Uv {
        log::warn!(
            "Texture '{}' of material '{}' uses {:?} mapping, which is not supported. Skipping texture...",
            slot.name,
            material.name,
            slot.texture_coords
        );
        return None;
    }

    if slot.texture.kind != TextureKind::Image {
        log::warn!(
            "Texture '{}' of material '{}' is of type {:?}, which is not supported. Skipping texture...",
            slot.name,
            material.name,
            slot.texture.kind
        );
        return None;
    }

    let Some(image) = &slot.texture.image else {
        log::warn!(
            "Texture '{}' of material '{}' has no image. Skipping texture...",
            slot.name,
            material.name
        );
        return None;
    };

    if !image.source.is_supported() {
        log::warn!(
            "Texture '{}' of material '{}' is from source {:?}, which is not supported. Skipping texture...",
            slot.name,
            material.name,
            image.source
        );
        return None;
    }

    Some(image)
}
