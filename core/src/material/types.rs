//! Typed content values and shader records.

/// Shading script interpreting every exported shader.
pub const PHONG_SCRIPT: &str = "urn:xml3d:shader:phong";

/// Name of the shader used by faces without a material.
pub const DEFAULT_MATERIAL_NAME: &str = "defaultMaterial";

/// Maps the raw material inputs onto the phong shading model.
pub const BLENDER_MATERIAL_COMPUTE: &str = "(diffuseColor, specularColor, shininess, ambientIntensity) = xflow.blenderMaterial(diffuse_color, diffuse_intensity, specular_color, specular_intensity, specular_hardness)";

/// A named, typed value written as one content element.
///
/// The same representation is used for shader parameters, mesh attribute
/// arrays and index buffers.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Single scalar.
    Float { name: String, value: f32 },
    /// Sequence of 3-component vectors.
    Float3Array { name: String, values: Vec<[f32; 3]> },
    /// Sequence of 2-component vectors.
    Float2Array { name: String, values: Vec<[f32; 2]> },
    /// Sequence of integers.
    IntArray { name: String, values: Vec<u32> },
    /// Image reference by URI.
    Texture { name: String, source_uri: String },
}

impl TypedValue {
    pub fn float(name: impl Into<String>, value: f32) -> Self {
        Self::Float {
            name: name.into(),
            value,
        }
    }

    pub fn float3_array(name: impl Into<String>, values: Vec<[f32; 3]>) -> Self {
        Self::Float3Array {
            name: name.into(),
            values,
        }
    }

    pub fn float2_array(name: impl Into<String>, values: Vec<[f32; 2]>) -> Self {
        Self::Float2Array {
            name: name.into(),
            values,
        }
    }

    pub fn int_array(name: impl Into<String>, values: Vec<u32>) -> Self {
        Self::IntArray {
            name: name.into(),
            values,
        }
    }

    pub fn texture(name: impl Into<String>, source_uri: impl Into<String>) -> Self {
        Self::Texture {
            name: name.into(),
            source_uri: source_uri.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Float { name, .. }
            | Self::Float3Array { name, .. }
            | Self::Float2Array { name, .. }
            | Self::IntArray { name, .. }
            | Self::Texture { name, .. } => name,
        }
    }

    /// Element tag of this value in the asset document.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Float { .. } => "float",
            Self::Float3Array { .. } => "float3",
            Self::Float2Array { .. } => "float2",
            Self::IntArray { .. } => "int",
            Self::Texture { .. } => "texture",
        }
    }
}

/// A shader definition written as one `shader` element.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderRecord {
    /// Unique shader id.
    pub name: String,
    /// Shading script identifier.
    pub script: String,
    /// Parameters in emission order.
    pub parameters: Vec<TypedValue>,
    /// Optional expression deriving shading inputs from the parameters.
    pub compute: Option<String>,
}

impl ShaderRecord {
    /// The reserved record used for faces without a material: flat gray
    /// diffuse, bright specular, half ambient.
    pub fn default_material() -> Self {
        Self {
            name: DEFAULT_MATERIAL_NAME.to_string(),
            script: PHONG_SCRIPT.to_string(),
            parameters: vec![
                TypedValue::float3_array("diffuseColor", vec![[0.8, 0.8, 0.8]]),
                TypedValue::float3_array("specularColor", vec![[1.0, 1.0, 0.1]]),
                TypedValue::float("ambientIntensity", 0.5),
            ],
            compute: None,
        }
    }

    /// Number of texture parameters.
    pub fn texture_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| matches!(p, TypedValue::Texture { .. }))
            .count()
    }
}
