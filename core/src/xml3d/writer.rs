//! Document writer.
//!
//! Layout of the emitted document:
//!
//! ```xml
//! <xml3d>
//!   <shader id="Red" script="urn:xml3d:shader:phong" compute="...">
//!     <float name="diffuse_intensity">0.8</float>
//!     ...
//!   </shader>
//!   <asset id="root">
//!     <assetdata name="Cube">
//!       <float3 name="position">...</float3>
//!       <float3 name="normal">...</float3>
//!     </assetdata>
//!     <assetmesh name="Cube_Red" includes="Cube" shader="#Red">
//!       <int name="index">0 1 2 2 3 0</int>
//!     </assetmesh>
//!   </asset>
//! </xml3d>
//! ```

use std::io::Write;

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::asset::AssetGraph;
use crate::error::ExportError;
use crate::material::{MaterialRegistry, ShaderRecord};
use crate::mesh::{MeshRecord, SubmeshRecord};

use super::content::render_content;
use super::stats::ExportStats;

/// Id of the single `asset` element.
pub const ASSET_ROOT_ID: &str = "root";

const INDENT: &str = "  ";

fn set_attr(element: &mut Element, name: &str, value: impl Into<String>) {
    element.attributes.insert(name.to_string(), value.into());
}

fn shader_element(shader: &ShaderRecord, stats: &mut ExportStats) -> Element {
    let mut element = Element::new("shader");
    set_attr(&mut element, "id", shader.name.as_str());
    set_attr(&mut element, "script", shader.script.as_str());
    if let Some(compute) = &shader.compute {
        set_attr(&mut element, "compute", compute.as_str());
    }
    for parameter in &shader.parameters {
        let content = render_content(parameter, &mut stats.textures);
        element.children.push(XMLNode::Element(content));
    }
    element
}

fn asset_data_element(mesh: &MeshRecord) -> Element {
    let mut element = Element::new("assetdata");
    set_attr(&mut element, "name", mesh.name());
    // geometry never carries textures
    let mut textures = 0;
    for value in mesh.content() {
        let content = render_content(&value, &mut textures);
        element.children.push(XMLNode::Element(content));
    }
    element
}

fn asset_mesh_element(submesh: &SubmeshRecord) -> Element {
    let mut element = Element::new("assetmesh");
    set_attr(&mut element, "name", submesh.name());
    set_attr(&mut element, "includes", submesh.mesh());
    set_attr(&mut element, "shader", submesh.shader_ref());
    let mut textures = 0;
    for value in submesh.content() {
        let content = render_content(&value, &mut textures);
        element.children.push(XMLNode::Element(content));
    }
    element
}

/// Build the `xml3d` root element.
///
/// Shaders come first in registration order, followed by the `asset`
/// element holding every `assetdata` and then every `assetmesh`.
/// Updates the material, mesh and texture counters of `stats`.
pub fn build_document(
    graph: &AssetGraph,
    registry: &MaterialRegistry,
    stats: &mut ExportStats,
) -> Element {
    let mut root = Element::new("xml3d");

    for shader in registry.iter() {
        let element = shader_element(shader, stats);
        root.children.push(XMLNode::Element(element));
        stats.materials += 1;
    }

    let mut asset = Element::new("asset");
    set_attr(&mut asset, "id", ASSET_ROOT_ID);

    for mesh in graph.meshes() {
        asset
            .children
            .push(XMLNode::Element(asset_data_element(mesh)));
    }

    for submesh in graph.submeshes() {
        asset
            .children
            .push(XMLNode::Element(asset_mesh_element(submesh)));
        stats.meshes.push(submesh.name().to_string());
    }

    root.children.push(XMLNode::Element(asset));
    root
}

/// Write the document as UTF-8 with a two-space indentation step.
///
/// Identical graphs and registries always produce identical bytes.
pub fn write_document<W: Write>(
    graph: &AssetGraph,
    registry: &MaterialRegistry,
    mut writer: W,
    stats: &mut ExportStats,
) -> Result<(), ExportError> {
    let root = build_document(graph, registry, stats);
    let config = EmitterConfig::new()
        .perform_indent(true)
        .indent_string(INDENT)
        .line_separator("\n");
    root.write_with_config(&mut writer, config)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the document into a string.
pub fn document_to_string(
    graph: &AssetGraph,
    registry: &MaterialRegistry,
    stats: &mut ExportStats,
) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_document(graph, registry, &mut buffer, stats)?;
    String::from_utf8(buffer).map_err(|e| ExportError::Io(std::io::Error::other(e)))
}
