//! Export orchestration.
//!
//! [`AssetExporter`] walks a scene snapshot, welds each mesh into the
//! [`AssetGraph`], registers the materials its submeshes use, and finally
//! writes the document and runs the deferred texture copies.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::asset::AssetGraph;
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::material::MaterialRegistry;
use crate::mesh::weld;
use crate::scene::{MaterialDescriptor, Scene, SceneObject, SourceMesh};
use crate::texture::{CopyBatch, CopyFn, PathResolver, TextureResolver};
use crate::xml3d::{write_document, AssetInfo, ExportStats};

/// Builds one asset document from scene content.
pub struct AssetExporter<R: TextureResolver = PathResolver> {
    path: PathBuf,
    config: ExportConfig,
    resolver: R,
    graph: AssetGraph,
    registry: MaterialRegistry,
    copies: CopyBatch,
}

impl AssetExporter<PathResolver> {
    /// Create an exporter writing to `path`, resolving texture paths
    /// relative to `source_dir`.
    pub fn new(
        path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
        config: ExportConfig,
    ) -> Self {
        let path = path.into();
        let export_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let resolver = PathResolver::new(source_dir, export_dir, &config);
        Self::with_resolver(path, config, resolver)
    }
}

impl<R: TextureResolver> AssetExporter<R> {
    pub fn with_resolver(path: impl Into<PathBuf>, config: ExportConfig, resolver: R) -> Self {
        Self {
            path: path.into(),
            config,
            resolver,
            graph: AssetGraph::new(),
            registry: MaterialRegistry::new(),
            copies: CopyBatch::default(),
        }
    }

    pub fn graph(&self) -> &AssetGraph {
        &self.graph
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    /// Texture copies queued so far.
    pub fn pending_copies(&self) -> &CopyBatch {
        &self.copies
    }

    /// Perform texture copies with `copy` instead of [`std::fs::copy`].
    pub fn set_copy_fn(&mut self, copy: CopyFn) {
        self.copies.set_copy_fn(copy);
    }

    /// Add every object of a scene, in order.
    pub fn add_scene(&mut self, scene: &Scene) {
        for object in &scene.objects {
            self.add_object(object, &scene.materials);
        }
    }

    /// Add one scene object. Non-geometry objects are ignored; objects
    /// whose mesh cannot be extracted are logged and skipped.
    pub fn add_object(&mut self, object: &SceneObject, materials: &[MaterialDescriptor]) {
        if !object.kind.is_geometry() {
            log::debug!("Ignoring {:?} object '{}'", object.kind, object.name);
            return;
        }
        match object.extract_mesh() {
            Ok(mesh) => self.add_mesh(mesh, materials),
            Err(e) => log::warn!("Skipping object '{}': {e}", object.name),
        }
    }

    /// Weld a mesh into the asset graph and register the shaders of its
    /// submeshes. Problems with the mesh are logged and the mesh skipped.
    pub fn add_mesh(&mut self, mesh: &SourceMesh, materials: &[MaterialDescriptor]) {
        if self.graph.contains_mesh(&mesh.name) {
            log::warn!("Skipping mesh '{}': name already exported", mesh.name);
            return;
        }

        let faces = match mesh.corner_faces() {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("Skipping mesh '{}': {e}", mesh.name);
                return;
            }
        };

        let Some(welded) = weld(&faces, mesh.slot_count()) else {
            log::warn!("Found mesh without faces: {}", mesh.name);
            return;
        };

        let registry = &mut self.registry;
        let resolver = &mut self.resolver;
        let copies = &mut self.copies;
        let result = self.graph.add_mesh(&mesh.name, &welded, &mesh.vertices, |slot| {
            match slot_material(mesh, slot, materials) {
                Some(material) => registry
                    .register(material, &mut *resolver, &mut *copies)
                    .name
                    .clone(),
                None => registry.register_default().name.clone(),
            }
        });

        match result {
            Ok(submeshes) => log::debug!(
                "Mesh '{}': {} vertices, {submeshes} submeshes",
                mesh.name,
                welded.vertex_count()
            ),
            Err(e) => log::warn!("Skipping mesh '{}': {e}", mesh.name),
        }
    }

    /// Write the document to any writer, updating `stats`.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        stats: &mut ExportStats,
    ) -> Result<(), ExportError> {
        write_document(&self.graph, &self.registry, writer, stats)
    }

    /// Write the document to the destination path, then run the deferred
    /// texture copies.
    ///
    /// Failing to create or write the destination is the only error
    /// returned; copy problems are logged and leave the document intact.
    pub fn save(&mut self) -> Result<ExportStats, ExportError> {
        let mut stats = ExportStats::default();
        let url = self.path.to_string_lossy().into_owned();

        {
            let file = File::create(&self.path)?;
            self.write_to(BufWriter::new(file), &mut stats)?;
        }
        let size = std::fs::metadata(&self.path)?.len();
        stats.assets.push(AssetInfo {
            url,
            size: Some(size),
        });

        if self.config.copy_textures {
            self.copy_textures();
        }

        log::info!("Exported {}: {stats}", self.path.display());
        Ok(stats)
    }

    fn copy_textures(&mut self) {
        if self.copies.is_empty() {
            return;
        }
        let pending = self.copies.to_string();
        match self
            .copies
            .copy_all(|message| log::warn!("Texture copy: {message}"))
        {
            Ok(copied) => log::info!("Copied {copied} textures"),
            Err(e) => log::error!("While copying textures ({e}): {pending}"),
        }
    }
}

/// Material of a slot, or `None` for the default material.
fn slot_material<'a>(
    mesh: &SourceMesh,
    slot: usize,
    materials: &'a [MaterialDescriptor],
) -> Option<&'a MaterialDescriptor> {
    let name = mesh.materials.get(slot)?.as_deref()?;
    let material = materials.iter().find(|m| m.name == name);
    if material.is_none() {
        log::warn!(
            "Mesh '{}' slot {slot} uses unknown material '{name}', using the default material",
            mesh.name
        );
    }
    material
}
