//! Command line front end for the XML3D asset exporter.

pub mod args;

pub use args::{CliPathMode, ExportArgs};

use xml3d_core::scene::Scene;
use xml3d_core::{AssetExporter, ExportError, ExportStats};

/// Export the scene named by `args` and return what was written.
pub fn run(args: &ExportArgs) -> Result<ExportStats, ExportError> {
    let config = args.export_config()?;
    let output = args.output_path();

    log::debug!("Reading scene {}", args.scene.display());
    let text = std::fs::read_to_string(&args.scene)?;
    let scene = Scene::from_ron(&text)?;
    log::info!(
        "Exporting scene '{}' ({} objects) to {}",
        scene.name.as_deref().unwrap_or("untitled"),
        scene.objects.len(),
        output.display()
    );

    let mut exporter = AssetExporter::new(output, args.scene_dir(), config);
    exporter.add_scene(&scene);
    exporter.save()
}
