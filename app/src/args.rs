//! Command line arguments.
//!
//! Parsed with clap into [`ExportArgs`], which resolves the output path and
//! merges the configuration file with command line overrides.

use std::path::{Path, PathBuf};

use clap::Parser;
use xml3d_core::{ExportConfig, ExportError, PathMode};

/// Texture path mode selection for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliPathMode {
    /// Copy images next to the document and reference the copies.
    Copy,
    /// Reference images by absolute path.
    Absolute,
    /// Reference bare file names.
    Strip,
}

impl From<CliPathMode> for PathMode {
    fn from(cli: CliPathMode) -> Self {
        match cli {
            CliPathMode::Copy => PathMode::Copy,
            CliPathMode::Absolute => PathMode::Absolute,
            CliPathMode::Strip => PathMode::Strip,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "xml3d-export",
    about = "Export a scene snapshot to an XML3D asset document",
    long_about = "Welds every mesh of a RON scene snapshot into indexed geometry and writes \
        the meshes, per-material submeshes and shaders as one XML3D asset document.\n\n\
        EXAMPLES:\n\
          # Write scene.xml next to scene.ron\n\
          xml3d-export scene.ron\n\
        \n\
          # Reference textures by file name only, without copying\n\
          xml3d-export scene.ron -o out/scene.xml --path-mode strip --no-copy",
    version
)]
struct ClapArgs {
    /// Scene snapshot in RON format.
    scene: PathBuf,

    /// Output document. Defaults to the scene path with an `.xml` extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export configuration (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Texture directory, relative to the output document.
    #[arg(long)]
    texture_dir: Option<String>,

    /// How texture files are referenced.
    #[arg(long, value_enum)]
    path_mode: Option<CliPathMode>,

    /// Do not copy textures after writing the document.
    #[arg(long)]
    no_copy: bool,

    /// Log debug details.
    #[arg(short, long)]
    verbose: bool,
}

/// Resolved command line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    pub scene: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub texture_dir: Option<String>,
    pub path_mode: Option<PathMode>,
    pub no_copy: bool,
    pub verbose: bool,
}

impl From<ClapArgs> for ExportArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            scene: args.scene,
            output: args.output,
            config: args.config,
            texture_dir: args.texture_dir,
            path_mode: args.path_mode.map(PathMode::from),
            no_copy: args.no_copy,
            verbose: args.verbose,
        }
    }
}

impl ExportArgs {
    /// Parse arguments from the process command line.
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    /// Parse arguments from an iterator, as clap would from `std::env::args`.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        ClapArgs::try_parse_from(args).map(Into::into)
    }

    /// Where the document is written.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.scene.with_extension("xml"))
    }

    /// Directory of the scene file, base of relative texture paths.
    pub fn scene_dir(&self) -> PathBuf {
        self.scene
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Configuration file merged with command line overrides.
    ///
    /// An explicit `--config` must load; without one, defaults are used.
    pub fn export_config(&self) -> Result<ExportConfig, ExportError> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::load(path)?,
            None => ExportConfig::default(),
        };
        if let Some(texture_dir) = &self.texture_dir {
            config.texture_dir = texture_dir.clone();
        }
        if let Some(path_mode) = self.path_mode {
            config.path_mode = path_mode;
        }
        if self.no_copy {
            config.copy_textures = false;
        }
        Ok(config)
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
