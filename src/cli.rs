//! Command line interface.
//!
//! Each subcommand reads a project (or legacy layout) file and writes its
//! result either to `--output` or to the supplied writer, which is stdout
//! for the binary.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use slabkit_designer::mask_raster::{encode_png, rasterize_mask};
use slabkit_designer::overlay_mask::build_overlay_mask;
use slabkit_designer::serialization::{export_project, import_project, ProjectFile};
use slabkit_designer::share::{decode_token, encode_project};
use slabkit_designer::{render_scene, to_svg, Project, SceneOptions};

/// Countertop and slab layout tools
#[derive(Debug, Parser)]
#[command(name = "slabkit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a layout as a standalone SVG drawing
    Svg(SvgArgs),
    /// Rasterize a layout's overlay mask to a grayscale PNG
    Mask(MaskArgs),
    /// Encode or decode share link tokens
    Share(ShareArgs),
    /// Convert a legacy single-layout file to the current project format
    Migrate(MigrateArgs),
}

/// Render a layout to SVG
#[derive(Debug, Clone, Args)]
pub struct SvgArgs {
    /// Project or legacy layout file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Layout index; the project's active layout when omitted
    #[arg(short, long)]
    pub layout: Option<usize>,

    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Rasterize the overlay mask
#[derive(Debug, Clone, Args)]
pub struct MaskArgs {
    /// Project or legacy layout file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Layout index; the project's active layout when omitted
    #[arg(short, long)]
    pub layout: Option<usize>,

    /// PNG output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ShareArgs {
    #[command(subcommand)]
    pub command: ShareCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ShareCommand {
    /// Print a `v2=` token for a project file
    Encode {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the project JSON carried by a token
    Decode {
        /// Token, with or without the leading `#`
        token: String,
    },
}

/// Convert a legacy layout
#[derive(Debug, Clone, Args)]
pub struct MigrateArgs {
    /// Legacy layout JSON
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn load_project(path: &Path) -> Result<Project> {
    ProjectFile::load_from_file(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn layout_index(project: &Project, requested: Option<usize>) -> Result<usize> {
    let index = requested.unwrap_or(project.active);
    if index >= project.layouts.len() {
        bail!(
            "layout {} does not exist (project has {})",
            index,
            project.layouts.len()
        );
    }
    Ok(index)
}

fn emit(bytes: &[u8], output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => out.write_all(bytes).context("Failed to write output")?,
    }
    Ok(())
}

impl SvgArgs {
    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let project = load_project(&self.file)?;
        let index = layout_index(&project, self.layout)?;
        let scene = render_scene(&project, index, &SceneOptions::for_export(&project.ui))?;
        let svg = to_svg(&scene);
        tracing::info!(layout = index, bytes = svg.len(), "svg rendered");
        emit(svg.as_bytes(), self.output.as_deref(), out)
    }
}

impl MaskArgs {
    pub fn execute(&self) -> Result<()> {
        let project = load_project(&self.file)?;
        let index = layout_index(&project, self.layout)?;
        let mask = build_overlay_mask(&project.layouts[index]);
        let image = rasterize_mask(&mask).context("Failed to rasterize mask")?;
        let png = encode_png(&image).context("Failed to encode mask")?;
        std::fs::write(&self.output, png)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;
        tracing::info!(layout = index, path = %self.output.display(), "mask written");
        Ok(())
    }
}

impl ShareArgs {
    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        match &self.command {
            ShareCommand::Encode { file } => {
                let project = load_project(file)?;
                let token = encode_project(&project).context("Failed to encode share token")?;
                writeln!(out, "{token}")?;
            }
            ShareCommand::Decode { token } => {
                let project = decode_token(token)
                    .context("Failed to decode share token")?
                    .into_project()
                    .context("Share token does not hold a valid project")?;
                let json = export_project(&project)?;
                writeln!(out, "{json}")?;
            }
        }
        Ok(())
    }
}

impl MigrateArgs {
    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let project = import_project(&text)
            .with_context(|| format!("Failed to migrate {}", self.file.display()))?;
        let mut json = export_project(&project)?;
        json.push('\n');
        emit(json.as_bytes(), self.output.as_deref(), out)
    }
}

impl Cli {
    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        match &self.command {
            Command::Svg(args) => args.execute(out),
            Command::Mask(args) => args.execute(),
            Command::Share(args) => args.execute(out),
            Command::Migrate(args) => args.execute(out),
        }
    }
}
