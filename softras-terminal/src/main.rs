//! softras - software rasterizer in the terminal
//!
//! Renders a `.v` model (or a built-in cube) and spins it.
//! Controls:
//!   - WASD / Arrow Keys: Rotate
//!   - E/R: Roll rotation
//!   - Q/ESC: Quit
//!
//! Logs go to stderr; redirect them (`2>softras.log`) in interactive mode.

use anyhow::{Context, Result};
use clap::Parser;
use softras_core::{parse_vmodel, Framebuffer, HashedColors, Mesh, Rasterizer, RotationState};
use softras_terminal::{render_frame, snapshot, TerminalApp, ViewerConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "softras")]
#[command(about = "Minimal CPU rasterizer drawing to the terminal")]
struct Cli {
    /// Binary `.v` model to render; a cube is used when omitted
    model: Option<PathBuf>,

    /// TOML viewer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render one frame to this PPM file instead of opening the viewer
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Snapshot width in pixels (overrides the config)
    #[arg(long)]
    width: Option<usize>,

    /// Snapshot height in pixels (overrides the config)
    #[arg(long)]
    height: Option<usize>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    config.validate().context("Invalid viewer configuration")?;

    if cli.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let mesh = match &cli.model {
        Some(path) => load_mesh(path)?,
        None => Mesh::cube(2.0),
    };
    log::info!(
        "mesh: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    match &cli.snapshot {
        Some(path) => write_snapshot(&mesh, &config, path),
        None => TerminalApp::new(mesh, config)?.run(),
    }
}

fn load_mesh(path: &Path) -> Result<Mesh> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mesh =
        parse_vmodel(&data).with_context(|| format!("Failed to decode model {}", path.display()))?;
    log::debug!("decoded {} ({} bytes)", path.display(), data.len());
    Ok(mesh)
}

fn write_snapshot(mesh: &Mesh, config: &ViewerConfig, path: &Path) -> Result<()> {
    let mut fb = Framebuffer::new(config.width, config.height)?;
    let camera = config.camera(config.width, config.height);
    let stats = render_frame(
        &mut fb,
        mesh,
        &RotationState::new(0.3, 0.3, 0.0),
        &camera,
        config,
        &Rasterizer::new(HashedColors),
    );
    log::info!(
        "rendered {} triangles ({} skipped), {} pixels",
        stats.triangles_rasterized,
        stats.triangles_skipped,
        stats.pixels_written
    );

    snapshot::save_ppm(&fb, path).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
