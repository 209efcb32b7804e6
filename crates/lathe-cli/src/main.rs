//! lathe CLI - sample curves and export surfaces of revolution
//!
//! Reads a JSON array of control points and an optional TOML session
//! config, runs the curve and revolution pipeline, and writes the result.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use lathe::{build_revolution, sample_curve, Axis, PointSet, SessionConfig};
use lathe_export::{points_from_json, write_mesh, ExportFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "lathe")]
#[command(about = "Parametric curves and surfaces of revolution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample the curve and print the polyline as JSON
    Sample {
        #[command(flatten)]
        input: InputArgs,
        /// Write the polyline here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Revolve the sampled curve and export the mesh
    Revolve {
        #[command(flatten)]
        input: InputArgs,
        /// Output file (format determined by extension: .json, .obj, .stl)
        #[arg(long)]
        out: PathBuf,
        /// Override the rotation axis (x, y or z)
        #[arg(long)]
        axis: Option<Axis>,
        /// Write STL as text instead of binary
        #[arg(long)]
        ascii: bool,
    },
    /// Show point and mesh statistics
    Info {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// JSON array of {x, y, weight} control points
    #[arg(long)]
    points: PathBuf,
    /// TOML session config (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn load(&self) -> Result<(PointSet, SessionConfig)> {
        let json = fs::read_to_string(&self.points)
            .with_context(|| format!("read points file {}", self.points.display()))?;
        let points = points_from_json(&json)
            .with_context(|| format!("parse points file {}", self.points.display()))?;
        let config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => SessionConfig::default(),
        };
        Ok((points, config))
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Sample { input, out } => sample(&input, out.as_deref()),
        Command::Revolve {
            input,
            out,
            axis,
            ascii,
        } => revolve(&input, &out, axis, ascii),
        Command::Info { input } => show_info(&input),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn sample(input: &InputArgs, out: Option<&Path>) -> Result<()> {
    let (points, config) = input.load()?;
    let polyline = sample_curve(points.as_slice(), &config.curve).context("sampling failed")?;
    let coords: Vec<[f64; 2]> = polyline.iter().map(|p| [p.x, p.y]).collect();
    let json = serde_json::to_string_pretty(&coords)?;

    match out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), samples = coords.len(), "polyline written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn revolve(input: &InputArgs, out: &Path, axis: Option<Axis>, ascii: bool) -> Result<()> {
    let (points, mut config) = input.load()?;
    if let Some(axis) = axis {
        config.revolution.axis = axis;
    }

    let mut format = ExportFormat::from_path(out)?;
    if ascii {
        if format != ExportFormat::Stl {
            bail!("--ascii only applies to .stl output");
        }
        format = ExportFormat::StlAscii;
    }

    let mesh = build_revolution(points.as_slice(), &config).context("revolution failed")?;
    write_mesh(&mesh, out, format).with_context(|| format!("export {}", out.display()))?;
    println!(
        "Exported {} vertices, {} faces to {}",
        mesh.num_vertices(),
        mesh.num_faces(),
        out.display()
    );
    Ok(())
}

fn show_info(input: &InputArgs) -> Result<()> {
    let (points, config) = input.load()?;

    println!("lathe points: {}", input.points.display());
    println!("  Points: {}", points.len());
    if let Some(c) = points.centroid() {
        println!("  Centroid: ({:.3}, {:.3})", c.x, c.y);
    }
    if let Some(b) = points.bounding_box() {
        println!(
            "  Bounds: ({:.3}, {:.3}) - ({:.3}, {:.3})",
            b.min_x, b.min_y, b.max_x, b.max_y
        );
    }
    let rational = lathe::is_rational(points.as_slice());
    println!("  Rational: {}", if rational { "yes" } else { "no" });
    println!(
        "  Curve: {:?}, degree {}, resolution {}",
        config.curve.kind, config.curve.degree, config.curve.resolution
    );

    match sample_curve(points.as_slice(), &config.curve) {
        Ok(polyline) => println!("  Samples: {}", polyline.len()),
        Err(e) => println!("  Samples: none ({e})"),
    }

    let rev = &config.revolution;
    println!(
        "\nRevolution: axis {}, {} degrees, {} subdivisions",
        rev.axis, rev.angle_degrees, rev.subdivisions
    );
    match build_revolution(points.as_slice(), &config) {
        Ok(mesh) => {
            let stats = mesh.stats();
            println!("  Vertices: {}", stats.vertex_count);
            println!("  Faces: {}", stats.face_count);
        }
        Err(e) => println!("  Failed to revolve: {e}"),
    }

    Ok(())
}
