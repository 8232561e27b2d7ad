use anyhow::{Context, Result};
use clap::Parser;
use qishape::color::Gradient;
use qishape::config::{RenderConfig, DEFAULT_BASE_URL};
use qishape::helper::{save_png, save_svg, DEFAULT_DIRECTORY, DEFAULT_FILENAME};
use qishape::logging::{init_logging, LoggingConfig};
use qishape::render::{RenderController, RenderOptions};
use qishape::shape::ShapeKind;

/// Render a gradient QR code inside a pixelated shape and save it as SVG.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base URL to encode
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Optional path segment appended as `<base-url>/<param>`
    #[arg(long, default_value = "")]
    param: String,

    /// Left gradient stop (#RRGGBB)
    #[arg(long, default_value = "#FF0066")]
    left: String,

    /// Center gradient stop (#RRGGBB)
    #[arg(long, default_value = "#9933FF")]
    center: String,

    /// Right gradient stop (#RRGGBB)
    #[arg(long, default_value = "#0066FF")]
    right: String,

    /// Silhouette: triangle, circle or square
    #[arg(long, default_value = "triangle")]
    shape: ShapeKind,

    /// Directory to write into
    #[arg(long, default_value = DEFAULT_DIRECTORY)]
    output_dir: String,

    /// File name without extension
    #[arg(long, default_value = DEFAULT_FILENAME)]
    filename: String,

    /// Also write a PNG preview
    #[arg(long)]
    png: bool,

    /// Embed a raster image in the SVG instead of vector rectangles
    #[arg(long)]
    embed_raster: bool,

    /// Merge same-colored QR module runs
    #[arg(long)]
    merge: bool,

    /// Seed for a reproducible background pattern
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, e.g. "debug" (defaults to RUST_LOG, then "info")
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig { filter: args.log.clone(), ..LoggingConfig::default() });

    let config = RenderConfig::new(
        args.base_url,
        args.param,
        Gradient::from_hex_or_black(&args.left, &args.center, &args.right),
        args.shape,
    );
    log::info!("encoding {}", config.effective_text());

    let options = RenderOptions { merge_modules: args.merge, seed: args.seed, ..RenderOptions::default() };
    let mut controller = RenderController::with_default_encoder(options);
    let scene = controller.update(config).context("render pass produced no scene")?;

    let svg = save_svg(scene, Some(args.output_dir.as_str()), Some(args.filename.as_str()), args.embed_raster)
        .inspect_err(|err| log::error!("could not write SVG: {}", err))?;
    println!("Saved to: {}", svg.display());

    if args.png {
        let png = save_png(scene, Some(args.output_dir.as_str()), Some(args.filename.as_str()))
            .inspect_err(|err| log::error!("could not write PNG: {}", err))?;
        println!("Saved to: {}", png.display());
    }

    Ok(())
}
