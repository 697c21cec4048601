mod camera;
mod config;
mod geometry;
mod marching;
mod material;
mod output;
mod rendering;
mod scene;
mod sdf;
mod shading;
mod utils;


use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use crate::config::RenderConfig;
use crate::geometry::Fp;
use crate::output::write_frame;
use crate::rendering::render_frame;
use crate::scene::Scene;

/// Renders the ray-marched demo scene to image files.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// TOML file with render settings; defaults are used for missing keys
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output width, overrides the config
    #[arg(long, short = 'W')]
    width: Option<u32>,

    /// Output height, overrides the config
    #[arg(long, short = 'H')]
    height: Option<u32>,

    /// Elapsed time of the first frame, in seconds
    #[arg(long, short = 't', default_value_t = 0.0)]
    time: Fp,

    /// Number of frames to render
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Frame rate of the rendered sequence
    #[arg(long, default_value_t = 30.0)]
    fps: Fp,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Output file; `.ppm` writes PPM, anything else PNG
    output: PathBuf,
}

fn load_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(width) = args.width {
        if args.config.is_some() && width != config.width {
            warn!("--width {width} overrides config width {}", config.width);
        }
        config.width = width;
    }
    if let Some(height) = args.height {
        if args.config.is_some() && height != config.height {
            warn!("--height {height} overrides config height {}", config.height);
        }
        config.height = height;
    }
    config.validate()?;
    Ok(config)
}

fn frame_path(output: &Path, index: u32, frames: u32) -> PathBuf {
    if frames <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{stem}_{index:04}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index:04}"),
    };
    output.with_file_name(name)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    debug!("{:#?}", config);
    anyhow::ensure!(args.fps > 0.0, "--fps must be positive");

    let scene = Scene::default();
    let started = Instant::now();
    for index in 0..args.frames {
        let time = args.time + index as Fp / args.fps;
        let path = frame_path(&args.output, index, args.frames);
        info!(
            "rendering frame {index} at t={time:.3}s ({}x{})",
            config.width, config.height
        );
        let frame_started = Instant::now();
        let frame = render_frame(&scene, &config, time, !args.no_progress);
        write_frame(&frame, &path).with_context(|| format!("writing {}", path.display()))?;
        info!(
            "wrote {} in {:.2?}",
            path.display(),
            frame_started.elapsed()
        );
    }
    let elapsed = started.elapsed().as_secs_f64();
    if args.frames > 1 && elapsed > 0.0 {
        info!("FPS: {:.2}", args.frames as f64 / elapsed);
    }
    Ok(())
}
