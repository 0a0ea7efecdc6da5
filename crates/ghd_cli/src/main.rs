//! Headless front end: picks a scene, steps the progressive renderer until
//! it is complete, and writes the display buffer to disk.

mod cli;
mod presets;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use ghd_core::{CameraSettings, RenderSettings, SceneDescription};
use ghd_math::Vec3;
use ghd_renderer::ProgressiveRenderer;
use log::LevelFilter;

use cli::Args;

/// Seed for the random preset when none is given
const DEFAULT_PRESET_SEED: u64 = 69;

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn render_settings(args: &Args) -> Result<RenderSettings> {
    if let Some(path) = &args.settings {
        return read_json(path);
    }

    let aperture = args
        .aperture
        .context("--aperture is required when --settings is not given")?;

    Ok(RenderSettings {
        image_width: args.width,
        image_height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        max_bounce_depth: args.max_depth,
        camera: CameraSettings {
            lookfrom: Vec3::new(13.0, 2.0, 3.0),
            lookat: Vec3::ZERO,
            vup: Vec3::Y,
            vertical_fov_degrees: 19.0,
            aperture,
            focus_distance: 12.0,
        },
        threads: args.threads,
        seed: args.seed,
    })
}

fn scene_description(args: &Args) -> Result<SceneDescription> {
    match &args.scene {
        Some(path) => read_json(path),
        None => Ok(args.preset.build(args.seed.unwrap_or(DEFAULT_PRESET_SEED))),
    }
}

fn save_png(renderer: &ProgressiveRenderer, path: &Path) -> Result<()> {
    let image = image::RgbaImage::from_raw(
        renderer.width(),
        renderer.height(),
        renderer.display_buffer().to_vec(),
    )
    .context("Display buffer does not match the image size")?;

    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(LevelFilter::from(args.log_level))
        .parse_default_env()
        .init();

    let settings = render_settings(&args)?;
    let scene = scene_description(&args)?;

    let mut renderer =
        ProgressiveRenderer::new(settings, &scene).context("Failed to set up the renderer")?;

    while !renderer.is_complete() {
        let report = renderer.step()?;
        log::info!(
            "Rendering iteration {}/{} ({:.1} ms)",
            report.iteration,
            report.samples_per_pixel,
            report.duration.as_secs_f64() * 1000.0
        );
    }

    save_png(&renderer, &args.output)?;
    log::info!(
        "Saved {} after {:.3} s",
        args.output.display(),
        renderer.total_render_time().as_secs_f64()
    );

    Ok(())
}
