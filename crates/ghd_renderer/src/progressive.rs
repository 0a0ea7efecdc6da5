//! Progressive accumulation renderer.
//!
//! Each `step()` adds one jittered sample per pixel to the running sums,
//! then rebuilds the display image from scratch. Rows are the unit of
//! parallel work: a row is rendered start to finish by one rayon worker,
//! with its own generator, and no two workers touch the same pixel.

use std::time::{Duration, Instant};

use ghd_core::{RenderSettings, SceneDescription};
use rayon::prelude::*;

use crate::buffer::{AccumulationBuffer, DisplayBuffer};
use crate::error::RenderResult;
use crate::renderer::ray_color;
use crate::{sampling, Camera, Color, Scene};

/// What one `step()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Iterations completed so far, including this one
    pub iteration: u32,
    /// Target iteration count
    pub samples_per_pixel: u32,
    /// Wall time spent in this iteration
    pub duration: Duration,
    /// Non-finite samples dropped instead of accumulated
    pub discarded_samples: usize,
}

/// Read-only state shared by every row of one iteration.
struct RowContext<'a> {
    camera: &'a Camera,
    scene: &'a Scene,
    width: u32,
    height: u32,
    max_depth: u32,
    seed: u64,
    iteration: u32,
}

impl RowContext<'_> {
    /// Trace one sample for every pixel of buffer row `y` and add it to `row`.
    ///
    /// Returns the number of discarded non-finite samples.
    fn render_row(&self, y: u32, row: &mut [Color]) -> usize {
        let mut rng = sampling::row_rng(self.seed, self.iteration, y);

        // Buffer rows run top-down, screen v runs bottom-up
        let screen_row = (self.height - 1 - y) as f64;
        let u_scale = (self.width.saturating_sub(1)).max(1) as f64;
        let v_scale = (self.height.saturating_sub(1)).max(1) as f64;

        let mut discarded = 0;
        for (x, pixel) in row.iter_mut().enumerate() {
            let u = (x as f64 + sampling::gen_f64(&mut rng)) / u_scale;
            let v = (screen_row + sampling::gen_f64(&mut rng)) / v_scale;

            let ray = self.camera.get_ray(u, v, &mut rng);
            let sample = ray_color(&ray, self.scene, self.max_depth, &mut rng);

            if sample.is_finite() {
                *pixel += sample;
            } else {
                discarded += 1;
            }
        }
        discarded
    }
}

/// Progressive path tracer: `reset()` then repeated `step()`s.
pub struct ProgressiveRenderer {
    settings: RenderSettings,
    camera: Camera,
    scene: Scene,
    accumulation: AccumulationBuffer,
    display: DisplayBuffer,
    pool: rayon::ThreadPool,
    seed: u64,
    iteration: u32,
    last_iteration_duration: Duration,
    total_render_time: Duration,
}

impl ProgressiveRenderer {
    /// Validate the configuration and build a renderer at iteration 0.
    pub fn new(settings: RenderSettings, description: &SceneDescription) -> RenderResult<Self> {
        settings.validate()?;

        let camera = Camera::new(&settings.camera, settings.aspect_ratio())?;
        let scene = Scene::from_description(description)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.threads.unwrap_or(0))
            .thread_name(|i| format!("ghd-worker-{i}"))
            .build()?;
        let seed = settings.seed.unwrap_or_else(rand::random);

        log::info!(
            "Reset renderer: scene '{}' ({} objects), {}x{}, {} spp, depth {}, {} workers, seed {}",
            description.name,
            scene.len(),
            settings.image_width,
            settings.image_height,
            settings.samples_per_pixel,
            settings.max_bounce_depth,
            pool.current_num_threads(),
            seed
        );

        Ok(Self {
            accumulation: AccumulationBuffer::new(settings.image_width, settings.image_height),
            display: DisplayBuffer::new(settings.image_width, settings.image_height),
            settings,
            camera,
            scene,
            pool,
            seed,
            iteration: 0,
            last_iteration_duration: Duration::ZERO,
            total_render_time: Duration::ZERO,
        })
    }

    /// Replace camera, scene and buffers, and restart at iteration 0.
    ///
    /// On error the renderer keeps its previous state untouched.
    pub fn reset(&mut self, settings: RenderSettings, description: &SceneDescription) -> RenderResult<()> {
        *self = Self::new(settings, description)?;
        Ok(())
    }

    /// Run exactly one accumulation iteration over the whole image.
    pub fn step(&mut self) -> RenderResult<StepReport> {
        let start = Instant::now();

        let context = RowContext {
            camera: &self.camera,
            scene: &self.scene,
            width: self.settings.image_width,
            height: self.settings.image_height,
            max_depth: self.settings.max_bounce_depth,
            seed: self.seed,
            iteration: self.iteration,
        };
        let accumulation = &mut self.accumulation;

        // install() returns only after every row has been committed
        let discarded_samples: usize = self.pool.install(|| {
            accumulation
                .par_rows_mut()
                .enumerate()
                .map(|(y, row)| context.render_row(y as u32, row))
                .sum()
        });

        self.iteration += 1;

        let display = &mut self.display;
        let accumulation = &self.accumulation;
        let iteration = self.iteration;
        self.pool.install(|| display.resolve(accumulation, iteration))?;

        let duration = start.elapsed();
        self.last_iteration_duration = duration;
        self.total_render_time += duration;

        if discarded_samples > 0 {
            log::warn!(
                "Iteration {}: discarded {} non-finite samples",
                self.iteration,
                discarded_samples
            );
        }
        log::debug!(
            "Iteration {}/{} done in {:?}",
            self.iteration,
            self.settings.samples_per_pixel,
            duration
        );
        if self.iteration == self.settings.samples_per_pixel {
            log::info!("Rendering finished in {:?}", self.total_render_time);
        }

        Ok(StepReport {
            iteration: self.iteration,
            samples_per_pixel: self.settings.samples_per_pixel,
            duration,
            discarded_samples,
        })
    }

    /// `(current_iteration, samples_per_pixel)`.
    pub fn progress(&self) -> (u32, u32) {
        (self.iteration, self.settings.samples_per_pixel)
    }

    /// True once `samples_per_pixel` iterations have been accumulated.
    pub fn is_complete(&self) -> bool {
        self.iteration >= self.settings.samples_per_pixel
    }

    /// RGBA bytes of the last completed iteration, `width * height * 4` long.
    pub fn display_buffer(&self) -> &[u8] {
        self.display.as_bytes()
    }

    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accumulation
    }

    /// Wall time of the most recent `step()`.
    pub fn last_iteration_duration(&self) -> Duration {
        self.last_iteration_duration
    }

    /// Wall time of all steps since the last reset.
    pub fn total_render_time(&self) -> Duration {
        self.total_render_time
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Seed actually in use (drawn at reset when the settings leave it open).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn width(&self) -> u32 {
        self.settings.image_width
    }

    pub fn height(&self) -> u32 {
        self.settings.image_height
    }
}
