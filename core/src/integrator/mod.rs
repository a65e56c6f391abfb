//! Integrator

use crate::camera::Camera;
use crate::film::Film;
use crate::geometry::Ray;
use crate::glint::Float;
use crate::rng::{worker_rngs, RNG};
use crate::scene::Scene;
use crate::spectrum::Spectrum;
use indicatif::ProgressBar;
use log::{error, info};

/// Settings for one render.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: usize,

    /// Image height in pixels.
    pub height: usize,

    /// Samples per pixel, spread over a 2×2 sub-pixel grid.
    pub samples_per_pixel: usize,

    /// Number of worker threads.
    pub threads: usize,

    /// Master seed, expanded into one RNG stream per worker.
    pub seed: u64,
}

/// Integrator interface. Implementations estimate the radiance arriving at
/// a ray's origin; the provided `render` drives them over a whole image.
pub trait Integrator: Send + Sync {
    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// * `ray`   - The ray.
    /// * `scene` - The scene.
    /// * `rng`   - The calling worker's generator.
    /// * `depth` - The recursion depth.
    fn li(&self, ray: &Ray, scene: &Scene, rng: &mut RNG, depth: usize) -> Spectrum;

    /// Render the scene.
    ///
    /// One worker per configured thread; rows are assigned round-robin so a
    /// fixed worker count and master seed reproduce the image exactly. Each
    /// worker owns one RNG stream and never touches another's. Finished
    /// rows travel over a channel to this thread, which merges them into
    /// the film and reports progress.
    ///
    /// * `scene`  - The scene.
    /// * `camera` - The camera.
    /// * `opts`   - Render settings.
    fn render(&self, scene: &Scene, camera: &Camera, opts: &RenderOptions) -> Film {
        let width = opts.width;
        let height = opts.height;
        let samples = (opts.samples_per_pixel / 4).max(1);
        let nworkers = opts.threads.max(1);

        let mut film = Film::new(width, height);

        info!(
            "Rendering {}x{} at {} spp on {} workers",
            width,
            height,
            samples * 4,
            nworkers
        );
        let progress = ProgressBar::new(height as u64);

        crossbeam::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded(nworkers);

            // Spawn worker threads; worker w renders rows w, w+n, w+2n, ...
            for (w, mut rng) in worker_rngs(opts.seed, nworkers).into_iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let mut y = w;
                    while y < height {
                        let row = render_row(self, scene, camera, y, width, samples, &mut rng);
                        tx.send((y, row)).unwrap();
                        y += nworkers;
                    }
                });
            }
            drop(tx); // Drop extra tx since we've cloned one for each worker.

            // Merge rows as they finish. Row y counts up from the bottom of
            // the image; the film stores top-down.
            for (y, row) in rx.iter() {
                film.merge_row(height - 1 - y, row);
                progress.inc(1);
            }
        })
        .unwrap();

        progress.finish_with_message("Render complete");

        film
    }
}

/// Renders one image row: 2×2 sub-pixel grid, `samples` jittered camera
/// rays per sub-pixel, each sub-pixel average clamped before accumulation.
///
/// * `integrator` - The integrator.
/// * `scene`      - The scene.
/// * `camera`     - The camera.
/// * `y`          - Row index, bottom-up.
/// * `width`      - Image width in pixels.
/// * `samples`    - Samples per sub-pixel.
/// * `rng`        - The calling worker's generator.
fn render_row<I: Integrator + ?Sized>(
    integrator: &I,
    scene: &Scene,
    camera: &Camera,
    y: usize,
    width: usize,
    samples: usize,
    rng: &mut RNG,
) -> Vec<Spectrum> {
    let mut row = Vec::with_capacity(width);

    for x in 0..width {
        let mut pixel = Spectrum::ZERO;

        for sy in 0..2 {
            for sx in 0..2 {
                let mut sub = Spectrum::ZERO;

                for _ in 0..samples {
                    let u1 = rng.uniform_float();
                    let u2 = rng.uniform_float();
                    let ray = camera.generate_ray(x, y, sx, sy, u1, u2);

                    let mut l = integrator.li(&ray, scene, rng, 1);

                    // Remove radiance artifacts before display conversion.
                    if l.has_nans() {
                        error!("Not-a-number radiance value returned for pixel ({x}, {y}). Setting to black.");
                        l = Spectrum::ZERO;
                    } else if l.y() < -1e-5 {
                        error!(
                            "Negative luminance value, {}, returned for pixel ({x}, {y}). Setting to black.",
                            l.y()
                        );
                        l = Spectrum::ZERO;
                    }

                    sub += l * (1.0 / samples as Float);
                }

                pixel += sub.clamp(0.0, 1.0) * 0.25;
            }
        }

        row.push(pixel);
    }

    row
}
