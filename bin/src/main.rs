#[macro_use]
extern crate log;

use clap::Parser;
use glint_core::camera::Camera;
use glint_core::integrator::{Integrator, RenderOptions};
use glint_core::scene::Scene;
use glint_integrators::PathIntegrator;
use std::process::exit;

/// Command line options.
#[derive(Parser, Clone)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// Image width in pixels.
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 1024,
        help = "Image width in pixels."
    )]
    width: usize,

    /// Image height in pixels.
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 768,
        help = "Image height in pixels."
    )]
    height: usize,

    /// Samples per pixel.
    #[arg(
        long = "spp",
        short = 's',
        value_name = "NUM",
        default_value_t = 16,
        help = "Samples per pixel, rounded down to a multiple of 4."
    )]
    samples_per_pixel: usize,

    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for rendering."
    )]
    n_threads: usize,

    /// Master seed for the per-worker random streams.
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 0,
        help = "Master seed for the per-worker random streams."
    )]
    seed: u64,

    /// Render the variant with a mirror-surfaced second ball.
    #[arg(long, help = "Render the variant with a mirror-surfaced second ball.")]
    mirror: bool,

    /// Path to the image file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        default_value = "image.ppm",
        help = "Write the final image to the given filename."
    )]
    image_file: String,
}

impl Options {
    /// Returns the number of threads to use.
    fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();

    let scene = if options.mirror {
        Scene::cornell_box_with_mirror()
    } else {
        Scene::cornell_box()
    };
    let camera = Camera::reference(options.width, options.height);
    let integrator = PathIntegrator::default();

    let render_options = RenderOptions {
        width: options.width,
        height: options.height,
        samples_per_pixel: options.samples_per_pixel,
        threads: options.threads(),
        seed: options.seed,
    };

    let film = integrator.render(&scene, &camera, &render_options);

    if let Err(e) = film.write_image(&options.image_file) {
        error!("{e}");
        exit(1);
    }
}
