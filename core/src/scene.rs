//! Scene

use crate::geometry::{Ray, Sphere, Vector3f};
use crate::glint::{Float, INFINITY};
use crate::reflection::Brdf;
use crate::spectrum::Spectrum;
use std::sync::Arc;

/// The nearest surface hit by a ray.
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    /// Parametric distance to the hit.
    pub t: Float,

    /// Index of the hit sphere.
    pub index: usize,
}

/// An immutable list of spheres plus the indices of those that emit light.
/// Constructed once at startup and shared read-only across all workers.
pub struct Scene {
    /// All spheres in the scene.
    pub spheres: Vec<Sphere>,

    /// Indices of the light sources, derived from nonzero emission.
    pub lights: Vec<usize>,
}

impl Scene {
    /// Creates a new `Scene`, tagging every emissive sphere as a light.
    ///
    /// * `spheres` - The spheres.
    pub fn new(spheres: Vec<Sphere>) -> Self {
        let lights = spheres
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_emissive())
            .map(|(i, _)| i)
            .collect();
        Self { spheres, lights }
    }

    /// Traces the ray into the scene and returns the nearest intersection,
    /// if any. Linear scan; the sphere count is small and fixed.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut nearest = Intersection {
            t: INFINITY,
            index: 0,
        };
        for (index, sphere) in self.spheres.iter().enumerate() {
            if let Some(t) = sphere.intersect(ray) {
                if t < nearest.t {
                    nearest = Intersection { t, index };
                }
            }
        }
        (nearest.t < INFINITY).then_some(nearest)
    }

    /// The reference box: five wall spheres, two balls and one spherical
    /// light hanging below the ceiling.
    pub fn cornell_box() -> Self {
        let left_wall = Arc::new(Brdf::Diffuse {
            kd: Spectrum::from_rgb(0.75, 0.25, 0.25),
        });
        let right_wall = Arc::new(Brdf::Diffuse {
            kd: Spectrum::from_rgb(0.25, 0.25, 0.75),
        });
        let other_wall = Arc::new(Brdf::Diffuse {
            kd: Spectrum::new(0.75),
        });
        let bright_surf = Arc::new(Brdf::Diffuse {
            kd: Spectrum::new(0.9),
        });
        let black_surf = Arc::new(Brdf::Diffuse {
            kd: Spectrum::ZERO,
        });

        Self::new(vec![
            // Left
            Sphere::new(
                1e5,
                Vector3f::new(1e5 + 1.0, 40.8, 81.6),
                Spectrum::ZERO,
                left_wall,
            ),
            // Right
            Sphere::new(
                1e5,
                Vector3f::new(-1e5 + 99.0, 40.8, 81.6),
                Spectrum::ZERO,
                right_wall,
            ),
            // Back
            Sphere::new(
                1e5,
                Vector3f::new(50.0, 40.8, 1e5),
                Spectrum::ZERO,
                Arc::clone(&other_wall),
            ),
            // Bottom
            Sphere::new(
                1e5,
                Vector3f::new(50.0, 1e5, 81.6),
                Spectrum::ZERO,
                Arc::clone(&other_wall),
            ),
            // Top
            Sphere::new(
                1e5,
                Vector3f::new(50.0, -1e5 + 81.6, 81.6),
                Spectrum::ZERO,
                other_wall,
            ),
            // Ball 1
            Sphere::new(
                16.5,
                Vector3f::new(27.0, 16.5, 47.0),
                Spectrum::ZERO,
                Arc::clone(&bright_surf),
            ),
            // Ball 2
            Sphere::new(
                16.5,
                Vector3f::new(73.0, 16.5, 78.0),
                Spectrum::ZERO,
                bright_surf,
            ),
            // Light
            Sphere::new(
                5.0,
                Vector3f::new(50.0, 70.0, 81.6),
                Spectrum::new(50.0),
                black_surf,
            ),
        ])
    }

    /// A variant of the reference box with a mirror ball in place of the
    /// second diffuse ball.
    pub fn cornell_box_with_mirror() -> Self {
        let mut scene = Self::cornell_box();
        scene.spheres[6].brdf = Arc::new(Brdf::Specular {
            ks: Spectrum::new(0.999),
        });
        scene
    }
}
