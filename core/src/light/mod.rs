//! Lights

mod visibility_tester;

// Re-export.
pub use visibility_tester::*;

use crate::geometry::{Sphere, Vector3f};
use crate::glint::Float;
use crate::sampling::{uniform_sample_sphere, uniform_sphere_area_pdf};

/// A point drawn uniformly on the surface of an area light.
#[derive(Copy, Clone, Debug)]
pub struct LightSample {
    /// The sampled surface point.
    pub p: Vector3f,

    /// Outward surface normal at the point.
    pub n: Vector3f,

    /// Area density the point was drawn with, 1/(4πr²).
    pub pdf_area: Float,
}

/// Samples a point uniformly over the surface of a spherical light.
///
/// * `light` - The light sphere.
/// * `u1`    - First uniform variate in [0, 1).
/// * `u2`    - Second uniform variate in [0, 1).
pub fn sample_surface(light: &Sphere, u1: Float, u2: Float) -> LightSample {
    let n = uniform_sample_sphere(u1, u2);
    LightSample {
        p: light.center + n * light.radius,
        n,
        pdf_area: uniform_sphere_area_pdf(light.radius),
    }
}
