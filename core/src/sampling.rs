//! Common sampling functions.

use crate::geometry::Vector3f;
use crate::glint::{Float, FOUR_PI, INV_PI, TWO_PI};

/// Uniformly sample a direction from a sphere.
///
/// * `u1` - First uniform variate in [0, 1).
/// * `u2` - Second uniform variate in [0, 1).
pub fn uniform_sample_sphere(u1: Float, u2: Float) -> Vector3f {
    let z = 2.0 * u1 - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = TWO_PI * u2;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the area PDF for uniformly sampling the surface of a sphere.
///
/// * `radius` - The sphere radius.
#[inline]
pub fn uniform_sphere_area_pdf(radius: Float) -> Float {
    1.0 / (FOUR_PI * radius * radius)
}

/// Sample a cosine-weighted direction on the hemisphere about +z: polar
/// component z = √u₁, planar radius √(1 − z²), uniform azimuth.
///
/// * `u1` - First uniform variate in [0, 1).
/// * `u2` - Second uniform variate in [0, 1).
pub fn cosine_sample_hemisphere(u1: Float, u2: Float) -> Vector3f {
    let z = u1.sqrt();
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = TWO_PI * u2;
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the solid-angle PDF of a cosine-weighted hemisphere sample.
///
/// * `cos_theta` - Cosine of the angle between the sample and the zenith.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::approx_eq;

    #[test]
    fn sphere_samples_are_unit_length() {
        let mut rng = RNG::new(1);
        for _ in 0..1_000 {
            let d = uniform_sample_sphere(rng.uniform_float(), rng.uniform_float());
            assert!(approx_eq!(f64, d.length(), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn sphere_samples_cover_both_hemispheres() {
        let mut rng = RNG::new(2);
        let n = 10_000;
        let above = (0..n)
            .filter(|_| uniform_sample_sphere(rng.uniform_float(), rng.uniform_float()).z > 0.0)
            .count();
        let frac = above as Float / n as Float;
        assert!((0.45..0.55).contains(&frac));
    }

    #[test]
    fn cosine_samples_lie_in_upper_hemisphere() {
        let mut rng = RNG::new(3);
        for _ in 0..1_000 {
            let d = cosine_sample_hemisphere(rng.uniform_float(), rng.uniform_float());
            assert!(d.z >= 0.0);
            assert!(approx_eq!(f64, d.length(), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn cosine_pdf_matches_sample_density() {
        // Mean of cos θ under the cosine-weighted density is ∫ cos²θ/π dω = 2/3.
        let mut rng = RNG::new(4);
        let n = 200_000;
        let mean: Float = (0..n)
            .map(|_| cosine_sample_hemisphere(rng.uniform_float(), rng.uniform_float()).z)
            .sum::<Float>()
            / n as Float;
        assert!((mean - 2.0 / 3.0).abs() < 5e-3);
    }

    #[test]
    fn sphere_area_pdf() {
        assert!(approx_eq!(
            f64,
            uniform_sphere_area_pdf(5.0),
            1.0 / (FOUR_PI * 25.0),
            epsilon = 1e-15
        ));
    }
}
