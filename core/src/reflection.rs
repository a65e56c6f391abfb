//! Reflection

use crate::geometry::{coordinate_system, Vector3f};
use crate::glint::{Float, INV_PI};
use crate::sampling::{cosine_hemisphere_pdf, cosine_sample_hemisphere};
use crate::spectrum::Spectrum;

/// The result of importance-sampling a BRDF: an incident direction, the
/// BRDF value toward it, the solid-angle density it was drawn with, and
/// whether it came from a delta (perfect mirror) distribution.
#[derive(Copy, Clone, Debug)]
pub struct BrdfSample {
    /// BRDF value for the sampled direction.
    pub f: Spectrum,

    /// Sampled incident direction.
    pub wi: Vector3f,

    /// Probability density of the sample. 1 for delta distributions, which
    /// are always "selected".
    pub pdf: Float,

    /// True when the sample came from a delta distribution.
    pub specular: bool,
}

/// The surface responses the renderer supports. A closed set, dispatched by
/// pattern match: the estimator's recursive loop is hot and the capability
/// surface is two variants.
#[derive(Clone, Debug)]
pub enum Brdf {
    /// Ideal diffuse (Lambertian) reflection.
    Diffuse {
        /// Diffuse reflectance.
        kd: Spectrum,
    },

    /// Ideal mirror-specular reflection.
    Specular {
        /// Specular reflectance.
        ks: Spectrum,
    },
}

impl Brdf {
    /// Returns the value of the distribution function for the given pair of
    /// directions, excluding cosine and pdf factors.
    ///
    /// A specular surface is a delta distribution: it has no finite density
    /// toward any direction, so its `eval` is black and all of its energy
    /// flows through `sample`.
    ///
    /// * `_n` - Surface normal, unit length.
    /// * `_wo` - Outgoing direction, unit length.
    /// * `_wi` - Incident direction, unit length.
    pub fn eval(&self, _n: &Vector3f, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        match self {
            Brdf::Diffuse { kd } => *kd * INV_PI,
            Brdf::Specular { .. } => Spectrum::ZERO,
        }
    }

    /// Draws an incident direction from the density matching this BRDF and
    /// returns it along with that density. The returned pdf is exactly the
    /// density `wi` was drawn with; the estimator relies on this for
    /// unbiasedness.
    ///
    /// * `n`  - Surface normal, unit length, oriented toward `wo`.
    /// * `wo` - Outgoing direction, unit length.
    /// * `u1` - First uniform variate in [0, 1).
    /// * `u2` - Second uniform variate in [0, 1).
    pub fn sample(&self, n: &Vector3f, wo: &Vector3f, u1: Float, u2: Float) -> BrdfSample {
        match self {
            Brdf::Diffuse { .. } => {
                let local = cosine_sample_hemisphere(u1, u2);
                let (u, v) = coordinate_system(n);
                let wi = u * local.x + v * local.y + *n * local.z;
                BrdfSample {
                    f: self.eval(n, wo, &wi),
                    wi,
                    pdf: cosine_hemisphere_pdf(wi.dot(n)),
                    specular: false,
                }
            }
            Brdf::Specular { ks } => {
                let wi = reflect(n, wo);
                let cos_theta = n.dot(&wi);
                if cos_theta <= 0.0 {
                    // Grazing mirror; treat as a zero-contribution sample
                    // rather than dividing by zero.
                    return BrdfSample {
                        f: Spectrum::ZERO,
                        wi,
                        pdf: 0.0,
                        specular: true,
                    };
                }
                // f · cosθ / pdf must equal ks for the point mass.
                BrdfSample {
                    f: *ks / cos_theta,
                    wi,
                    pdf: 1.0,
                    specular: true,
                }
            }
        }
    }

    /// Returns true for delta-distribution surfaces, which next-event
    /// estimation must skip.
    pub fn is_specular(&self) -> bool {
        matches!(self, Brdf::Specular { .. })
    }
}

/// Returns the perfect mirror direction of `wo` about `n`.
///
/// * `n`  - Surface normal, unit length.
/// * `wo` - Outgoing direction, unit length, in the hemisphere of `n`.
#[inline]
pub fn reflect(n: &Vector3f, wo: &Vector3f) -> Vector3f {
    *n * (2.0 * n.dot(wo)) - *wo
}
